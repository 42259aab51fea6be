//! Attribute parsing for `#[env(...)]` and `#[env_default(...)]`.
//!
//! Options are read with syn's `ParseNestedMeta`, which gives comma
//! handling and precise spans for free. Parsing happens in two phases:
//! [`Parser::parse_meta`] accumulates one option at a time, then
//! [`Parser::build`] checks combinations and produces an [`EnvAttr`].
//!
//! # Supported Syntax
//!
//! ## Field-level attributes
//!
//! ```ignore
//! #[env(var = "DATABASE_URL")]              // explicit key
//! #[env(default = "8080")]                  // default literal, derived key
//! #[env(var = "PORT", default = "8080")]    // both
//! #[env(secret)]                            // masked in errors and logs
//! #[env(parse)]                             // coerce with FromStr
//! #[env(skip)]                              // never written
//! ```
//!
//! ## Struct-level attributes
//!
//! ```ignore
//! #[env_default(prefix = "APP_")]           // prefix for derived keys
//! ```

use std::collections::HashSet;

use syn::meta::ParseNestedMeta;
use syn::{Attribute, DeriveInput, Error as SynError, Field, LitStr, Result as SynResult};

/// The parsed result of a field's `#[env(...)]` attribute.
///
/// A field without the attribute gets `EnvAttr::default()`: derived key,
/// no default, coerced through `Coerce`.
#[derive(Clone, Debug, Default)]
pub struct EnvAttr {
    /// Explicit environment key.
    pub var: Option<String>,

    /// Default literal. An empty literal is stored as `None`.
    pub default: Option<String>,

    /// Mask the value in errors and logs.
    pub secret: bool,

    /// Coerce with `FromStr`.
    pub parse: bool,

    /// Never write the field.
    pub skip: bool,
}

/// Accumulating parser for `#[env(...)]`.
#[derive(Default)]
pub struct Parser {
    var: Option<LitStr>,
    default: Option<String>,
    secret: bool,
    parse: bool,
    skip: bool,

    /// Options seen so far, for duplicate detection.
    seen: HashSet<&'static str>,
}

impl Parser {
    /// Parse a single option from within the attribute.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "ParseNestedMeta is passed by value per syn's parse_nested_meta callback signature"
    )]
    fn parse_meta(&mut self, meta: ParseNestedMeta) -> SynResult<()> {
        let ident = meta
            .path
            .get_ident()
            .ok_or_else(|| meta.error("Expected identifier"))?;
        let name = ident.to_string();

        let key: &'static str = match name.as_str() {
            "var" => "var",
            "default" => "default",
            "secret" => "secret",
            "parse" => "parse",
            "skip" => "skip",
            _ => return Err(meta.error(format!("Unknown option `{name}`"))),
        };

        if !self.seen.insert(key) {
            return Err(meta.error(format!("Duplicate option: `{key}`")));
        }

        match key {
            "var" => {
                let lit_str: LitStr = meta.value()?.parse()?;
                self.var = Some(lit_str);
            }

            "default" => {
                let lit_str: LitStr = meta.value()?.parse()?;
                let value = lit_str.value();
                self.default = (!value.is_empty()).then_some(value);
            }

            "secret" => self.secret = true,

            "parse" => self.parse = true,

            "skip" => self.skip = true,

            // validated above
            _ => unreachable!(),
        }

        Ok(())
    }

    /// Validate the accumulated options and build the final `EnvAttr`.
    ///
    /// - `var` must be a non-empty key without `=` or NUL
    /// - `skip` cannot be combined with anything else
    fn build(self, attr: &Attribute) -> SynResult<EnvAttr> {
        if self.skip {
            let incompatible: Vec<&str> = ["var", "default", "secret", "parse"]
                .into_iter()
                .filter(|option| self.seen.contains(option))
                .collect();

            if !incompatible.is_empty() {
                return Err(SynError::new_spanned(
                    attr,
                    format!("Cannot use `{}` with `skip`", incompatible.join("`, `")),
                ));
            }
        }

        let var = match self.var {
            Some(lit) => {
                let value = lit.value();
                if value.is_empty() || value.contains(['=', '\0']) {
                    return Err(SynError::new_spanned(
                        lit,
                        "`var` must be a non-empty environment variable name without `=` or NUL",
                    ));
                }
                Some(value)
            }
            None => None,
        };

        Ok(EnvAttr {
            var,
            default: self.default,
            secret: self.secret,
            parse: self.parse,
            skip: self.skip,
        })
    }

    /// Parse the field's `#[env(...)]` attribute, if any.
    pub fn parse_field(field: &Field) -> SynResult<EnvAttr> {
        let mut found: Option<&Attribute> = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            if found.is_some() {
                return Err(SynError::new_spanned(
                    attr,
                    "Only one #[env(...)] attribute is allowed per field",
                ));
            }
            found = Some(attr);
        }

        let Some(attr) = found else {
            return Ok(EnvAttr::default());
        };

        let mut builder = Self::default();
        attr.parse_nested_meta(|meta: ParseNestedMeta<'_>| builder.parse_meta(meta))?;
        builder.build(attr)
    }
}

/// The parsed struct-level `#[env_default(...)]` attribute.
#[derive(Clone, Debug, Default)]
pub struct EnvDefaultAttr {
    /// Prefix prepended to derived keys.
    pub prefix: Option<String>,
}

impl EnvDefaultAttr {
    /// Parse `#[env_default(...)]` from the struct's attributes.
    pub fn parse_from_struct(input: &DeriveInput) -> SynResult<Self> {
        let mut result = Self::default();

        for attr in &input.attrs {
            if !attr.path().is_ident("env_default") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    if result.prefix.is_some() {
                        return Err(meta.error("Duplicate option: `prefix`"));
                    }

                    let lit_str: LitStr = meta.value()?.parse()?;
                    result.prefix = Some(lit_str.value());

                    Ok(())
                } else {
                    Err(meta.error("Unknown option. Supported: `prefix`"))
                }
            })?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{FieldsNamed, parse_quote};

    fn first_field(fields: &FieldsNamed) -> &Field {
        fields.named.first().unwrap()
    }

    #[test]
    fn test_no_attribute_is_default() {
        let fields: FieldsNamed = parse_quote!({ pub port: u16 });
        let attr = Parser::parse_field(first_field(&fields)).unwrap();

        assert!(attr.var.is_none());
        assert!(attr.default.is_none());
        assert!(!attr.skip && !attr.secret && !attr.parse);
    }

    #[test]
    fn test_all_options() {
        let fields: FieldsNamed = parse_quote!({
            #[env(var = "PORT", default = "8080", secret, parse)]
            pub port: u16
        });
        let attr = Parser::parse_field(first_field(&fields)).unwrap();

        assert_eq!(attr.var.as_deref(), Some("PORT"));
        assert_eq!(attr.default.as_deref(), Some("8080"));
        assert!(attr.secret && attr.parse && !attr.skip);
    }

    #[test]
    fn test_empty_default_is_none() {
        let fields: FieldsNamed = parse_quote!({
            #[env(default = "")]
            pub port: u16
        });
        let attr = Parser::parse_field(first_field(&fields)).unwrap();
        assert!(attr.default.is_none());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let fields: FieldsNamed = parse_quote!({
            #[env(optional)]
            pub port: u16
        });
        let err = Parser::parse_field(first_field(&fields)).unwrap_err();
        assert!(err.to_string().contains("Unknown option `optional`"));
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let fields: FieldsNamed = parse_quote!({
            #[env(var = "A", var = "B")]
            pub port: u16
        });
        let err = Parser::parse_field(first_field(&fields)).unwrap_err();
        assert!(err.to_string().contains("Duplicate option: `var`"));
    }

    #[test]
    fn test_skip_combinations_rejected() {
        let fields: FieldsNamed = parse_quote!({
            #[env(skip, var = "A", default = "1")]
            pub port: u16
        });
        let err = Parser::parse_field(first_field(&fields)).unwrap_err();
        assert!(err.to_string().contains("Cannot use `var`, `default` with `skip`"));
    }

    #[test]
    fn test_invalid_var_rejected() {
        let fields: FieldsNamed = parse_quote!({
            #[env(var = "A=B")]
            pub port: u16
        });
        assert!(Parser::parse_field(first_field(&fields)).is_err());

        let fields: FieldsNamed = parse_quote!({
            #[env(var = "")]
            pub port: u16
        });
        assert!(Parser::parse_field(first_field(&fields)).is_err());
    }

    #[test]
    fn test_struct_prefix() {
        let input: DeriveInput = parse_quote! {
            #[env_default(prefix = "APP_")]
            struct Config { pub port: u16 }
        };
        let attr = EnvDefaultAttr::parse_from_struct(&input).unwrap();
        assert_eq!(attr.prefix.as_deref(), Some("APP_"));

        let input: DeriveInput = parse_quote! {
            #[env_default(dotenv)]
            struct Config { pub port: u16 }
        };
        assert!(EnvDefaultAttr::parse_from_struct(&input).is_err());
    }
}
