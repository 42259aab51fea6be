//! Per-field code generation.
//!
//! Each named field becomes one `::envdefault::Field` entry in the
//! generated `FIELDS` table. Settable fields carry a setter that coerces
//! the raw string into the field's type; unsettable ones carry `None` and
//! are skipped by the loader.

use proc_macro2::TokenStream as QuoteStream;
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{Field, Ident, Result as SynResult, Type, Visibility};

use crate::parse::{EnvAttr, Parser};

/// Everything the expander needs to know about one field.
pub struct FieldPlan {
    ident: Ident,
    ty: Type,
    attr: EnvAttr,
    settable: bool,
}

impl FieldPlan {
    /// Builds the plan for a named field.
    pub fn new(field: &Field) -> SynResult<Self> {
        let attr = Parser::parse_field(field)?;

        // validated by the caller
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "Expected a named field"))?;

        let settable = is_exported(&field.vis) && !attr.skip;

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            attr,
            settable,
        })
    }

    /// Whether the loader may write this field.
    pub const fn is_settable(&self) -> bool {
        self.settable
    }

    /// Field name without the `r#` of a raw identifier.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Rendered type name, as shown in errors and `.env.example` output.
    pub fn type_name(&self) -> String {
        compact_tokens(&self.ty.to_token_stream().to_string())
    }

    /// The field's entry in the `FIELDS` table.
    pub fn entry(&self) -> QuoteStream {
        let name = self.name();
        let type_name = self.type_name();
        let var = option_str(self.attr.var.as_deref());
        let default = option_str(self.attr.default.as_deref());
        let secret = self.attr.secret;
        let setter = self.setter();

        quote! {
            ::envdefault::Field {
                name: #name,
                type_name: #type_name,
                var: #var,
                default: #default,
                secret: #secret,
                setter: #setter,
            }
        }
    }

    fn setter(&self) -> QuoteStream {
        if !self.settable {
            return quote! { ::core::option::Option::None };
        }

        let ident = &self.ident;
        let ty = &self.ty;

        let coerce = if self.attr.parse {
            quote! { ::envdefault::from_str::<#ty>(__raw)? }
        } else {
            quote! { <#ty as ::envdefault::Coerce>::coerce(__raw)? }
        };

        quote! {
            ::core::option::Option::Some(
                |__target: &mut Self,
                 __raw: &str|
                 -> ::core::result::Result<(), ::envdefault::CoerceFailure> {
                    __target.#ident = #coerce;
                    ::core::result::Result::Ok(())
                },
            )
        }
    }
}

/// `pub` and `pub(...)` fields are settable; inherited visibility is not.
const fn is_exported(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_) | Visibility::Restricted(_))
}

/// Drops the spaces `to_string` puts between tokens, except between two words.
///
/// `& 'static str` becomes `&'static str`, `Vec < u8 >` becomes `Vec<u8>`.
fn compact_tokens(rendered: &str) -> String {
    let chars: Vec<char> = rendered.chars().collect();
    let mut out = String::with_capacity(rendered.len());

    for (i, &ch) in chars.iter().enumerate() {
        if ch != ' ' {
            out.push(ch);
            continue;
        }

        let prev = i.checked_sub(1).and_then(|j| chars.get(j)).copied();
        let next = chars.get(i + 1).copied();

        if prev.is_some_and(is_word_char) && next.is_some_and(is_word_char) {
            out.push(' ');
        }
    }

    out
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn option_str(value: Option<&str>) -> QuoteStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}
