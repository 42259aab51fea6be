//! The per-record field table.
//!
//! `#[derive(EnvDefault)]` turns a struct into a constant table of
//! [`Field`] entries, one per struct field in declaration order. The loader
//! walks that table instead of inspecting the struct at runtime.
//!
//! # Generated Code
//!
//! ```rust,ignore
//! #[derive(EnvDefault, Default)]
//! pub struct Config {
//!     #[env(default = "8080")]
//!     pub server_port: u16,
//!     cache: Vec<u8>,
//! }
//!
//! // expands to roughly:
//! impl ::envdefault::EnvDefault for Config {
//!     const FIELDS: &'static [::envdefault::Field<Self>] = &[
//!         ::envdefault::Field {
//!             name: "server_port",
//!             type_name: "u16",
//!             var: None,
//!             default: Some("8080"),
//!             secret: false,
//!             setter: Some(|target: &mut Self, raw: &str| -> Result<(), CoerceFailure> {
//!                 target.server_port = <u16 as ::envdefault::Coerce>::coerce(raw)?;
//!                 Ok(())
//!             }),
//!         },
//!         ::envdefault::Field {
//!             name: "cache",
//!             type_name: "Vec<u8>",
//!             var: None,
//!             default: None,
//!             secret: false,
//!             setter: None,
//!         },
//!     ];
//! }
//! ```

use std::borrow::Cow;

use crate::error::{CoerceFailure, CoercionError};
use crate::key::{derive_env_key, with_prefix};
use crate::source::LoadReport;

/// Writes a coerced value into one field of the target record.
pub type Setter<T> = fn(&mut T, &str) -> Result<(), CoerceFailure>;

/// Descriptor for one field of a record.
///
/// Entries are built by the derive macro but can be written by hand for
/// types that cannot use it.
pub struct Field<T> {
    /// The struct field name.
    pub name: &'static str,

    /// The declared type, as written in the struct.
    pub type_name: &'static str,

    /// Explicit environment key from `#[env(var = "...")]`.
    pub var: Option<&'static str>,

    /// Default literal from `#[env(default = "...")]`.
    pub default: Option<&'static str>,

    /// Whether values must be masked in errors and logs.
    pub secret: bool,

    /// Writes the field; `None` when the field is not settable.
    pub setter: Option<Setter<T>>,
}

impl<T> Field<T> {
    /// The environment key for this field.
    ///
    /// An explicit `var` is used verbatim. Otherwise the key is derived from
    /// the field name and the struct-level prefix is prepended.
    #[must_use]
    pub fn env_key(&self, prefix: Option<&str>) -> Cow<'static, str> {
        match self.var {
            Some(var) => Cow::Borrowed(var),
            None => Cow::Owned(with_prefix(prefix, &derive_env_key(self.name))),
        }
    }

    /// Whether the loader may write this field.
    #[must_use]
    pub const fn is_settable(&self) -> bool {
        self.setter.is_some()
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("var", &self.var)
            .field("default", &self.default)
            .field("secret", &self.secret)
            .field("settable", &self.is_settable())
            .finish()
    }
}

/// A record whose fields can be filled from the environment.
///
/// Usually implemented with `#[derive(EnvDefault)]`.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use envdefault::EnvDefault;
///
/// #[derive(EnvDefault, Default)]
/// #[env_default(prefix = "APP_")]
/// pub struct Config {
///     #[env(var = "DATABASE_URL")]
///     pub db_url: String,
///
///     #[env(default = "8080")]
///     pub server_port: u16,
///
///     #[env(default = "5s")]
///     pub timeout: Duration,
/// }
///
/// let config = Config::from_env_default()?;
/// ```
pub trait EnvDefault: Sized + 'static {
    /// Prefix prepended to derived keys, from `#[env_default(prefix = "...")]`.
    const PREFIX: Option<&'static str> = None;

    /// One entry per struct field, in declaration order.
    const FIELDS: &'static [Field<Self>];

    /// Fills this record in place from the environment and defaults.
    ///
    /// # Errors
    ///
    /// Returns the first [`CoercionError`]. Fields written before it keep
    /// their new values.
    fn load_env_default(&mut self) -> Result<(), CoercionError> {
        crate::loader::load(self)
    }

    /// Like [`load_env_default`](Self::load_env_default), also reporting
    /// where each value came from.
    ///
    /// # Errors
    ///
    /// Returns the first [`CoercionError`].
    fn load_env_default_with_report(&mut self) -> Result<LoadReport, CoercionError> {
        crate::loader::load_with_report(self)
    }

    /// Builds a record from `Default` and fills it.
    ///
    /// # Errors
    ///
    /// Returns the first [`CoercionError`].
    fn from_env_default() -> Result<Self, CoercionError>
    where
        Self: Default,
    {
        let mut record = Self::default();
        record.load_env_default()?;
        Ok(record)
    }

    /// Renders a `.env.example` template for this record.
    #[must_use]
    fn env_example() -> String {
        crate::loader::env_example::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain {
        port: u16,
    }

    const PORT: Field<Plain> = Field {
        name: "server_port",
        type_name: "u16",
        var: None,
        default: None,
        secret: false,
        setter: Some(|target: &mut Plain, raw: &str| -> Result<(), CoerceFailure> {
            target.port = <u16 as crate::Coerce>::coerce(raw)?;
            Ok(())
        }),
    };

    #[test]
    fn test_derived_key_uses_prefix() {
        assert_eq!(PORT.env_key(None), "SERVER_PORT");
        assert_eq!(PORT.env_key(Some("APP_")), "APP_SERVER_PORT");
    }

    #[test]
    fn test_explicit_key_ignores_prefix() {
        let field = Field {
            var: Some("PORT"),
            ..PORT
        };
        assert_eq!(field.env_key(Some("APP_")), "PORT");
    }

    #[test]
    fn test_setter_writes_field() {
        let mut plain = Plain { port: 0 };
        let setter = PORT.setter.unwrap();

        setter(&mut plain, "8080").unwrap();
        assert_eq!(plain.port, 8080);
        assert!(setter(&mut plain, "nope").is_err());
        assert_eq!(plain.port, 8080);
    }
}
