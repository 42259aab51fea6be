//! Error types for environment loading.
//!
//! Loading has exactly one failure mode: a sourced string could not be
//! converted into the declared type of its field. That failure is reported
//! as a [`CoercionError`], which integrates with [`miette`] for rich
//! terminal diagnostics.
//!
//! # Coercion Kinds
//!
//! | Kind | When It Occurs |
//! |------|----------------|
//! | [`CoercionKind::Bool`] | Value is not a recognised boolean literal |
//! | [`CoercionKind::Integer`] | Value is not a base-10 integer, or is out of range |
//! | [`CoercionKind::Duration`] | Value does not follow the duration grammar |
//! | [`CoercionKind::Parse`] | `FromStr` failed for a field marked `parse` |
//! | [`CoercionKind::NotUnicode`] | The environment value is not valid UTF-8 |
//!
//! # Secret Masking
//!
//! Fields marked with `secret` have their values redacted in `Display` and
//! `Debug` output:
//!
//! ```text
//! invalid value for API_TOKEN: expected u64, got <redacted>
//! ```

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};

use miette::Diagnostic;

use crate::Source;

/// Boxed error produced by the underlying parser.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Which coercion rule rejected the value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum CoercionKind {
    /// Boolean literal parsing failed.
    Bool,

    /// Integer parsing failed or the value does not fit the field type.
    Integer,

    /// Duration literal parsing failed.
    Duration,

    /// `FromStr` parsing failed (fields marked `#[env(parse)]`).
    Parse,

    /// The environment value contains bytes that are not valid UTF-8.
    NotUnicode,
}

impl CoercionKind {
    fn help(self, expected_type: &str) -> String {
        match self {
            Self::Bool => {
                "accepted values are true, false, t, f, 1 and 0 (case-insensitive)".to_string()
            }

            Self::Integer => format!("expected a base-10 integer that fits in {expected_type}"),

            Self::Duration => {
                "expected a duration such as \"250ms\", \"5s\" or \"1h30m\"".to_string()
            }

            Self::Parse => format!("expected a valid {expected_type}"),

            Self::NotUnicode => "ensure the variable contains valid UTF-8 text".to_string(),
        }
    }
}

impl Display for CoercionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Duration => "duration",
            Self::Parse => "parse",
            Self::NotUnicode => "unicode",
        };

        f.write_str(name)
    }
}

/// A failed coercion before it is attached to a field.
///
/// Returned by [`Coerce::coerce`](crate::Coerce::coerce) and by the setters
/// in a field table. The loader wraps it into a [`CoercionError`] that names
/// the key, the value and where the value came from.
#[derive(Debug)]
pub struct CoerceFailure {
    /// The rule that rejected the value.
    pub kind: CoercionKind,

    /// The underlying parser error.
    pub source: BoxError,
}

impl CoerceFailure {
    /// Creates a failure of the given kind from any error value.
    pub fn new(kind: CoercionKind, source: impl Into<BoxError>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }
}

impl Display for CoerceFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} coercion failed: {}", self.kind, self.source)
    }
}

impl StdError for CoerceFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// A sourced value could not be converted to its field's declared type.
///
/// The first coercion failure stops the load. Fields written before the
/// failing one keep their new values.
///
/// # Example
///
/// ```rust,ignore
/// match config.load_env_default() {
///     Ok(()) => { /* use config */ }
///     Err(e) => {
///         eprintln!("{:?}", miette::Report::from(e));
///     }
/// }
/// ```
#[derive(Diagnostic)]
#[diagnostic(code(envdefault::coercion), url("https://docs.rs/envdefault"))]
pub struct CoercionError {
    /// The environment key that was consulted.
    pub var: String,

    /// The struct field being written.
    pub field: &'static str,

    /// The raw value that failed to coerce.
    pub value: String,

    /// Whether the field is marked as secret.
    pub secret: bool,

    /// The declared type of the field.
    pub expected_type: &'static str,

    /// Which coercion rule rejected the value.
    pub kind: CoercionKind,

    /// Whether the value came from the environment or from the default.
    pub origin: Source,

    #[help]
    help: String,

    source: BoxError,
}

impl CoercionError {
    /// Creates a coercion error with help text matching its kind.
    pub fn new(
        var: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
        secret: bool,
        expected_type: &'static str,
        origin: Source,
        failure: CoerceFailure,
    ) -> Self {
        Self {
            var: var.into(),
            field,
            value: value.into(),
            secret,
            expected_type,
            help: failure.kind.help(expected_type),
            kind: failure.kind,
            origin,
            source: failure.source,
        }
    }

    /// The help text shown by miette.
    #[must_use]
    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Returns the value, or `<redacted>` for secret fields.
    #[must_use]
    pub fn display_value(&self) -> &str {
        if self.secret {
            "<redacted>"
        } else {
            &self.value
        }
    }
}

// Manual Display impl for secret masking
impl Display for CoercionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.secret {
            write!(
                f,
                "invalid value for {}: expected {}, got <redacted>",
                self.var, self.expected_type
            )
        } else {
            write!(
                f,
                "invalid value for {}: expected {}, got {:?}",
                self.var, self.expected_type, self.value
            )
        }
    }
}

// Manual Debug impl for secret masking
impl Debug for CoercionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionError")
            .field("var", &self.var)
            .field("field", &self.field)
            .field("value", &self.display_value())
            .field("secret", &self.secret)
            .field("expected_type", &self.expected_type)
            .field("kind", &self.kind)
            .field("origin", &self.origin)
            .field("help", &self.help)
            .field("source", &self.source)
            .finish()
    }
}

impl StdError for CoercionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}
