//! Conversion of raw text into declared field types.
//!
//! [`Coerce`] is the per-type dispatch table used by the loader. The derive
//! macro calls `<FieldType as Coerce>::coerce(raw)` for every settable
//! field, so a field whose type has no implementation fails to compile
//! instead of failing at load time. Fields marked `#[env(parse)]` use
//! [`from_str`] instead.
//!
//! | Declared type | Rule |
//! |---------------|------|
//! | `String`, `PathBuf`, `OsString`, `Box<str>`, `Arc<str>` | assigned verbatim |
//! | `bool` | `true`/`false`/`t`/`f`/`1`/`0`, case-insensitive |
//! | `i8`..`i64`, `isize`, `u8`..`u64`, `usize` | base-10 `i64`, then range-checked |
//! | [`Duration`] | [`parse_duration`] grammar |
//! | `Option<T>` | `Some` of the inner coercion |

use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error as ThisError;

use crate::duration::parse_duration;
use crate::error::{CoerceFailure, CoercionKind};

/// Converts a raw environment or default string into `Self`.
pub trait Coerce: Sized {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceFailure`] naming the rule that rejected the value.
    fn coerce(raw: &str) -> Result<Self, CoerceFailure>;
}

/// Error returned by [`parse_bool`].
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid boolean literal {0:?}")]
pub struct ParseBoolError(pub String);

/// Parses a boolean literal.
///
/// Accepts `true`, `false`, `t`, `f`, `1` and `0` in any letter case.
///
/// # Errors
///
/// Returns [`ParseBoolError`] for any other input, including the empty string.
pub fn parse_bool(raw: &str) -> Result<bool, ParseBoolError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(ParseBoolError(raw.to_string())),
    }
}

/// Parses through `FromStr`, for fields marked `#[env(parse)]`.
///
/// # Errors
///
/// Returns a [`CoerceFailure`] of kind [`CoercionKind::Parse`] wrapping the
/// type's own parse error.
pub fn from_str<T>(raw: &str) -> Result<T, CoerceFailure>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .map_err(|e| CoerceFailure::new(CoercionKind::Parse, e))
}

fn parse_i64(raw: &str) -> Result<i64, CoerceFailure> {
    raw.parse::<i64>()
        .map_err(|e| CoerceFailure::new(CoercionKind::Integer, e))
}

/// Generates `Coerce` for integer types by range-checking an `i64`
macro_rules! impl_coerce_integer {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Coerce for $t {
                fn coerce(raw: &str) -> Result<Self, CoerceFailure> {
                    let wide = parse_i64(raw)?;

                    <$t>::try_from(wide)
                        .map_err(|e| CoerceFailure::new(CoercionKind::Integer, e))
                }
            }
        )+
    };
}

impl_coerce_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Generates `Coerce` for types built directly from the raw string
macro_rules! impl_coerce_verbatim {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Coerce for $t {
                fn coerce(raw: &str) -> Result<Self, CoerceFailure> {
                    Ok(<$t>::from(raw))
                }
            }
        )+
    };
}

impl_coerce_verbatim!(String, PathBuf, OsString, Box<str>, Arc<str>);

impl Coerce for bool {
    fn coerce(raw: &str) -> Result<Self, CoerceFailure> {
        parse_bool(raw).map_err(|e| CoerceFailure::new(CoercionKind::Bool, e))
    }
}

impl Coerce for Duration {
    fn coerce(raw: &str) -> Result<Self, CoerceFailure> {
        parse_duration(raw).map_err(|e| CoerceFailure::new(CoercionKind::Duration, e))
    }
}

impl<T: Coerce> Coerce for Option<T> {
    fn coerce(raw: &str) -> Result<Self, CoerceFailure> {
        T::coerce(raw).map(Some)
    }
}
