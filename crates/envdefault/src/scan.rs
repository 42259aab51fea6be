//! Scan adapters for nullable SQL columns.
//!
//! A database driver hands each column over as a [`DriverValue`]. The
//! adapters here convert that value into a plain Rust value, mapping SQL
//! `NULL` to the type's zero value instead of forcing `Option` into every
//! row struct.
//!
//! | Adapter | `Null` | Accepted | Result |
//! |---------|--------|----------|--------|
//! | [`ScanString`] | `""` | `Bytes`, `Text` | the text, lossily decoded |
//! | [`ScanBool`] | `false` | `Int64` | `value != 0` |
//! | [`ScanInt`] | `0` | `Int64` | the value |
//!
//! Any other driver value is rejected with [`ScanError::Unsupported`].
//!
//! # Example
//!
//! ```
//! use envdefault::scan::{DriverValue, Scan, ScanBool};
//!
//! let mut active = ScanBool::default();
//! active.scan(DriverValue::Int64(1)).unwrap();
//! assert!(*active);
//! ```

use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use thiserror::Error as ThisError;

/// A raw column value as produced by a database driver.
#[derive(Clone, Debug, PartialEq)]
pub enum DriverValue {
    /// SQL `NULL`.
    Null,

    /// A 64-bit integer column.
    Int64(i64),

    /// A floating-point column.
    Float64(f64),

    /// A boolean column.
    Bool(bool),

    /// A binary or text column delivered as bytes.
    Bytes(Vec<u8>),

    /// A text column delivered as a string.
    Text(String),
}

impl DriverValue {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int64(_) => "int64",
            Self::Float64(_) => "float64",
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
        }
    }
}

/// Error returned when a driver value cannot be scanned into an adapter.
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum ScanError {
    /// The driver value has a type the adapter does not accept.
    #[error("cannot scan type {found} into {target}")]
    Unsupported {
        /// The adapter being scanned into.
        target: &'static str,

        /// The driver value's type.
        found: &'static str,
    },
}

/// Converts one driver value into `self`.
pub trait Scan {
    /// Overwrites `self` with the converted value.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the value's type is not accepted. `self` is
    /// left unchanged in that case.
    fn scan(&mut self, value: DriverValue) -> Result<(), ScanError>;
}

/// Text column where `NULL` reads as the empty string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ScanString(pub String);

/// Integer-backed boolean column where `NULL` reads as `false`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ScanBool(pub bool);

/// Integer column where `NULL` reads as `0`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ScanInt(pub i64);

impl Scan for ScanString {
    fn scan(&mut self, value: DriverValue) -> Result<(), ScanError> {
        self.0 = match value {
            DriverValue::Null => String::new(),
            DriverValue::Bytes(bytes) => String::from_utf8(bytes)
                .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
            DriverValue::Text(text) => text,
            other => return Err(unsupported("ScanString", &other)),
        };
        Ok(())
    }
}

impl Scan for ScanBool {
    fn scan(&mut self, value: DriverValue) -> Result<(), ScanError> {
        self.0 = match value {
            DriverValue::Null => false,
            DriverValue::Int64(n) => n != 0,
            other => return Err(unsupported("ScanBool", &other)),
        };
        Ok(())
    }
}

impl Scan for ScanInt {
    fn scan(&mut self, value: DriverValue) -> Result<(), ScanError> {
        self.0 = match value {
            DriverValue::Null => 0,
            DriverValue::Int64(n) => n,
            other => return Err(unsupported("ScanInt", &other)),
        };
        Ok(())
    }
}

const fn unsupported(target: &'static str, value: &DriverValue) -> ScanError {
    ScanError::Unsupported {
        target,
        found: value.type_name(),
    }
}

/// Generates `Deref`, `From` and `Display` for a scan adapter
macro_rules! impl_adapter {
    ($($adapter:ident => $inner:ty),+ $(,)?) => {
        $(
            impl Deref for $adapter {
                type Target = $inner;

                fn deref(&self) -> &Self::Target {
                    &self.0
                }
            }

            impl From<$inner> for $adapter {
                fn from(value: $inner) -> Self {
                    Self(value)
                }
            }

            impl From<$adapter> for $inner {
                fn from(value: $adapter) -> Self {
                    value.0
                }
            }

            impl Display for $adapter {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    Display::fmt(&self.0, f)
                }
            }
        )+
    };
}

impl_adapter!(ScanString => String, ScanBool => bool, ScanInt => i64);
