//! The load pass over a record's field table.
//!
//! For each entry of [`EnvDefault::FIELDS`], in declaration order:
//!
//! 1. Unsettable fields are skipped without a key lookup.
//! 2. The key is the explicit `var`, or derived from the field name.
//! 3. A present environment value is coerced and written. An empty string
//!    counts as present.
//! 4. Otherwise the `default` literal, if any, is coerced and written.
//! 5. Otherwise the field keeps its current value.
//!
//! The first coercion failure stops the pass. Earlier writes are kept.
//!
//! # Example
//!
//! ```rust,ignore
//! use envdefault::{EnvDefault, load};
//!
//! let mut config = Config::default();
//! load(&mut config)?;
//! ```

use std::env::{self, VarError};

use crate::error::{CoerceFailure, CoercionError, CoercionKind};
use crate::field::{EnvDefault, Field};
use crate::source::{LoadReport, Source};

/// Fills `target` in place from the process environment and field defaults.
///
/// # Errors
///
/// Returns the first [`CoercionError`]. Fields written before it keep their
/// new values; later fields are untouched.
pub fn load<T: EnvDefault>(target: &mut T) -> Result<(), CoercionError> {
    run(target, None)
}

/// Like [`load`], also returning where each field's value came from.
///
/// # Errors
///
/// Returns the first [`CoercionError`].
pub fn load_with_report<T: EnvDefault>(target: &mut T) -> Result<LoadReport, CoercionError> {
    let mut report = LoadReport::new();
    run(target, Some(&mut report))?;
    Ok(report)
}

fn run<T: EnvDefault>(
    target: &mut T,
    mut report: Option<&mut LoadReport>,
) -> Result<(), CoercionError> {
    for field in T::FIELDS {
        let Some(setter) = field.setter else {
            if let Some(report) = report.as_deref_mut() {
                report.push(field.name, None, Source::Skipped);
            }
            continue;
        };

        let key = field.env_key(T::PREFIX);

        let (raw, source) = match lookup(&key, field)? {
            Some(value) => (value, Source::Environment),
            None => match field.default {
                Some(default) => (default.to_string(), Source::Default),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(field = field.name, key = %key, "no value, field left unchanged");

                    if let Some(report) = report.as_deref_mut() {
                        report.push(field.name, Some(key.into_owned()), Source::Unset);
                    }
                    continue;
                }
            },
        };

        if let Err(failure) = setter(target, &raw) {
            return Err(CoercionError::new(
                key,
                field.name,
                raw,
                field.secret,
                field.type_name,
                source,
                failure,
            ));
        }

        #[cfg(feature = "tracing")]
        if field.secret {
            tracing::debug!(field = field.name, key = %key, %source, "loaded field");
        } else {
            tracing::debug!(field = field.name, key = %key, %source, value = %raw, "loaded field");
        }

        if let Some(report) = report.as_deref_mut() {
            report.push(field.name, Some(key.into_owned()), source);
        }
    }

    Ok(())
}

/// Reads one key from the process environment.
fn lookup<T>(key: &str, field: &Field<T>) -> Result<Option<String>, CoercionError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),

        Err(VarError::NotPresent) => Ok(None),

        Err(VarError::NotUnicode(raw)) => Err(CoercionError::new(
            key,
            field.name,
            raw.to_string_lossy(),
            field.secret,
            field.type_name,
            Source::Environment,
            CoerceFailure::new(CoercionKind::NotUnicode, "value is not valid UTF-8"),
        )),
    }
}

/// Renders a `.env.example` template from a record's field table.
///
/// Unsettable fields are omitted. Fields with a default are shown
/// commented out with that default:
///
/// ```text
/// # server_port (type: u16)
/// # APP_SERVER_PORT=8080
///
/// # db_url (secret, type: String)
/// DATABASE_URL=
/// ```
#[must_use]
pub fn env_example<T: EnvDefault>() -> String {
    let mut blocks = Vec::new();

    for field in T::FIELDS.iter().filter(|f| f.is_settable()) {
        let key = field.env_key(T::PREFIX);

        let meta = if field.secret {
            format!("secret, type: {}", field.type_name)
        } else {
            format!("type: {}", field.type_name)
        };

        let line = match field.default {
            Some(default) if !field.secret => format!("# {key}={default}"),
            _ => format!("{key}="),
        };

        blocks.push(format!("# {} ({meta})\n{line}", field.name));
    }

    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
