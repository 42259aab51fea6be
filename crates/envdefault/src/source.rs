//! Source attribution for loaded fields.
//!
//! [`load_with_report`](crate::load_with_report) records, for every field in
//! the table, the key it consulted and where the written value came from.
//! Values themselves are never stored, so a report is safe to log.

use std::fmt::{self, Display, Formatter};

/// Where a field's value came from during a load.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Source {
    /// Value was read from the process environment.
    Environment,

    /// Value came from the field's `default` literal.
    Default,

    /// Neither the environment nor a default supplied a value; the field
    /// kept its initial value.
    Unset,

    /// The field is not settable and was never looked at.
    Skipped,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "Environment variable"),

            Self::Default => write!(f, "Default value"),

            Self::Unset => write!(f, "Not set"),

            Self::Skipped => write!(f, "Skipped"),
        }
    }
}

/// Attribution for a single field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldReport {
    /// The struct field name.
    pub field: &'static str,

    /// The environment key consulted, `None` for skipped fields.
    pub key: Option<String>,

    /// Where the value came from.
    pub source: Source,
}

/// Ordered attribution for every field of a record.
///
/// # Display Output
///
/// ```text
/// Configuration sources:
/// --------------------------------------------------
///   server_port  <- Environment variable [SERVER_PORT]
///   timeout      <- Default value [TIMEOUT]
///   internal     <- Skipped
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    entries: Vec<FieldReport>,
}

impl LoadReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, field: &'static str, key: Option<String>, source: Source) {
        self.entries.push(FieldReport { field, key, source });
    }

    /// Looks up the attribution for a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldReport> {
        self.entries.iter().find(|entry| entry.field == field)
    }

    /// Iterates over attributions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldReport> {
        self.entries.iter()
    }

    /// Number of fields in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for LoadReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration sources:")?;
        writeln!(f, "{}", "-".repeat(50))?;

        let width = self
            .entries
            .iter()
            .map(|entry| entry.field.len())
            .max()
            .unwrap_or(0);

        for entry in &self.entries {
            match &entry.key {
                Some(key) => writeln!(
                    f,
                    "  {:<width$}  <- {} [{}]",
                    entry.field, entry.source, key
                )?,
                None => writeln!(f, "  {:<width$}  <- {}", entry.field, entry.source)?,
            }
        }

        Ok(())
    }
}
