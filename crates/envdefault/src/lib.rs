//! # envdefault
//!
//! Fill struct fields from environment variables and static defaults.
//!
//! `envdefault` replaces the usual hand-written `std::env::var(...).parse()`
//! boilerplate with a derive. Each settable field is resolved once, in
//! declaration order, from:
//!
//! 1. an explicit environment key (`#[env(var = "...")]`), or a key derived
//!    from the field name (`server_port` reads `SERVER_PORT`),
//! 2. otherwise the field's default literal (`#[env(default = "...")]`),
//! 3. otherwise the field keeps the value it already had.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use envdefault::EnvDefault;
//!
//! #[derive(EnvDefault, Default)]
//! pub struct Config {
//!     #[env(var = "DATABASE_URL")]
//!     pub db_url: String,
//!
//!     #[env(default = "8080")]
//!     pub server_port: u16,
//!
//!     #[env(default = "250ms")]
//!     pub poll_interval: Duration,
//!
//!     #[env(default = "false")]
//!     pub debug: bool,
//!
//!     // not `pub`: never touched by the loader
//!     cache: Vec<u8>,
//! }
//!
//! fn main() -> Result<(), envdefault::CoercionError> {
//!     let config = Config::from_env_default()?;
//!     println!("listening on {}", config.server_port);
//!     Ok(())
//! }
//! ```
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `var = "NAME"` | Explicit environment key |
//! | `default = "value"` | Literal used when the key is not set |
//! | `skip` | Never write this field |
//! | `parse` | Coerce with `FromStr` instead of [`Coerce`] |
//! | `secret` | Mask the value in errors and logs |
//!
//! Fields without `pub` (or `pub(...)`) visibility are never written.
//!
//! ## Struct Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `prefix = "APP_"` | Prepended to derived keys (not to explicit `var`s) |
//!
//! ## Supported Types
//!
//! | Type | Accepted input |
//! |------|----------------|
//! | `String`, `PathBuf`, `OsString`, `Box<str>`, `Arc<str>` | anything, verbatim |
//! | `bool` | `true`/`false`/`t`/`f`/`1`/`0`, any case |
//! | integers up to 64 bits | base-10, within range |
//! | [`std::time::Duration`] | `"300ms"`, `"1.5h"`, `"2h45m"` |
//! | `Option<T>` | as `T`, wrapped in `Some` |
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `tracing` | Emit a debug event for every loaded field | via `console` |
//! | `console` | [`logging`]: colorized console format and caller-frame error logging | **Yes** |

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Re-export the derive macro
pub use envdefault_macro::EnvDefault;

/// Re-export miette for error reporting.
pub use miette;

mod coerce;
mod duration;
mod error;
mod field;
mod key;
mod loader;
mod source;

pub mod scan;

#[cfg(feature = "console")]
pub mod logging;

pub use coerce::{Coerce, ParseBoolError, from_str, parse_bool};
pub use duration::{ParseDurationError, parse_duration};
pub use error::{BoxError, CoerceFailure, CoercionError, CoercionKind};
pub use field::{EnvDefault, Field, Setter};
pub use key::derive_env_key;
pub use loader::{env_example, load, load_with_report};
pub use source::{FieldReport, LoadReport, Source};
