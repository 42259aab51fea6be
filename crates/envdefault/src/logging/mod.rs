//! Colorized console logging on top of `tracing`.
//!
//! Requires the `console` feature (enabled by default).
//!
//! - [`ConsoleFormat`] - `LEVEL\tTIMESTAMP\tmessage` event format
//! - [`init`] / [`try_init`] - install a stderr subscriber at `info`
//! - [`error_at`] / [`fatal_at`] - log an error with caller locations
//!
//! # Example
//!
//! ```rust,ignore
//! use envdefault::logging;
//!
//! logging::init();
//!
//! if let Err(err) = Config::from_env_default() {
//!     logging::fatal_at(&err, "loading config");
//! }
//! ```

mod caller;
mod format;

pub use caller::{LogErrorExt, error_at, error_skip, fatal_at, set_error_skip};
pub use format::{ConsoleFormat, TIMESTAMP_FORMAT, render_line};

use thiserror::Error as ThisError;
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Error returned by [`try_init`].
#[derive(Debug, ThisError)]
#[error("failed to install the console logger: {0}")]
pub struct LogInitError(#[from] TryInitError);

/// A `fmt` layer writing [`ConsoleFormat`] lines to stderr.
pub fn layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat::new())
        .with_writer(std::io::stderr)
}

/// Installs the console logger as the global default.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
///
/// # Errors
///
/// Returns [`LogInitError`] if a global subscriber is already installed.
pub fn try_init() -> Result<(), LogInitError> {
    try_init_with_level(LevelFilter::INFO)
}

/// Like [`try_init`], with an explicit default level.
///
/// # Errors
///
/// Returns [`LogInitError`] if a global subscriber is already installed.
pub fn try_init_with_level(level: LevelFilter) -> Result<(), LogInitError> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(layer().with_filter(filter))
        .try_init()?;

    Ok(())
}

/// Installs the console logger, keeping any subscriber already installed.
pub fn init() {
    if let Err(err) = try_init() {
        tracing::debug!(%err, "console logger not installed");
    }
}
