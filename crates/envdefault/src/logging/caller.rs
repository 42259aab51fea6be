//! Error logging with caller locations.
//!
//! [`error_at`] logs an error together with the location that called it,
//! followed by up to [`error_skip`]` - 1` outer frames taken from a
//! backtrace. Outer frames need debug info; without it only the caller's
//! own location is logged. Every location is printed as `path:line:column`
//! with any leading `./` removed.

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};

static ERROR_SKIP: AtomicUsize = AtomicUsize::new(3);

/// Sets how many stack frames [`error_at`] reports. Values below 1 are ignored.
pub fn set_error_skip(depth: usize) {
    if depth < 1 {
        return;
    }
    ERROR_SKIP.store(depth, Ordering::Relaxed);
}

/// How many stack frames [`error_at`] reports, including the caller.
#[must_use]
pub fn error_skip() -> usize {
    ERROR_SKIP.load(Ordering::Relaxed)
}

/// Logs `err` at error level with `msg` and the caller's location.
///
/// Emits one event for the error and the calling location, then one event
/// per outer frame:
///
/// ```text
/// ERROR  	2024-05-01 12:00:00	loading config
///        		invalid value for PORT: expected u16, got "x"
///        		At src/main.rs:14:5.
/// ERROR  	2024-05-01 12:00:00	At src/app.rs:40:9.
/// ```
#[track_caller]
pub fn error_at(err: &(dyn StdError + '_), msg: &str) {
    let caller = Location::caller();
    tracing::error!(
        "{msg}\n{err}\nAt {}:{}:{}.",
        trim_dot_slash(caller.file()),
        caller.line(),
        caller.column()
    );

    let depth = error_skip();
    if depth < 2 {
        return;
    }

    let trace = Backtrace::force_capture().to_string();
    for frame in outer_frames(&trace, depth - 1) {
        tracing::error!("At {frame}.");
    }
}

/// Logs like [`error_at`], then exits the process with status 1.
#[track_caller]
pub fn fatal_at(err: &(dyn StdError + '_), msg: &str) -> ! {
    error_at(err, msg);
    std::process::exit(1)
}

/// Logs the error of a `Result` with [`error_at`] and passes it through.
pub trait LogErrorExt {
    /// Logs the error, if any, with the caller's location.
    #[must_use]
    fn log_error(self, msg: &str) -> Self;
}

impl<T, E: StdError> LogErrorExt for Result<T, E> {
    #[track_caller]
    fn log_error(self, msg: &str) -> Self {
        if let Err(err) = &self {
            error_at(err, msg);
        }
        self
    }
}

/// Source locations of the frames above the caller of [`error_at`].
///
/// Frames inside the standard library and this module are dropped; the
/// first remaining frame is the caller itself, already logged, so it is
/// skipped as well.
fn outer_frames(trace: &str, limit: usize) -> Vec<String> {
    trace
        .lines()
        .filter_map(|line| line.trim().strip_prefix("at "))
        .filter(|location| !is_internal_frame(location))
        .skip(1)
        .take(limit)
        .map(|location| trim_dot_slash(location).to_string())
        .collect()
}

fn trim_dot_slash(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

fn is_internal_frame(location: &str) -> bool {
    let location = location.replace('\\', "/");

    location.starts_with("/rustc/")
        || location.contains("/library/std/")
        || location.contains("/library/core/")
        || location.contains("/library/alloc/")
        || location.contains("logging/caller.rs")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "\
   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:9
   1: envdefault::logging::caller::error_at
             at ./crates/envdefault/src/logging/caller.rs:52:17
   2: app::load
             at ./src/app.rs:10:5
   3: app::run
             at ./src/app.rs:40:9
   4: app::main
             at ./src/main.rs:3:5
   5: core::ops::function::FnOnce::call_once
             at /rustc/abc/library/core/src/ops/function.rs:250:5";

    #[test]
    fn test_outer_frames_skip_internal_and_caller() {
        assert_eq!(
            outer_frames(TRACE, 2),
            ["src/app.rs:40:9", "src/main.rs:3:5"]
        );
    }

    #[test]
    fn test_outer_frames_respect_limit() {
        assert_eq!(outer_frames(TRACE, 1), ["src/app.rs:40:9"]);
        assert!(outer_frames(TRACE, 0).is_empty());
    }

    #[test]
    fn test_outer_frames_without_debug_info() {
        let trace = "   0: <unknown>\n   1: <unknown>";
        assert!(outer_frames(trace, 5).is_empty());
    }

    #[test]
    fn test_trim_dot_slash() {
        assert_eq!(trim_dot_slash("./src/app.rs"), "src/app.rs");
        assert_eq!(trim_dot_slash("src/app.rs"), "src/app.rs");
        assert_eq!(trim_dot_slash("/abs/src/app.rs"), "/abs/src/app.rs");
    }

    #[test]
    fn test_is_internal_frame() {
        assert!(is_internal_frame("/rustc/abc/library/std/src/rt.rs:1:1"));
        assert!(is_internal_frame(r"C:\rust\library\core\src\ops.rs:1:1"));
        assert!(!is_internal_frame("./src/main.rs:3:5"));
    }
}
