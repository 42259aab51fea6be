//! Colorized single-line event format.

use std::fmt::{self, Write as _};

use chrono::Local;
use colored::{ColoredString, Colorize};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// `chrono` format string for the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the level column, the length of `WARNING`.
const LEVEL_WIDTH: usize = 7;

/// Event formatter producing `LEVEL\tTIMESTAMP\tmessage` lines.
///
/// Continuation lines of a multi-line message are indented past the level
/// and timestamp columns so they line up under the message:
///
/// ```text
/// ERROR  	2024-05-01 12:00:00	request failed
///        		connection reset by peer
/// ```
///
/// Level labels are upper-case level names, with `WARNING` for warn. They
/// are colored (error red, warn yellow, info green, debug and
/// trace white) when the writer supports ANSI escapes.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleFormat {
    ansi: bool,
}

impl ConsoleFormat {
    /// Creates a formatter with colors enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self { ansi: true }
    }

    /// Enables or disables level colors.
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }
}

impl Default for ConsoleFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let ansi = self.ansi && writer.has_ansi_escapes();

        writer.write_str(&render_line(
            *event.metadata().level(),
            &timestamp,
            &message,
            ansi,
        ))
    }
}

/// Renders one log line, including the trailing newline.
#[must_use]
pub fn render_line(level: Level, timestamp: &str, message: &str, ansi: bool) -> String {
    let label = if ansi {
        level_color(level).to_string()
    } else {
        level_label(level).to_string()
    };

    let mut lines = message.split('\n');
    let first = lines.next().unwrap_or_default();

    let mut out = format!("{label:<LEVEL_WIDTH$}\t{timestamp}\t{first}");
    for line in lines {
        // writing into a String cannot fail
        let _ = write!(out, "\n{:<LEVEL_WIDTH$}\t\t{line}", "");
    }
    out.push('\n');
    out
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::WARN => "WARNING",
        _ => level.as_str(),
    }
}

fn level_color(level: Level) -> ColoredString {
    let label = level_label(level);

    match level {
        Level::ERROR => label.red(),
        Level::WARN => label.yellow(),
        Level::INFO => label.green(),
        _ => label.white(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2024-05-01 12:00:00";

    #[test]
    fn test_single_line() {
        assert_eq!(
            render_line(Level::INFO, TS, "server started", false),
            "INFO   \t2024-05-01 12:00:00\tserver started\n"
        );
        assert_eq!(
            render_line(Level::ERROR, TS, "boom", false),
            "ERROR  \t2024-05-01 12:00:00\tboom\n"
        );
    }

    #[test]
    fn test_continuation_lines_are_padded() {
        let line = render_line(Level::WARN, TS, "first\nsecond\nthird", false);
        assert_eq!(
            line,
            "WARNING\t2024-05-01 12:00:00\tfirst\n       \t\tsecond\n       \t\tthird\n"
        );
    }

    #[test]
    fn test_level_labels() {
        let labels: Vec<String> = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE]
            .into_iter()
            .map(|level| render_line(level, TS, "", false))
            .map(|line| line.split('\t').next().unwrap_or_default().to_string())
            .collect();

        assert_eq!(labels, ["ERROR  ", "WARNING", "INFO   ", "DEBUG  ", "TRACE  "]);
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(
            render_line(Level::DEBUG, TS, "", false),
            "DEBUG  \t2024-05-01 12:00:00\t\n"
        );
    }

    #[test]
    fn test_timestamp_format_shape() {
        let now = Local::now().format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(now.len(), TS.len());
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], " ");
    }
}
