//! Duration literal parsing.
//!
//! A duration literal is an optional sign followed by one or more
//! `<decimal><unit>` groups, such as `"300ms"`, `"1.5h"` or `"2h45m"`.
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
//!
//! The bare literal `"0"` needs no unit. Every other number must carry one,
//! so `"250"` is rejected. [`Duration`] cannot be negative, so any literal
//! that evaluates below zero is rejected too.

use std::time::Duration;

use thiserror::Error as ThisError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Fraction digits past this point cannot change the result by a nanosecond.
const MAX_FRACTION_DIGITS: usize = 18;

/// Error returned by [`parse_duration`].
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum ParseDurationError {
    /// The literal is empty or only a sign.
    #[error("invalid duration {input:?}")]
    Invalid {
        /// The rejected literal.
        input: String,
    },

    /// A number was not followed by a unit.
    #[error("missing unit in duration {input:?}")]
    MissingUnit {
        /// The rejected literal.
        input: String,
    },

    /// A number was followed by an unrecognised unit.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The unrecognised unit.
        unit: String,

        /// The rejected literal.
        input: String,
    },

    /// The literal evaluates to a negative duration.
    #[error("negative duration {input:?}")]
    Negative {
        /// The rejected literal.
        input: String,
    },

    /// The literal exceeds the representable range.
    #[error("duration {input:?} is out of range")]
    Overflow {
        /// The rejected literal.
        input: String,
    },
}

/// Parses a duration literal such as `"250ms"` or `"1h30m"`.
///
/// # Errors
///
/// Returns a [`ParseDurationError`] when the literal does not follow the
/// grammar, is negative, or exceeds `u64::MAX` nanoseconds.
///
/// ```
/// use std::time::Duration;
/// use envdefault::parse_duration;
///
/// assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
/// assert!(parse_duration("250").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    if rest.is_empty() {
        return Err(ParseDurationError::Invalid {
            input: input.to_string(),
        });
    }

    let mut total: u128 = 0;

    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_whole),
        };

        // "." alone, or a unit with no number in front of it
        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseDurationError::Invalid {
                input: input.to_string(),
            });
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());

        if unit_len == 0 {
            return Err(ParseDurationError::MissingUnit {
                input: input.to_string(),
            });
        }

        let (unit, remaining) = after_number.split_at(unit_len);
        let scale = unit_scale(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let nanos = group_nanos(whole, fraction, scale).ok_or_else(|| {
            ParseDurationError::Overflow {
                input: input.to_string(),
            }
        })?;

        total = total
            .checked_add(nanos)
            .ok_or_else(|| ParseDurationError::Overflow {
                input: input.to_string(),
            })?;

        rest = remaining;
    }

    if negative && total != 0 {
        return Err(ParseDurationError::Negative {
            input: input.to_string(),
        });
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| ParseDurationError::Overflow {
            input: input.to_string(),
        })
}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(len)
}

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Nanoseconds for one `<whole>.<fraction><unit>` group, truncated.
fn group_nanos(whole: &str, fraction: &str, scale: u128) -> Option<u128> {
    let whole_nanos = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?.checked_mul(scale)?
    };

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if fraction.is_empty() {
        return Some(whole_nanos);
    }

    let digits = fraction.parse::<u128>().ok()?;
    let divisor = 10u128.pow(u32::try_from(fraction.len()).ok()?);
    let fraction_nanos = digits.checked_mul(scale)? / divisor;

    whole_nanos.checked_add(fraction_nanos)
}
