//! Environment key derivation.
//!
//! When a field has no explicit `var`, its key is derived from the field
//! name. A word starts at the first character, at every uppercase letter and
//! after every underscore; words are uppercased and joined with `_`.
//!
//! | Field name | Key |
//! |------------|-----|
//! | `server_port` | `SERVER_PORT` |
//! | `ServerPort` | `SERVER_PORT` |
//! | `MaxRetryCount` | `MAX_RETRY_COUNT` |
//! | `HTTPPort` | `H_T_T_P_PORT` |

/// Derives an environment key from a field name.
///
/// Underscores only separate words and never appear doubled, leading or
/// trailing in the result.
///
/// ```
/// assert_eq!(envdefault::derive_env_key("max_retry_count"), "MAX_RETRY_COUNT");
/// assert_eq!(envdefault::derive_env_key("MaxRetryCount"), "MAX_RETRY_COUNT");
/// ```
#[must_use]
pub fn derive_env_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 4);
    let mut word_open = false;

    for ch in name.chars() {
        if ch == '_' {
            word_open = false;
            continue;
        }

        if ch.is_uppercase() {
            word_open = false;
        }

        if !word_open && !key.is_empty() {
            key.push('_');
        }

        word_open = true;
        key.extend(ch.to_uppercase());
    }

    key
}

/// Prepends a struct-level prefix to a derived key.
pub(crate) fn with_prefix(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{key}"),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_names() {
        assert_eq!(derive_env_key("ServerPort"), "SERVER_PORT");
        assert_eq!(derive_env_key("MaxRetryCount"), "MAX_RETRY_COUNT");
        assert_eq!(derive_env_key("Name"), "NAME");
    }

    #[test]
    fn test_snake_case_names() {
        assert_eq!(derive_env_key("server_port"), "SERVER_PORT");
        assert_eq!(derive_env_key("timeout"), "TIMEOUT");
        assert_eq!(derive_env_key("db_url2"), "DB_URL2");
    }

    #[test]
    fn test_each_capital_starts_a_word() {
        assert_eq!(derive_env_key("HTTPPort"), "H_T_T_P_PORT");
        assert_eq!(derive_env_key("maxRetry"), "MAX_RETRY");
    }

    #[test]
    fn test_underscores_never_doubled() {
        assert_eq!(derive_env_key("_leading"), "LEADING");
        assert_eq!(derive_env_key("trailing_"), "TRAILING");
        assert_eq!(derive_env_key("a__b"), "A_B");
        assert_eq!(derive_env_key("Snake_Case"), "SNAKE_CASE");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(derive_env_key(""), "");
        assert_eq!(derive_env_key("___"), "");
    }

    #[test]
    fn test_with_prefix() {
        assert_eq!(with_prefix(Some("APP_"), "PORT"), "APP_PORT");
        assert_eq!(with_prefix(None, "PORT"), "PORT");
    }
}
