//! Property-based tests for envdefault invariants.
//!
//! These tests verify that key derivation and coercion hold for all
//! possible inputs, not just hand-picked cases.

#![allow(clippy::pedantic)]

use proptest::prelude::*;

// ============================================================================
// Key Derivation Properties
// ============================================================================

mod key_properties {
    use super::*;
    use envdefault::derive_env_key;

    proptest! {
        /// Derivation never panics on any input
        #[test]
        fn derive_never_panics(s in ".*") {
            let _ = derive_env_key(&s);
        }

        /// Snake-case names map to their uppercase form
        #[test]
        fn snake_case_uppercases(name in "[a-z][a-z0-9]{0,8}(_[a-z][a-z0-9]{0,8}){0,4}") {
            prop_assert_eq!(derive_env_key(&name), name.to_uppercase());
        }

        /// Derived keys never start or end with `_` nor contain `__`
        #[test]
        fn no_stray_separators(name in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
            let key = derive_env_key(&name);
            prop_assert!(!key.starts_with('_'), "{}", key);
            prop_assert!(!key.ends_with('_'), "{}", key);
            prop_assert!(!key.contains("__"), "{}", key);
        }

        /// Lowercasing a derived key derives the same key again
        #[test]
        fn lowercase_fixed_point(name in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
            let key = derive_env_key(&name);
            prop_assert_eq!(derive_env_key(&key.to_lowercase()), key);
        }
    }
}

// ============================================================================
// Duration Properties
// ============================================================================

mod duration_properties {
    use super::*;
    use envdefault::parse_duration;
    use std::time::Duration;

    proptest! {
        /// Parsing never panics on any input
        #[test]
        fn never_panics(s in ".*") {
            let _ = parse_duration(&s);
        }

        /// Parsing never panics on grammar-shaped input
        #[test]
        fn never_panics_near_grammar(s in "[+-]?([0-9]{0,25}(\\.[0-9]{0,25})?(ns|us|ms|s|m|h|x)?){1,4}") {
            let _ = parse_duration(&s);
        }

        /// Milliseconds round-trip
        #[test]
        fn millis_roundtrip(n in 0u64..=1_000_000_000) {
            prop_assert_eq!(parse_duration(&format!("{n}ms")), Ok(Duration::from_millis(n)));
        }

        /// Groups add up
        #[test]
        fn groups_add(h in 0u64..1000, m in 0u64..1000, s in 0u64..1000) {
            let parsed = parse_duration(&format!("{h}h{m}m{s}s")).unwrap();
            prop_assert_eq!(parsed, Duration::from_secs(h * 3600 + m * 60 + s));
        }

        /// Numbers without a unit are rejected, except "0"
        #[test]
        fn unitless_rejected(n in 1u64..=u64::MAX) {
            prop_assert!(parse_duration(&n.to_string()).is_err());
        }

        /// Negative non-zero durations are rejected
        #[test]
        fn negative_rejected(n in 1u64..1_000_000) {
            let input = format!("-{n}s");
            prop_assert!(parse_duration(&input).is_err());
        }
    }
}

// ============================================================================
// Coercion Properties
// ============================================================================

mod coercion_properties {
    use super::*;
    use envdefault::{Coerce, CoercionKind};

    proptest! {
        /// Every i64 round-trips through its decimal form
        #[test]
        fn i64_roundtrip(n in prop::num::i64::ANY) {
            prop_assert_eq!(i64::coerce(&n.to_string()).ok(), Some(n));
        }

        /// Narrow integers accept exactly their own range
        #[test]
        fn u8_range(n in -1000i64..1000) {
            let result = u8::coerce(&n.to_string());
            match u8::try_from(n) {
                Ok(expected) => prop_assert_eq!(result.ok(), Some(expected)),
                Err(_) => prop_assert_eq!(result.unwrap_err().kind, CoercionKind::Integer),
            }
        }

        /// Strings are assigned verbatim
        #[test]
        fn strings_verbatim(s in ".*") {
            prop_assert_eq!(String::coerce(&s).ok(), Some(s.clone()));
        }

        /// Bool literals parse in any letter case
        #[test]
        fn bool_any_case(b in prop::bool::ANY, mask in prop::collection::vec(prop::bool::ANY, 5)) {
            let literal: String = (if b { "true" } else { "false" })
                .chars()
                .zip(mask)
                .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(bool::coerce(&literal).ok(), Some(b));
        }

        /// Words that are not bool literals are rejected
        #[test]
        fn bool_rejects_words(s in "[a-z]{2,10}") {
            prop_assume!(s != "true" && s != "false");
            prop_assert_eq!(bool::coerce(&s).unwrap_err().kind, CoercionKind::Bool);
        }
    }
}

// ============================================================================
// Secret Masking Properties
// ============================================================================

mod secret_properties {
    use super::*;
    use envdefault::{CoerceFailure, CoercionError, CoercionKind, Source};

    proptest! {
        /// Secret values never appear in Display or Debug output
        #[test]
        fn secrets_never_exposed(value in "[a-zA-Z0-9]{8,32}") {
            let err = CoercionError::new(
                "API_TOKEN_TTL",
                "api_token_ttl",
                value.clone(),
                true,
                "u64",
                Source::Environment,
                CoerceFailure::new(CoercionKind::Integer, "invalid digit"),
            );

            let display = err.to_string();
            let debug = format!("{err:?}");
            prop_assert!(!display.contains(&value), "Display leaked: {}", display);
            prop_assert!(!debug.contains(&value), "Debug leaked: {}", debug);
        }
    }
}
