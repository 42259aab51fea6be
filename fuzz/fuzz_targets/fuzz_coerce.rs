#![no_main]

use std::time::Duration;

use envdefault::Coerce;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Every built-in coercion should never panic ===
    let _ = bool::coerce(data);
    let _ = i8::coerce(data);
    let _ = u16::coerce(data);
    let _ = i64::coerce(data);
    let _ = u64::coerce(data);
    let _ = usize::coerce(data);
    let _ = Duration::coerce(data);
    let _ = Option::<u32>::coerce(data);

    // === Strings are always verbatim ===
    assert_eq!(String::coerce(data).ok().as_deref(), Some(data));

    // === Failures always render ===
    if let Err(failure) = i64::coerce(data) {
        let _ = failure.to_string();
    }
});
