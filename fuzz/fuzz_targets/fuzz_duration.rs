#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Should never panic ===
    let Ok(duration) = envdefault::parse_duration(data) else {
        return;
    };

    // === Accepted literals never exceed u64 nanoseconds ===
    assert!(duration.as_nanos() <= u128::from(u64::MAX));

    // === A leading '+' never changes the result ===
    if !data.starts_with(['+', '-']) {
        assert_eq!(envdefault::parse_duration(&format!("+{data}")), Ok(duration));
    }
});
