#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let key = envdefault::derive_env_key(data);

    // === No empty words survive ===
    assert!(!key.starts_with('_'));
    assert!(!key.ends_with('_'));
    assert!(!key.contains("__"));

    // === Lowercase output derives the same key again ===
    if key.is_ascii() {
        assert_eq!(envdefault::derive_env_key(&key.to_lowercase()), key);
    }
});
