//! Minimal derive: derived keys, no attributes.

use envdefault::EnvDefault;

#[derive(EnvDefault, Default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

fn main() {
    let mut config = Config::default();
    let _ = config.load_env_default();
    let _ = Config::env_example();
    assert_eq!(Config::FIELDS.len(), 3);
}
