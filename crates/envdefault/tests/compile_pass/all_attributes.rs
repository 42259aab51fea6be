//! Every field and struct attribute together.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use envdefault::{EnvDefault, LoadReport};

/// Not `Coerce`, but allowed because the field is never written.
#[derive(Default)]
struct Cache(Vec<u8>);

#[derive(EnvDefault, Default)]
#[env_default(prefix = "APP_")]
pub struct Config {
    #[env(var = "DATABASE_URL", secret)]
    pub db_url: String,

    #[env(default = "8080")]
    pub server_port: u16,

    #[env(default = "1h30m")]
    pub session_ttl: Duration,

    #[env(default = "")]
    pub log_dir: PathBuf,

    #[env(default = "0.0.0.0", parse)]
    pub bind: IpAddr,

    pub max_connections: Option<u32>,

    pub(crate) region: Arc<str>,

    #[env(skip)]
    pub generation: u64,

    cache: Cache,
}

fn main() {
    let config: Result<Config, envdefault::CoercionError> = Config::from_env_default();
    let mut config = config.unwrap_or_default();
    let report: Result<LoadReport, _> = config.load_env_default_with_report();
    let _ = report.map(|r| r.to_string());
    let _ = config.cache.0.len();
}
