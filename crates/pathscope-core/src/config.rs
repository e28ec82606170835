//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default port for the web server.
pub const DEFAULT_PORT: u16 = 7878;

const DEFAULT_DB_FILE: &str = "pathscope.db";
const DEFAULT_TICK_SECS: u64 = 5;

/// Runtime configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    /// Base URL other processes use to reach the web server.
    pub web_url: String,
    /// Token granting database-management permission. When unset the
    /// instance is open and every caller may manage the database.
    pub admin_token: Option<String>,
    pub tick_interval: Duration,
}

impl Config {
    /// Read configuration from `PATHSCOPE_*` environment variables,
    /// falling back to defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PATHSCOPE_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let tick_secs = std::env::var("PATHSCOPE_TICK_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TICK_SECS);

        Self {
            db_path: std::env::var("PATHSCOPE_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE)),
            port,
            web_url: std::env::var("PATHSCOPE_WEB_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{}", port)),
            admin_token: std::env::var("PATHSCOPE_ADMIN_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            tick_interval: Duration::from_secs(tick_secs),
        }
    }
}
