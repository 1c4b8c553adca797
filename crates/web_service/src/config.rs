//! Configuration management for web service
//!
//! Supports loading configuration from environment variables with fallback to defaults.

use std::num::NonZeroUsize;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4567;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_COOKIE_NAME: &str = "list_session";
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_MAX_SESSIONS: NonZeroUsize = match NonZeroUsize::new(10_000) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Name of the cookie carrying the session id
    pub cookie_name: String,
    /// Sessions untouched for longer than this are dropped
    pub session_idle_timeout: Duration,
    /// Upper bound on live sessions; the least recently used goes first
    pub max_sessions: NonZeroUsize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load ServerConfig from environment variables
///
/// Environment variables:
/// - `APP_HOST`: Interface to bind (default: 127.0.0.1)
/// - `APP_PORT`: Port to listen on (default: 4567)
/// - `APP_WORKERS`: Number of HTTP workers (default: 4)
/// - `SESSION_COOKIE_NAME`: Session cookie name (default: list_session)
/// - `SESSION_IDLE_SECS`: Idle seconds before a session is dropped (default: 86400)
/// - `MAX_SESSIONS`: Live sessions kept in memory (default: 10000)
pub fn load_server_config() -> ServerConfig {
    server_config_from(|key| std::env::var(key).ok())
}

/// Build a ServerConfig from any key lookup. Missing or malformed values
/// fall back to the defaults.
pub fn server_config_from(lookup: impl Fn(&str) -> Option<String>) -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        host: lookup("APP_HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.host),
        port: lookup("APP_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port),
        workers: lookup("APP_WORKERS")
            .and_then(|v| v.parse().ok())
            .filter(|w: &usize| *w > 0)
            .unwrap_or(defaults.workers),
        cookie_name: lookup("SESSION_COOKIE_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.cookie_name),
        session_idle_timeout: lookup("SESSION_IDLE_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_idle_timeout),
        max_sessions: lookup("MAX_SESSIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_sessions),
    }
}
