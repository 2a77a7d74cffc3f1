//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_POSTGRES_DATABASE, DEFAULT_POSTGRES_HOST, DEFAULT_POSTGRES_PASSWORD,
    DEFAULT_POSTGRES_PORT, DEFAULT_POSTGRES_USERNAME, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_TTL_SECONDS,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Redis backs the session store when set; sessions stay in memory otherwise.
    pub redis_url: Option<String>,
    pub session_ttl_seconds: u64,
    pub session_cookie_secure: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` wins when present; otherwise the URL is assembled from
    /// the `POSTGRES_*` variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            postgres_url(
                &env_or("POSTGRES_USERNAME", DEFAULT_POSTGRES_USERNAME),
                &env_or("POSTGRES_PASSWORD", DEFAULT_POSTGRES_PASSWORD),
                &env_or("POSTGRES_HOST", DEFAULT_POSTGRES_HOST),
                env::var("POSTGRES_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_POSTGRES_PORT),
                &env_or("POSTGRES_DATABASE", DEFAULT_POSTGRES_DATABASE),
            )
        });

        Self {
            database_url,
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            session_ttl_seconds: session_ttl(env::var("SESSION_TTL_SECONDS").ok().as_deref()),
            session_cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .ok()
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Configuration for tests and local experiments: SQLite in memory,
    /// in-process sessions.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            redis_url: None,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            session_cookie_secure: false,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Session lifetime from its raw setting. Unparsable values fall back to the
/// default; zero is raised to one second since Redis refuses a zero expiry.
fn session_ttl(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_SESSION_TTL_SECONDS)
        .max(1)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Build a Postgres connection URL from its parts.
pub fn postgres_url(user: &str, password: &str, host: &str, port: u16, database: &str) -> String {
    format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, database)
}
