//! Environment-backed configuration for the sidecar
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Completion endpoint, bind address, CORS origin, turn limits and rate limiting

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://routellm.abacus.ai/v1";
pub const DEFAULT_MODEL: &str = "route-llm";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAX_ROUNDS: i64 = 8;

#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the completion backend
    pub api_key: String,
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    pub base_url: String,
    pub model: String,
    pub completion_timeout: Duration,
    pub host: String,
    pub port: u16,
    /// The only origin allowed through CORS
    pub allowed_origin: String,
    /// Turn budget applied when a request omits `max_rounds`
    pub default_max_rounds: i64,
    pub max_rounds_limit: i64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window: Duration,
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("ABACUS_API_KEY").ok_or(ConfigError::Missing("ABACUS_API_KEY"))?;

        let base_url = get("ABACUS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "ABACUS_BASE_URL",
                value: base_url,
            });
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        let max_rounds_limit = parse_or(&get, "MAX_ROUNDS_LIMIT", 20_i64)?;
        let default_max_rounds = parse_or(&get, "DEFAULT_MAX_ROUNDS", DEFAULT_MAX_ROUNDS)?;
        if default_max_rounds > max_rounds_limit {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_MAX_ROUNDS",
                value: default_max_rounds.to_string(),
            });
        }

        Ok(Config {
            api_key,
            base_url,
            model: get("COMPLETION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            completion_timeout: Duration::from_secs(parse_or(&get, "COMPLETION_TIMEOUT_SECS", 120_u64)?),
            host: get("SIDECAR_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&get, "SIDECAR_PORT", 8100_u16)?,
            allowed_origin: get("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            default_max_rounds,
            max_rounds_limit,
            rate_limit_max_requests: parse_or(&get, "RATE_LIMIT_MAX_REQUESTS", 20_usize)?,
            rate_limit_window: Duration::from_secs(parse_or(&get, "RATE_LIMIT_WINDOW_SECS", 60_u64)?),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Socket address the HTTP server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key: "SIDECAR_HOST",
                value: self.host.clone(),
            })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
