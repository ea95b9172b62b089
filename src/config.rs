//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - PostgreSQL DSN. When unset the service runs on the
//!   in-memory backend (links do not survive a restart).
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base URL used in QR payloads
//!   (default: `http://localhost:3000`)
//! - `TOKEN_POLICY` - What to do when a create request omits the token:
//!   `generate` (default) picks a random one, `require` rejects the request.
//! - `BEHIND_PROXY` - Read visitor IPs from `X-Forwarded-For` / `X-Real-IP`.
//!   Enable only behind a trusted reverse proxy.
//! - `RUST_LOG` - Log filter (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Behavior when a create request carries no token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPolicy {
    /// Generate a random token server-side.
    Generate,
    /// Reject the request with a validation error.
    Require,
}

impl FromStr for TokenPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "generate" => Ok(Self::Generate),
            "require" => Ok(Self::Require),
            other => bail!("TOKEN_POLICY must be 'generate' or 'require', got '{other}'"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub listen_addr: String,
    pub base_url: String,
    pub token_policy: TokenPolicy,
    /// When true, visitor IPs are read from `X-Forwarded-For` / `X-Real-IP`
    /// headers. Enable only behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub log_level: String,
    pub log_format: String,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TOKEN_POLICY` carries an unknown value.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").ok();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let token_policy = match env::var("TOKEN_POLICY") {
            Ok(value) => value
                .parse()
                .context("Failed to load token policy configuration")?,
            Err(_) => TokenPolicy::Generate,
        };

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            token_policy,
            behind_proxy,
            log_level,
            log_format,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `LISTEN` is not a socket address
    /// - `BASE_URL` is not an absolute URL
    /// - `LOG_FORMAT` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        self.listen_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("LISTEN is not a valid socket address: '{}'", self.listen_addr))?;

        url::Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;

        if self.log_format != "text" && self.log_format != "json" {
            bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            database_url: None,
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            token_policy: TokenPolicy::Generate,
            behind_proxy: false,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            db_max_connections: 10,
            db_connect_timeout: 30,
        }
    }

    #[test]
    fn default_shape_is_valid() {
        base_config().validate().unwrap();
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let mut config = base_config();
        config.listen_addr = "not-an-addr".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_base_url() {
        let mut config = base_config();
        config.base_url = "localhost without scheme".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let mut config = base_config();
        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn token_policy_parses_known_values() {
        assert_eq!(
            "generate".parse::<TokenPolicy>().unwrap(),
            TokenPolicy::Generate
        );
        assert_eq!(
            "require".parse::<TokenPolicy>().unwrap(),
            TokenPolicy::Require
        );
        assert!("auto".parse::<TokenPolicy>().is_err());
    }
}
