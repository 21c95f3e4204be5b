//! Configuration module for the civic issue client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ClientError;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the issue tracker backend, without a trailing slash
    pub api_url: String,
    /// Path to the SQLite file holding the persisted session
    pub session_path: PathBuf,
    /// Per-request timeout
    pub http_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("CIVIC_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let session_path = env::var("CIVIC_SESSION_PATH")
            .unwrap_or_else(|_| "./data/session.sqlite".to_string())
            .into();

        let http_timeout = match env::var("CIVIC_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| {
                    ClientError::Config(format!("invalid CIVIC_HTTP_TIMEOUT_SECS: {raw}"))
                })?,
            Err(_) => Duration::from_secs(30),
        };

        let log_level = env::var("CIVIC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_url,
            session_path,
            http_timeout,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases touch the same variables, so they run in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CIVIC_API_URL");
        env::remove_var("CIVIC_SESSION_PATH");
        env::remove_var("CIVIC_HTTP_TIMEOUT_SECS");
        env::remove_var("CIVIC_LOG_LEVEL");

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.session_path, PathBuf::from("./data/session.sqlite"));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");

        env::set_var("CIVIC_API_URL", "https://issues.example.org/");
        env::set_var("CIVIC_HTTP_TIMEOUT_SECS", "5");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url, "https://issues.example.org");
        assert_eq!(config.http_timeout, Duration::from_secs(5));

        env::set_var("CIVIC_HTTP_TIMEOUT_SECS", "soon");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        env::remove_var("CIVIC_API_URL");
        env::remove_var("CIVIC_HTTP_TIMEOUT_SECS");
    }
}
