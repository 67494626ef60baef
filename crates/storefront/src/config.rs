//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KIOSK_API_URL` - Base URL of the store backend (e.g., <http://localhost:8000>)
//!
//! ## Optional
//! - `KIOSK_DATA_DIR` - Directory for the durable client state (default: `.kiosk`)
//! - `KIOSK_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".kiosk";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the store backend.
    pub api_url: Url,
    /// Directory holding the durable client state (auth token, guest cart).
    pub data_dir: PathBuf,
    /// HTTP request timeout.
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_required_env("KIOSK_API_URL")?;
        let api_url = Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("KIOSK_API_URL".to_owned(), e.to_string()))?;

        let data_dir = PathBuf::from(get_env_or_default("KIOSK_DATA_DIR", DEFAULT_DATA_DIR));

        let http_timeout = get_env_or_default(
            "KIOSK_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("KIOSK_HTTP_TIMEOUT_SECS".to_owned(), e.to_string())
        })
        .map(Duration::from_secs)?;

        Ok(Self {
            api_url,
            data_dir,
            http_timeout,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
