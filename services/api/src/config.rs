//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// SMTP relay settings for outbound contact mail.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Directory holding the per-entity JSON files.
    pub data_dir: PathBuf,
    pub log_level: Level,
    /// `None` disables the mail relay entirely; contact submissions are then
    /// persisted without any outbound email attempt.
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure tests
    /// are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Storage Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:10000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load SMTP Settings (optional as a whole) ---
        // The relay is only enabled when host, user and password are all set,
        // mirroring how the service has always behaved.
        let smtp = match (
            std::env::var("SMTP_HOST").ok(),
            std::env::var("SMTP_USER").ok(),
            std::env::var("SMTP_PASS").ok(),
        ) {
            (Some(host), Some(user), Some(pass)) => {
                let port = match std::env::var("SMTP_PORT") {
                    Ok(raw) => raw.parse::<u16>().map_err(|e| {
                        ConfigError::InvalidValue("SMTP_PORT".to_string(), e.to_string())
                    })?,
                    Err(_) => 587,
                };
                Some(SmtpConfig {
                    host,
                    port,
                    user,
                    pass,
                })
            }
            _ => None,
        };

        Ok(Self {
            bind_address,
            data_dir,
            log_level,
            smtp,
        })
    }
}
