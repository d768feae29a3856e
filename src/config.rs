//! Configuration with validation at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use quote_core::ValidationRules;
use quote_core::validation::RulesError;
use secrecy::{ExposeSecret, SecretString};

/// Environment name that enables error detail in 5xx responses.
const DEVELOPMENT_ENVIRONMENT: &str = "development";

/// Quote intake service configuration.
///
/// All values can be set via environment variables or CLI arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "quote-service", about = "Life-insurance quote intake service")]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "HTTP_ADDRESS", default_value = "0.0.0.0:3000")]
    pub http_address: String,

    /// CORS allowed origins (comma-separated, or "*" for any)
    #[arg(long, env = "CORS_ALLOW_ORIGINS")]
    pub cors_allow_origins: Option<String>,

    /// Database connection URL (in-memory store when unset)
    #[arg(long, env = "DB_URL")]
    pub db_url: Option<String>,

    /// Database password (URL-encoded and inserted into DB_URL)
    #[arg(long, env = "DB_PASSWORD")]
    pub db_password: Option<SecretString>,

    /// Database pool minimum connections
    #[arg(long, env = "DB_POOL_MIN", default_value = "1")]
    pub db_pool_min: u32,

    /// Database pool maximum connections
    #[arg(long, env = "DB_POOL_MAX", default_value = "10")]
    pub db_pool_max: u32,

    /// Database connection timeout in seconds
    #[arg(long, env = "DB_CONNECT_TIMEOUT", default_value = "5")]
    pub db_connect_timeout_secs: u64,

    /// Apply embedded migrations on startup
    #[arg(long, env = "DB_RUN_MIGRATIONS", default_value = "true", action = ArgAction::Set)]
    pub db_run_migrations: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    /// Use JSON log format
    #[arg(long, env = "JSON_LOGS", default_value = "true", action = ArgAction::Set)]
    pub json_logs: bool,

    /// OpenTelemetry OTLP endpoint
    #[arg(long, env = "OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Environment name (e.g., "production", "development")
    #[arg(long, env = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    /// YAML file overriding the default validation rules
    #[arg(long, env = "VALIDATION_RULES_PATH")]
    pub validation_rules_path: Option<PathBuf>,
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid HTTP address: {0}")]
    InvalidHttpAddress(String),
    #[error("Database pool max ({max}) must be >= min ({min})")]
    InvalidPoolSize { min: u32, max: u32 },
    #[error("Database connect timeout must be > 0")]
    InvalidConnectTimeout,
    #[error("Request timeout must be > 0")]
    InvalidRequestTimeout,
    #[error(transparent)]
    Rules(#[from] RulesError),
}

impl Config {
    /// Parse and validate configuration.
    pub fn init() -> anyhow::Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.http_address()?;
        if self.db_pool_max < self.db_pool_min {
            return Err(ConfigError::InvalidPoolSize {
                min: self.db_pool_min,
                max: self.db_pool_max,
            });
        }
        if self.db_connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidConnectTimeout);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout);
        }
        Ok(())
    }

    /// Parsed listen address.
    pub fn http_address(&self) -> Result<SocketAddr, ConfigError> {
        self.http_address
            .parse()
            .map_err(|_| ConfigError::InvalidHttpAddress(self.http_address.clone()))
    }

    /// Get database connection timeout as Duration.
    #[inline]
    #[must_use]
    pub const fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout_secs)
    }

    #[inline]
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the database URL with password substitution.
    #[must_use]
    pub fn database_url(&self) -> Option<String> {
        let url = self.db_url.as_deref()?;
        Some(match &self.db_password {
            Some(password) => {
                let encoded = urlencoding::encode(password.expose_secret());
                url.replacen(":@", &format!(":{encoded}@"), 1)
            }
            None => url.to_string(),
        })
    }

    /// Whether 5xx responses carry the underlying error detail.
    #[must_use]
    pub fn expose_error_details(&self) -> bool {
        self.environment
            .as_deref()
            .is_some_and(|env| env.trim().eq_ignore_ascii_case(DEVELOPMENT_ENVIRONMENT))
    }

    /// Load validation rules from `VALIDATION_RULES_PATH`, or the defaults.
    pub fn validation_rules(&self) -> Result<ValidationRules, ConfigError> {
        match &self.validation_rules_path {
            Some(path) => Ok(ValidationRules::from_yaml_file(path)?),
            None => Ok(ValidationRules::default()),
        }
    }
}
