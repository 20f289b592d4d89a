//! Application configuration module
//!
//! Configuration is resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults (suitable for local development)
//! 2. An optional TOML file named by `USERAUTHS_CONFIG`
//! 3. Environment variables (`DATABASE_URL`, `SERVER_PORT`, `JWT_SECRET`,
//!    `FRONTEND_URL`, `ACCESS_TOKEN_LIFETIME_SECS`,
//!    `REFRESH_TOKEN_LIFETIME_SECS`, `OTP_LIFETIME_SECS`, `BCRYPT_COST`)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Development fallback used when `JWT_SECRET` is not configured
pub const DEV_JWT_SECRET: &str = "userauths-dev-secret-change-in-production";

pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const DEFAULT_ACCESS_TOKEN_LIFETIME_SECS: i64 = 5 * 60;
pub const DEFAULT_REFRESH_TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;
pub const DEFAULT_OTP_LIFETIME_SECS: i64 = 10 * 60;
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Environment variable naming the optional TOML config file
pub const CONFIG_PATH_ENV: &str = "USERAUTHS_CONFIG";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// sqlx connection string, e.g. `sqlite:/var/lib/userauths.db?mode=rwc`
    pub database_url: String,
    /// TCP port the HTTP server binds on all interfaces
    pub server_port: u16,
    /// HMAC secret used to sign and verify JWTs
    pub jwt_secret: String,
    /// Front-end origin embedded in reset links and allowed by CORS
    pub frontend_url: String,
    pub access_token_lifetime_secs: i64,
    pub refresh_token_lifetime_secs: i64,
    /// How long a password-reset code stays redeemable
    pub otp_lifetime_secs: i64,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the optional file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let file = FileConfig::from_path(Path::new(&path))?;
            builder = builder.apply_file(file);
        }

        builder.apply_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("database_url"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if !(self.frontend_url.starts_with("http://") || self.frontend_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.frontend_url.clone()));
        }
        if self.access_token_lifetime_secs <= 0 {
            return Err(ConfigError::invalid("access_token_lifetime_secs", self.access_token_lifetime_secs));
        }
        if self.refresh_token_lifetime_secs <= 0 {
            return Err(ConfigError::invalid("refresh_token_lifetime_secs", self.refresh_token_lifetime_secs));
        }
        if self.otp_lifetime_secs <= 0 {
            return Err(ConfigError::invalid("otp_lifetime_secs", self.otp_lifetime_secs));
        }
        // bcrypt rejects costs outside 4..=31
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("bcrypt_cost", self.bcrypt_cost));
        }
        Ok(())
    }

    /// Front-end URL without a trailing slash
    pub fn frontend_base(&self) -> &str {
        self.frontend_url.trim_end_matches('/')
    }
}

/// Default on-disk SQLite location under the platform data directory
///
/// The directory is created when the database is opened, not here.
pub fn default_database_url() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("userauths");
    format!("sqlite:{}?mode=rwc", data_dir.join("userauths.db").display())
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    server_port: Option<u16>,
    jwt_secret: Option<String>,
    frontend_url: Option<String>,
    access_token_lifetime_secs: Option<i64>,
    refresh_token_lifetime_secs: Option<i64>,
    otp_lifetime_secs: Option<i64>,
    bcrypt_cost: Option<u32>,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = Some(url.into());
        self
    }

    pub fn access_token_lifetime_secs(mut self, secs: i64) -> Self {
        self.access_token_lifetime_secs = Some(secs);
        self
    }

    pub fn refresh_token_lifetime_secs(mut self, secs: i64) -> Self {
        self.refresh_token_lifetime_secs = Some(secs);
        self
    }

    pub fn otp_lifetime_secs(mut self, secs: i64) -> Self {
        self.otp_lifetime_secs = Some(secs);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Overlay values present in a parsed config file
    pub fn apply_file(mut self, file: FileConfig) -> Self {
        self.database_url = file.database_url.or(self.database_url);
        self.server_port = file.server_port.or(self.server_port);
        self.jwt_secret = file.jwt_secret.or(self.jwt_secret);
        self.frontend_url = file.frontend_url.or(self.frontend_url);
        self.access_token_lifetime_secs = file.access_token_lifetime_secs.or(self.access_token_lifetime_secs);
        self.refresh_token_lifetime_secs = file.refresh_token_lifetime_secs.or(self.refresh_token_lifetime_secs);
        self.otp_lifetime_secs = file.otp_lifetime_secs.or(self.otp_lifetime_secs);
        self.bcrypt_cost = file.bcrypt_cost.or(self.bcrypt_cost);
        self
    }

    /// Overlay values present in the process environment
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(port) = env_parse("SERVER_PORT")? {
            self.server_port = Some(port);
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.jwt_secret = Some(secret);
        }
        if let Ok(url) = std::env::var("FRONTEND_URL") {
            self.frontend_url = Some(url);
        }
        if let Some(secs) = env_parse("ACCESS_TOKEN_LIFETIME_SECS")? {
            self.access_token_lifetime_secs = Some(secs);
        }
        if let Some(secs) = env_parse("REFRESH_TOKEN_LIFETIME_SECS")? {
            self.refresh_token_lifetime_secs = Some(secs);
        }
        if let Some(secs) = env_parse("OTP_LIFETIME_SECS")? {
            self.otp_lifetime_secs = Some(secs);
        }
        if let Some(cost) = env_parse("BCRYPT_COST")? {
            self.bcrypt_cost = Some(cost);
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self.jwt_secret.unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, falling back to the development secret");
            DEV_JWT_SECRET.to_string()
        });

        let config = AppConfig {
            database_url: self.database_url.unwrap_or_else(default_database_url),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
            jwt_secret,
            frontend_url: self.frontend_url.unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            access_token_lifetime_secs: self
                .access_token_lifetime_secs
                .unwrap_or(DEFAULT_ACCESS_TOKEN_LIFETIME_SECS),
            refresh_token_lifetime_secs: self
                .refresh_token_lifetime_secs
                .unwrap_or(DEFAULT_REFRESH_TOKEN_LIFETIME_SECS),
            otp_lifetime_secs: self.otp_lifetime_secs.unwrap_or(DEFAULT_OTP_LIFETIME_SECS),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
        };
        config.validate()?;
        Ok(config)
    }
}

/// On-disk configuration file (TOML); every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database_url: Option<String>,
    pub server_port: Option<u16>,
    pub jwt_secret: Option<String>,
    pub frontend_url: Option<String>,
    pub access_token_lifetime_secs: Option<i64>,
    pub refresh_token_lifetime_secs: Option<i64>,
    pub otp_lifetime_secs: Option<i64>,
    pub bcrypt_cost: Option<u32>,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl ToString) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
        }
    }
}
