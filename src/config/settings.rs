//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::constants::{
    DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PORT, DEFAULT_DB_USER,
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_LOGO_FETCH_TIMEOUT_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_STORAGE_DIR, MIN_JWT_SECRET_LENGTH,
};

/// Reasons the process refuses to start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable must be set")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {0} characters long")]
    JwtSecretTooShort(usize),

    #[error("{key} has an invalid value: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub storage_dir: PathBuf,
    pub logo_fetch_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage_dir", &self.storage_dir)
            .field("logo_fetch_timeout", &self.logo_fetch_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// There is no fallback signing secret: a missing or short
    /// `JWT_SECRET` is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::MissingJwtSecret)?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::JwtSecretTooShort(MIN_JWT_SECRET_LENGTH));
        }

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let port = parse_or("DB_PORT", get("DB_PORT"), DEFAULT_DB_PORT)?;
                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    get("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
                    get("DB_PASSWORD").unwrap_or_default(),
                    get("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                    port,
                    get("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
                )
            }
        };

        let server_port = parse_or(
            "SERVER_PORT",
            get("SERVER_PORT").or_else(|| get("PORT")),
            DEFAULT_SERVER_PORT,
        )?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours: parse_or(
                "JWT_EXPIRATION_HOURS",
                get("JWT_EXPIRATION_HOURS"),
                DEFAULT_JWT_EXPIRATION_HOURS,
            )?,
            server_host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            storage_dir: PathBuf::from(
                get("STORAGE_DIR").unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string()),
            ),
            logo_fetch_timeout: Duration::from_secs(parse_or(
                "LOGO_FETCH_TIMEOUT_SECS",
                get("LOGO_FETCH_TIMEOUT_SECS"),
                DEFAULT_LOGO_FETCH_TIMEOUT_SECS,
            )?),
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
