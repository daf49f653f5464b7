/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables and
 * opens the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * | Variable                   | Default                 |
 * |----------------------------|-------------------------|
 * | `DATABASE_URL`             | `sqlite://docvault.db`  |
 * | `SECRET_KEY`               | `default_secret_key`    |
 * | `UPLOAD_FOLDER`            | `./uploads`             |
 * | `BASE_STORAGE_PATH`        | `./storage`             |
 * | `SERVER_PORT`              | `3000`                  |
 * | `CACHE_TTL_SECS`           | `300`                   |
 * | `REQUEST_TIMEOUT_SECS`     | `30`                    |
 * | `MAX_UPLOAD_BYTES`         | `10485760`              |
 * | `DATABASE_MAX_CONNECTIONS` | `5`                     |
 *
 * Unset variables fall back to their defaults; set but unparsable numeric
 * values are a `ConfigError`.
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://docvault.db";
pub const DEFAULT_SECRET_KEY: &str = "default_secret_key";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub secret_key: String,
    /// Root directory for uploaded document versions
    pub upload_dir: PathBuf,
    /// Root directory for mirrored document bodies
    pub storage_dir: PathBuf,
    pub port: u16,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            upload_dir: PathBuf::from("./uploads"),
            storage_dir: PathBuf::from("./storage"),
            port: 3000,
            cache_ttl: Duration::from_secs(300),
            request_timeout: Duration::from_secs(30),
            max_upload_bytes: 10 * 1024 * 1024,
            max_connections: 5,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            secret_key: lookup("SECRET_KEY").unwrap_or(defaults.secret_key),
            upload_dir: lookup("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            storage_dir: lookup("BASE_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            port: parse_var(&lookup, "SERVER_PORT", defaults.port)?,
            cache_ttl: Duration::from_secs(parse_var(
                &lookup,
                "CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )?),
            request_timeout: Duration::from_secs(parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            max_connections: parse_var(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::Zero("CACHE_TTL_SECS"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Zero("REQUEST_TIMEOUT_SECS"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Zero("DATABASE_MAX_CONNECTIONS"));
        }
        Ok(())
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

/// Open the connection pool and run migrations
///
/// The database file is created when missing.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
