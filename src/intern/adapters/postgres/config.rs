//! Connection configuration for the `PostgreSQL` intern store.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use super::InternPgPool;

/// Environment variable holding the database URL.
pub const DATABASE_URL_ENV: &str = "INTERNHUB_DATABASE_URL";
/// Environment variable overriding the maximum pool size.
pub const POOL_MAX_SIZE_ENV: &str = "INTERNHUB_POOL_MAX_SIZE";
/// Environment variable overriding the pool checkout timeout in seconds.
pub const POOL_TIMEOUT_SECS_ENV: &str = "INTERNHUB_POOL_TIMEOUT_SECS";

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No database URL was configured.
    #[error("database URL not configured (set INTERNHUB_DATABASE_URL)")]
    MissingDatabaseUrl,

    /// A numeric override could not be parsed.
    #[error("invalid value '{value}' for {variable}")]
    InvalidNumber {
        /// Variable that held the value.
        variable: &'static str,
        /// Raw value.
        value: String,
    },

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Settings for the `PostgreSQL` connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Database connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub max_pool_size: u32,
    /// How long a checkout waits for a free connection.
    pub connection_timeout: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_pool_size: 8,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

impl PostgresConfig {
    /// Creates a configuration for `database_url` with default pool
    /// settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: Some(database_url.into()),
            ..Self::default()
        }
    }

    /// Loads the defaults and applies overrides from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric override does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Applies overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric override does
    /// not parse.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database_url = Some(url);
        }
        if let Some(raw) = lookup(POOL_MAX_SIZE_ENV) {
            self.max_pool_size = parse_number(POOL_MAX_SIZE_ENV, &raw)?;
        }
        if let Some(raw) = lookup(POOL_TIMEOUT_SECS_ENV) {
            let seconds = parse_number(POOL_TIMEOUT_SECS_ENV, &raw)?;
            self.connection_timeout = Duration::from_secs(seconds);
        }
        Ok(())
    }

    /// Builds a connection pool from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when no URL is set, or
    /// [`ConfigError::Pool`] when the pool cannot connect.
    pub fn build_pool(&self) -> Result<InternPgPool, ConfigError> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let manager = ConnectionManager::<PgConnection>::new(url);
        Ok(Pool::builder()
            .max_size(self.max_pool_size)
            .connection_timeout(self.connection_timeout)
            .build(manager)?)
    }
}

fn parse_number<T: FromStr>(variable: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        variable,
        value: raw.to_owned(),
    })
}
