//! `PostgreSQL` adapters for intern record persistence.

mod config;
mod models;
mod repository;
mod schema;

pub use config::{
    ConfigError, DATABASE_URL_ENV, POOL_MAX_SIZE_ENV, POOL_TIMEOUT_SECS_ENV, PostgresConfig,
};
pub use repository::{InternPgPool, PostgresInternRepository};
