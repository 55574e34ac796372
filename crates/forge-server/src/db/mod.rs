//! Database access layer
//!
//! Pool construction plus the persistence collaborators the HTTP handlers
//! delegate to. Each submodule owns the SQL for one entity; handlers never
//! embed queries themselves.

use forge_common::ForgeError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

pub mod memberships;
pub mod organizations;
pub mod users;

/// Build the shared connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> forge_common::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| ForgeError::Database(e.to_string()))
}
