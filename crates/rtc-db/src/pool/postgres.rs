//! PostgreSQL connection pool

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Acquire wait bound; a saturated pool fails the caller instead of
/// stalling it indefinitely.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pool sizing for the durable store connection
///
/// The values come from `rtc_common::DatabaseConfig`; this struct carries
/// only what the pool itself needs.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Upper bound on open connections
    pub max_connections: u32,
    /// Connections kept warm between bursts
    pub min_connections: u32,
}

/// Open a connection pool against the configured database
pub async fn create_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.url)
        .await
}
