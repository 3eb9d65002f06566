//! # rtc-db
//!
//! Database layer implementing the `ChatStore` port with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ model mappers
//! - `PgChatStore`, the durable system of record for rooms, memberships,
//!   messages, and read receipts
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rtc_db::{create_pool, PgChatStore, PoolConfig};
//!
//! async fn example(config: PoolConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&config).await?;
//!     rtc_db::run_migrations(&pool).await?;
//!     let store = PgChatStore::new(pool);
//!
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod store;

// Re-export commonly used types
pub use pool::{create_pool, PgPool, PoolConfig};
pub use store::PgChatStore;

/// Apply the embedded SQL migrations to the target database
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
