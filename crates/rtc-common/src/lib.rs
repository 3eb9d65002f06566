//! # rtc-common
//!
//! Shared utilities including configuration, error handling, identity
//! resolution, and telemetry.

pub mod config;
pub mod error;
pub mod identity;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, JwtConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use identity::{Claims, JwtIdentityProvider};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
