//! Application error types
//!
//! Unified error handling across the gateway binary and its wiring code.
//! Per-event errors inside WebSocket handlers use the gateway's own handler
//! error type; this one covers the handshake and startup paths.

use rtc_core::{DomainError, IdentityError};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors (handshake)
    #[error("Missing authentication")]
    MissingAuth,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get HTTP status code for this error (used when refusing a handshake)
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::MissingAuth | Self::InvalidToken | Self::TokenExpired => 401,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 500 Internal Server Error
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if matches!(e, DomainError::Forbidden) {
                    403
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for wire responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAuth | Self::InvalidToken | Self::TokenExpired => "UNAUTHENTICATED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "STORE_ERROR",
            Self::Config(_) | Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::TokenExpired => Self::TokenExpired,
            IdentityError::InvalidToken => Self::InvalidToken,
            IdentityError::Provider(msg) => Self::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
