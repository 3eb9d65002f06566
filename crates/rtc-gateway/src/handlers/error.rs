//! Handler error types

use rtc_service::ServiceError;
use thiserror::Error;

/// Per-event handler error
///
/// Never terminates the connection: the dispatcher acks it when the client
/// supplied an ack id and logs it otherwise.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Payload failed to deserialize or is missing required fields
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Service-layer failure (authorization, validation, store)
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Stable error code for error acknowledgments
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "VALIDATION_ERROR",
            Self::Service(e) => e.error_code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
