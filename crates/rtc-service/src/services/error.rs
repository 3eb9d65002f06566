//! Service layer errors

use rtc_core::error::DomainError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors produced by the service layer
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable machine-readable error code for the wire protocol
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller lacked permission for the operation
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Domain(DomainError::Forbidden))
    }
}
