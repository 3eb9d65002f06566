//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{MessageId, RoomId, UserId};

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a member of this room")]
    Forbidden,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot open a direct-message room with yourself")]
    SelfDirectMessage,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    Database(String),
}

impl DomainError {
    /// Get an error code string for wire responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::RoomNotFound(_) | Self::MessageNotFound(_) | Self::UserNotFound(_) => {
                "NOT_FOUND"
            }
            Self::Forbidden => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::SelfDirectMessage => "SELF_DM",
            Self::Database(_) => "STORE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound(_) | Self::MessageNotFound(_) | Self::UserNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::SelfDirectMessage)
    }
}
