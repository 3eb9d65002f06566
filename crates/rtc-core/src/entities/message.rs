//! Message entity - represents a persisted chat message

use chrono::{DateTime, Utc};

use crate::value_objects::{MessageId, RoomId, UserId};

/// Message entity
///
/// Carries either text `content` or a `file_url` (at least one must be
/// present; the service layer rejects bodies with neither). Immutable after
/// creation except for receipt bookkeeping, which lives in `MessageRead`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender_id: UserId,
    pub content: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub seen: bool,
}

impl Message {
    /// Create a new Message
    pub fn new(
        id: MessageId,
        room_id: RoomId,
        sender_id: UserId,
        content: Option<String>,
        file_url: Option<String>,
    ) -> Self {
        Self {
            id,
            room_id,
            sender_id,
            content,
            file_url,
            created_at: Utc::now(),
            seen: false,
        }
    }

    /// Check if the message carries any body at all
    #[inline]
    pub fn has_body(&self) -> bool {
        self.content.is_some() || self.file_url.is_some()
    }

    /// Check if the message is a file attachment
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_url.is_some()
    }
}
