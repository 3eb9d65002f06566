//! Read receipt entity - at most one row per (message, user) pair

use chrono::{DateTime, Utc};

use crate::value_objects::{MessageId, UserId};

/// Read receipt entity
///
/// Upserted, never duplicated: repeated reads for the same pair only refresh
/// `read_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRead {
    pub message_id: MessageId,
    pub user_id: UserId,
    pub read_at: DateTime<Utc>,
}

impl MessageRead {
    /// Create a new receipt stamped with the current time
    pub fn new(message_id: MessageId, user_id: UserId) -> Self {
        Self {
            message_id,
            user_id,
            read_at: Utc::now(),
        }
    }
}
