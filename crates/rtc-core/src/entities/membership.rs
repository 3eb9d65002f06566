//! Membership entity - a user's membership in a room
//!
//! Existence of a membership row is the sole authorization predicate for all
//! room actions. Rows are inserted at room creation and updated by the
//! read-receipt flow; this core never deletes them.

use chrono::{DateTime, Utc};

use crate::value_objects::{RoomId, UserId};

/// Room membership entity (junction between user and room)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMembership {
    pub room_id: RoomId,
    pub user_id: UserId,
    /// Most recent point up to which the user has read the room
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl ChatMembership {
    /// Create a new ChatMembership
    pub fn new(room_id: RoomId, user_id: UserId) -> Self {
        Self {
            room_id,
            user_id,
            last_seen_at: None,
        }
    }

    /// Record that the user has read the room up to now
    pub fn mark_seen(&mut self, at: DateTime<Utc>) {
        self.last_seen_at = Some(at);
    }
}
