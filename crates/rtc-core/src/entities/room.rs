//! Room entity - a named scope that gates who may exchange messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{RoomId, UserId};

/// Room type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Two-person direct-message room; exactly two members for its lifetime
    Private,
    /// N-person group room
    #[default]
    Group,
}

impl RoomType {
    /// Get the string value stored in the database
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
        }
    }
}

impl From<&str> for RoomType {
    fn from(value: &str) -> Self {
        match value {
            "private" => Self::Private,
            // Default for "group" and unknown values
            _ => Self::Group,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat room entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoom {
    pub id: RoomId,
    pub room_type: RoomType,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl ChatRoom {
    /// Create a new private (direct-message) room
    pub fn new_private(id: RoomId, created_by: UserId) -> Self {
        Self {
            id,
            room_type: RoomType::Private,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Create a new group room
    pub fn new_group(id: RoomId, created_by: UserId) -> Self {
        Self {
            id,
            room_type: RoomType::Group,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Check if this is a private (direct-message) room
    #[inline]
    pub fn is_private(&self) -> bool {
        self.room_type == RoomType::Private
    }

    /// Canonical order-independent key for the private room between two users.
    ///
    /// The same key comes out regardless of argument order, which is what the
    /// store's uniqueness constraint hangs off to keep the pair's direct room
    /// unique under concurrent creation.
    #[must_use]
    pub fn direct_key(a: UserId, b: UserId) -> String {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        format!("{lo}:{hi}")
    }
}
