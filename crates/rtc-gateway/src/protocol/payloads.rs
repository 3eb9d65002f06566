//! Wire payload structures
//!
//! Field names are camelCase on the wire; missing required fields fail
//! deserialization and surface as validation errors.

use chrono::{DateTime, Utc};
use rtc_core::entities::Message;
use rtc_core::value_objects::{MessageId, RoomId, UserId};
use serde::{Deserialize, Serialize};

// === Client → server payloads ===

/// `rooms:join` / `rooms:leave` payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub room_id: RoomId,
}

/// `rooms:dm:ensure` payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmEnsurePayload {
    pub other_user_id: UserId,
}

/// `typing` payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    pub room_id: RoomId,
    pub is_typing: bool,
}

/// `messages:send` payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub room_id: RoomId,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    /// Client-chosen correlation id, echoed back in `messages:new`
    #[serde(default)]
    pub client_id: Option<String>,
}

/// `messages:seen` payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeenPayload {
    pub room_id: RoomId,
    pub message_id: MessageId,
}

// === Server → client payloads ===

/// `presence:state` payload, sent once per new connection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceStatePayload {
    pub online_user_ids: Vec<UserId>,
}

/// `presence:update` payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceUpdatePayload {
    pub user_id: UserId,
    pub online: bool,
}

/// `rooms:joined` / `rooms:left` payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomEchoPayload {
    pub room_id: RoomId,
}

/// `typing` broadcast payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingBroadcastPayload {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub is_typing: bool,
}

/// `messages:new` payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageNewPayload {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender_id: UserId,
    pub content: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub seen: bool,
    pub client_id: Option<String>,
}

impl MessageNewPayload {
    /// Build the broadcast payload from a persisted message
    pub fn from_message(message: &Message, client_id: Option<String>) -> Self {
        Self {
            id: message.id,
            room_id: message.room_id,
            sender_id: message.sender_id,
            content: message.content.clone(),
            file_url: message.file_url.clone(),
            created_at: message.created_at,
            seen: message.seen,
            client_id,
        }
    }
}

/// `messages:seen` broadcast payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSeenPayload {
    pub room_id: RoomId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub read_at: DateTime<Utc>,
}

/// `rooms:dm:ensure` acknowledgment payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DmRoomPayload {
    pub room_id: RoomId,
}

/// Error acknowledgment payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AckErrorPayload {
    pub code: &'static str,
    pub message: String,
}
