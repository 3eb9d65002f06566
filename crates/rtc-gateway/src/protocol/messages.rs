//! Wire envelope format
//!
//! All WebSocket traffic is JSON text frames wrapped in a `{event, data, ack}`
//! envelope. The `ack` id is chosen by the client; the server only echoes it
//! back on acknowledgment replies.

use chrono::{DateTime, Utc};
use rtc_core::entities::Message;
use rtc_core::value_objects::{MessageId, RoomId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::events::server_events;
use super::payloads::{
    AckErrorPayload, MessageNewPayload, MessageSeenPayload, PresenceStatePayload,
    PresenceUpdatePayload, RoomEchoPayload, TypingBroadcastPayload,
};
use super::ClientEventType;

/// Envelope for client → server frames
#[derive(Debug, Clone, Deserialize)]
pub struct ClientMessage {
    /// Event name
    pub event: String,

    /// Event payload
    #[serde(default)]
    pub data: Value,

    /// Optional acknowledgment id chosen by the client
    #[serde(default)]
    pub ack: Option<u64>,
}

impl ClientMessage {
    /// Resolve the event name, `None` for unknown events
    #[must_use]
    pub fn event_type(&self) -> Option<ClientEventType> {
        ClientEventType::from_name(&self.event)
    }

    /// Deserialize the payload into the event's expected shape
    pub fn payload<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }

    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Envelope for server → client frames
#[derive(Debug, Clone, Serialize)]
pub struct ServerMessage {
    /// Event name
    pub event: &'static str,

    /// Event payload
    pub data: Value,

    /// Acknowledgment id, set only on `ack` replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ack: Option<u64>,
}

impl ServerMessage {
    fn event(event: &'static str, data: impl Serialize) -> Self {
        Self {
            event,
            data: serde_json::to_value(data).unwrap_or_default(),
            ack: None,
        }
    }

    /// One-time presence snapshot for a new connection
    #[must_use]
    pub fn presence_state(online_user_ids: Vec<UserId>) -> Self {
        Self::event(
            server_events::PRESENCE_STATE,
            PresenceStatePayload { online_user_ids },
        )
    }

    /// Presence edge announcement
    #[must_use]
    pub fn presence_update(user_id: UserId, online: bool) -> Self {
        Self::event(
            server_events::PRESENCE_UPDATE,
            PresenceUpdatePayload { user_id, online },
        )
    }

    /// Room attachment confirmation, caller only
    #[must_use]
    pub fn rooms_joined(room_id: RoomId) -> Self {
        Self::event(server_events::ROOMS_JOINED, RoomEchoPayload { room_id })
    }

    /// Room detachment confirmation, caller only
    #[must_use]
    pub fn rooms_left(room_id: RoomId) -> Self {
        Self::event(server_events::ROOMS_LEFT, RoomEchoPayload { room_id })
    }

    /// Typing indicator broadcast
    #[must_use]
    pub fn typing(room_id: RoomId, user_id: UserId, is_typing: bool) -> Self {
        Self::event(
            server_events::TYPING,
            TypingBroadcastPayload {
                room_id,
                user_id,
                is_typing,
            },
        )
    }

    /// New message broadcast, `client_id` echoed for sender-side correlation
    #[must_use]
    pub fn messages_new(message: &Message, client_id: Option<String>) -> Self {
        Self::event(
            server_events::MESSAGES_NEW,
            MessageNewPayload::from_message(message, client_id),
        )
    }

    /// Read receipt broadcast
    #[must_use]
    pub fn messages_seen(
        room_id: RoomId,
        message_id: MessageId,
        user_id: UserId,
        read_at: DateTime<Utc>,
    ) -> Self {
        Self::event(
            server_events::MESSAGES_SEEN,
            MessageSeenPayload {
                room_id,
                message_id,
                user_id,
                read_at,
            },
        )
    }

    /// Successful acknowledgment carrying an arbitrary payload
    #[must_use]
    pub fn ack_ok(ack: u64, data: Value) -> Self {
        Self {
            event: server_events::ACK,
            data,
            ack: Some(ack),
        }
    }

    /// Error acknowledgment
    #[must_use]
    pub fn ack_error(ack: u64, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            event: server_events::ACK,
            data: serde_json::to_value(AckErrorPayload {
                code,
                message: message.into(),
            })
            .unwrap_or_default(),
            ack: Some(ack),
        }
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ack {
            Some(ack) => write!(f, "ServerMessage(event={}, ack={ack})", self.event),
            None => write!(f, "ServerMessage(event={})", self.event),
        }
    }
}
