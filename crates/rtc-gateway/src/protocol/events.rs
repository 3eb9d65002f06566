//! Event names for the wire protocol

use std::fmt;

/// Client → server event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEventType {
    /// Attach to a room group
    RoomsJoin,
    /// Detach from a room group
    RoomsLeave,
    /// Resolve (or create) the direct room with another user
    RoomsDmEnsure,
    /// Typing indicator
    Typing,
    /// Send a message into a room
    MessagesSend,
    /// Mark a message as read
    MessagesSeen,
}

impl ClientEventType {
    /// Parse a wire event name. Unknown names return `None` and are dropped
    /// by the dispatcher.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rooms:join" => Some(Self::RoomsJoin),
            "rooms:leave" => Some(Self::RoomsLeave),
            "rooms:dm:ensure" => Some(Self::RoomsDmEnsure),
            "typing" => Some(Self::Typing),
            "messages:send" => Some(Self::MessagesSend),
            "messages:seen" => Some(Self::MessagesSeen),
            _ => None,
        }
    }

    /// Wire name of this event
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoomsJoin => "rooms:join",
            Self::RoomsLeave => "rooms:leave",
            Self::RoomsDmEnsure => "rooms:dm:ensure",
            Self::Typing => "typing",
            Self::MessagesSend => "messages:send",
            Self::MessagesSeen => "messages:seen",
        }
    }
}

impl fmt::Display for ClientEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Server → client event names
pub mod server_events {
    pub const PRESENCE_STATE: &str = "presence:state";
    pub const PRESENCE_UPDATE: &str = "presence:update";
    pub const ROOMS_JOINED: &str = "rooms:joined";
    pub const ROOMS_LEFT: &str = "rooms:left";
    pub const TYPING: &str = "typing";
    pub const MESSAGES_NEW: &str = "messages:new";
    pub const MESSAGES_SEEN: &str = "messages:seen";
    pub const ACK: &str = "ack";
}
