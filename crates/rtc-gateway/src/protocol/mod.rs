//! Wire protocol
//!
//! JSON envelope format, event names, and payload shapes for the WebSocket
//! protocol.

mod events;
mod messages;
mod payloads;

pub use events::{server_events, ClientEventType};
pub use messages::{ClientMessage, ServerMessage};
pub use payloads::{
    AckErrorPayload, DmEnsurePayload, DmRoomPayload, MessageNewPayload, MessageSeenPayload,
    PresenceStatePayload, PresenceUpdatePayload, RoomEchoPayload, RoomPayload, SeenPayload,
    SendMessagePayload, TypingBroadcastPayload, TypingPayload,
};
