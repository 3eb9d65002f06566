//! Individual WebSocket connection
//!
//! Represents a single authenticated WebSocket connection and its state. The
//! caller's identity is fixed at handshake time and never changes for the
//! lifetime of the connection.

use std::collections::HashSet;
use std::sync::Arc;

use rtc_core::value_objects::{ConnectionId, RoomId, UserId};
use tokio::sync::{mpsc, RwLock};

use crate::protocol::ServerMessage;

/// A single authenticated WebSocket connection
pub struct Connection {
    /// Unique connection id
    id: ConnectionId,

    /// Authenticated user, resolved before the upgrade
    user_id: UserId,

    /// Optional email from the resolved identity
    email: Option<String>,

    /// Channel to send messages to the WebSocket
    sender: mpsc::Sender<ServerMessage>,

    /// Room groups this connection is attached to
    rooms: RwLock<HashSet<RoomId>>,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        id: ConnectionId,
        user_id: UserId,
        email: Option<String>,
        sender: mpsc::Sender<ServerMessage>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            user_id,
            email,
            sender,
            rooms: RwLock::new(HashSet::new()),
        })
    }

    /// Get the connection id
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Get the authenticated user id
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Get the email from the resolved identity, if any
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Attach to a room group
    pub async fn join_room(&self, room_id: RoomId) {
        self.rooms.write().await.insert(room_id);
    }

    /// Detach from a room group
    pub async fn leave_room(&self, room_id: RoomId) {
        self.rooms.write().await.remove(&room_id);
    }

    /// Get all attached room groups
    pub async fn rooms(&self) -> Vec<RoomId> {
        self.rooms.read().await.iter().copied().collect()
    }

    /// Check if attached to a room group
    pub async fn is_in_room(&self, room_id: RoomId) -> bool {
        self.rooms.read().await.contains(&room_id)
    }

    /// Send a message to this connection
    pub async fn send(
        &self,
        message: ServerMessage,
    ) -> Result<(), mpsc::error::SendError<ServerMessage>> {
        self.sender.send(message).await
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .finish()
    }
}
