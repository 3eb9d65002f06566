//! Connection manager
//!
//! Manages all active WebSocket connections using DashMap for thread-safe
//! access. Room groups are the fan-out unit: a connection only receives room
//! events while attached to the room's group.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use rtc_core::value_objects::{ConnectionId, RoomId, UserId};
use tokio::sync::mpsc;

use super::Connection;
use crate::protocol::ServerMessage;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by connection id
    connections: DashMap<ConnectionId, Arc<Connection>>,

    /// User id to connection ids mapping
    user_connections: DashMap<UserId, HashSet<ConnectionId>>,

    /// Room id to attached connection ids mapping
    room_connections: DashMap<RoomId, HashSet<ConnectionId>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_connections: DashMap::new(),
            room_connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new authenticated connection
    pub fn add_connection(
        &self,
        id: ConnectionId,
        user_id: UserId,
        email: Option<String>,
        sender: mpsc::Sender<ServerMessage>,
    ) -> Arc<Connection> {
        let connection = Connection::new(id, user_id, email, sender);
        self.connections.insert(id, connection.clone());
        self.user_connections.entry(user_id).or_default().insert(id);

        tracing::debug!(connection_id = %id, user_id = %user_id, "Connection added");

        connection
    }

    /// Remove a connection
    ///
    /// Uses `alter` for atomic modify-and-cleanup operations to avoid TOCTOU
    /// race conditions.
    pub async fn remove_connection(&self, id: ConnectionId) {
        if let Some((_, connection)) = self.connections.remove(&id) {
            let user_id = connection.user_id();
            self.user_connections.alter(&user_id, |_, mut conns| {
                conns.remove(&id);
                conns
            });
            self.user_connections.retain(|_, conns| !conns.is_empty());

            for room_id in connection.rooms().await {
                self.room_connections.alter(&room_id, |_, mut conns| {
                    conns.remove(&id);
                    conns
                });
            }
            self.room_connections.retain(|_, conns| !conns.is_empty());

            tracing::debug!(connection_id = %id, "Connection removed");
        }
    }

    /// Get a connection by id
    pub fn get_connection(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.connections.get(&id).map(|r| r.clone())
    }

    /// Attach a connection to a room group
    pub async fn join_room(&self, id: ConnectionId, room_id: RoomId) -> bool {
        if let Some(connection) = self.connections.get(&id) {
            connection.join_room(room_id).await;
            self.room_connections.entry(room_id).or_default().insert(id);

            tracing::trace!(
                connection_id = %id,
                room_id = %room_id,
                "Connection attached to room"
            );

            true
        } else {
            false
        }
    }

    /// Detach a connection from a room group
    pub async fn leave_room(&self, id: ConnectionId, room_id: RoomId) -> bool {
        if let Some(connection) = self.connections.get(&id) {
            connection.leave_room(room_id).await;

            self.room_connections.alter(&room_id, |_, mut conns| {
                conns.remove(&id);
                conns
            });
            self.room_connections.retain(|_, conns| !conns.is_empty());

            tracing::trace!(
                connection_id = %id,
                room_id = %room_id,
                "Connection detached from room"
            );

            true
        } else {
            false
        }
    }

    /// Get all connections for a user
    pub fn get_user_connections(&self, user_id: UserId) -> Vec<Arc<Connection>> {
        self.user_connections
            .get(&user_id)
            .map(|conns| {
                conns
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get all connections attached to a room group
    pub fn get_room_connections(&self, room_id: RoomId) -> Vec<Arc<Connection>> {
        self.room_connections
            .get(&room_id)
            .map(|conns| {
                conns
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Send a message to all connections in a room group
    ///
    /// `exclude` skips a single connection, used for typing fan-out where the
    /// sender must not hear itself.
    pub async fn send_to_room(
        &self,
        room_id: RoomId,
        message: ServerMessage,
        exclude: Option<ConnectionId>,
    ) -> usize {
        let connections = self.get_room_connections(room_id);
        let mut sent = 0;

        for conn in connections {
            if Some(conn.id()) == exclude {
                continue;
            }

            if conn.send(message.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(room_id = %room_id, sent = sent, "Message sent to room connections");

        sent
    }

    /// Broadcast a message to all connections
    pub async fn broadcast(&self, message: ServerMessage) -> usize {
        let mut sent = 0;

        for entry in self.connections.iter() {
            if entry.send(message.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::debug!(sent = sent, "Message broadcast to all connections");

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of users with at least one connection
    pub fn user_count(&self) -> usize {
        self.user_connections.len()
    }

    /// Get the number of room groups with attached connections
    pub fn room_count(&self) -> usize {
        self.room_connections.len()
    }

    /// Check if a connection exists
    pub fn has_connection(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    /// Clean up connections whose outbound channel is closed
    pub async fn cleanup_closed_connections(&self) -> usize {
        let closed: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|r| r.is_closed())
            .map(|r| *r.key())
            .collect();

        let count = closed.len();

        for id in closed {
            self.remove_connection(id).await;
        }

        if count > 0 {
            tracing::info!(count = count, "Cleaned up closed connections");
        }

        count
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("users", &self.user_connections.len())
            .field("rooms", &self.room_connections.len())
            .finish()
    }
}
