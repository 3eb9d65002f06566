//! Durable store port
//!
//! The domain layer defines what it needs from the durable relational store;
//! the infrastructure layer provides the implementation. The store is the
//! system of record for rooms, memberships, messages, and read receipts.
//! Nothing here is ever cached across calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ChatMembership, ChatRoom, Message, MessageRead};
use crate::error::DomainError;
use crate::value_objects::{MessageId, RoomId, UserId};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Look up the membership row for a (room, user) pair
    async fn membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> StoreResult<Option<ChatMembership>>;

    /// List the ids of all rooms a user belongs to
    async fn rooms_for_user(&self, user_id: UserId) -> StoreResult<Vec<RoomId>>;

    /// Load a room by id
    async fn room_by_id(&self, room_id: RoomId) -> StoreResult<Option<ChatRoom>>;

    /// Count the members of a room
    async fn member_count(&self, room_id: RoomId) -> StoreResult<i64>;

    /// Insert a new room
    async fn insert_room(&self, room: &ChatRoom) -> StoreResult<()>;

    /// Insert membership rows for the given users
    async fn insert_memberships(&self, room_id: RoomId, user_ids: &[UserId]) -> StoreResult<()>;

    /// Create the private room between the room's creator and `other`,
    /// returning the id of the room that ends up existing.
    ///
    /// Must be atomic with respect to concurrent calls for the same pair:
    /// when two callers race, exactly one room is created and both receive
    /// its id. The proposed `room` (including its freshly generated id) is
    /// only used if no room for the pair exists yet.
    async fn create_direct_room(&self, room: &ChatRoom, other: UserId) -> StoreResult<RoomId>;

    /// Insert a new message
    async fn insert_message(&self, message: &Message) -> StoreResult<()>;

    /// Upsert a read receipt keyed by (message, user); repeated calls only
    /// refresh `read_at`
    async fn upsert_message_read(&self, read: &MessageRead) -> StoreResult<()>;

    /// Update the `last_seen_at` column of a membership row
    async fn update_membership_last_seen(
        &self,
        room_id: RoomId,
        user_id: UserId,
        seen_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Load a message by id
    async fn message_by_id(&self, message_id: MessageId) -> StoreResult<Option<Message>>;
}
