//! Test fixtures
//!
//! In-memory `ChatStore` and a static identity provider so gateway behavior
//! can be exercised deterministically, without PostgreSQL or a real token
//! issuer.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rtc_core::entities::{ChatMembership, ChatRoom, Identity, Message, MessageRead};
use rtc_core::error::DomainError;
use rtc_core::traits::{ChatStore, IdentityError, IdentityProvider, StoreResult};
use rtc_core::value_objects::{MessageId, RoomId, UserId};

#[derive(Default)]
struct MemoryState {
    rooms: HashMap<RoomId, ChatRoom>,
    dm_keys: HashMap<String, RoomId>,
    memberships: HashMap<(RoomId, UserId), ChatMembership>,
    messages: HashMap<MessageId, Message>,
    reads: HashMap<(MessageId, UserId), MessageRead>,
}

/// In-memory `ChatStore`
///
/// All state sits behind one mutex, so `create_direct_room` is naturally
/// serialized: the lookup and the insert happen in a single critical section
/// and concurrent callers for the same pair always converge on one room.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    /// When set, every store call fails; exercises the fail-closed paths
    fail: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent store call fail
    pub fn set_failing(&self, failing: bool) {
        *self.fail.lock() = failing;
    }

    fn check_failure(&self) -> StoreResult<()> {
        if *self.fail.lock() {
            Err(DomainError::Database("injected failure".into()))
        } else {
            Ok(())
        }
    }

    /// Seed a group room with the given members
    pub fn seed_group_room(&self, created_by: UserId, members: &[UserId]) -> RoomId {
        let room = ChatRoom::new_group(RoomId::generate(), created_by);
        let room_id = room.id;
        let mut state = self.state.lock();
        state.rooms.insert(room_id, room);
        for user_id in members {
            state
                .memberships
                .insert((room_id, *user_id), ChatMembership::new(room_id, *user_id));
        }
        room_id
    }

    /// Number of persisted messages
    pub fn message_count(&self) -> usize {
        self.state.lock().messages.len()
    }

    /// Number of rooms
    pub fn room_count(&self) -> usize {
        self.state.lock().rooms.len()
    }

    /// Look up a read receipt
    pub fn read_receipt(&self, message_id: MessageId, user_id: UserId) -> Option<MessageRead> {
        self.state.lock().reads.get(&(message_id, user_id)).cloned()
    }

    /// Number of read-receipt rows
    pub fn read_count(&self) -> usize {
        self.state.lock().reads.len()
    }

    /// Look up a membership row
    pub fn membership_row(&self, room_id: RoomId, user_id: UserId) -> Option<ChatMembership> {
        self.state
            .lock()
            .memberships
            .get(&(room_id, user_id))
            .cloned()
    }
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> StoreResult<Option<ChatMembership>> {
        self.check_failure()?;
        Ok(self
            .state
            .lock()
            .memberships
            .get(&(room_id, user_id))
            .cloned())
    }

    async fn rooms_for_user(&self, user_id: UserId) -> StoreResult<Vec<RoomId>> {
        self.check_failure()?;
        Ok(self
            .state
            .lock()
            .memberships
            .keys()
            .filter(|(_, uid)| *uid == user_id)
            .map(|(rid, _)| *rid)
            .collect())
    }

    async fn room_by_id(&self, room_id: RoomId) -> StoreResult<Option<ChatRoom>> {
        self.check_failure()?;
        Ok(self.state.lock().rooms.get(&room_id).cloned())
    }

    async fn member_count(&self, room_id: RoomId) -> StoreResult<i64> {
        self.check_failure()?;
        let count = self
            .state
            .lock()
            .memberships
            .keys()
            .filter(|(rid, _)| *rid == room_id)
            .count();
        Ok(count as i64)
    }

    async fn insert_room(&self, room: &ChatRoom) -> StoreResult<()> {
        self.check_failure()?;
        self.state.lock().rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn insert_memberships(&self, room_id: RoomId, user_ids: &[UserId]) -> StoreResult<()> {
        self.check_failure()?;
        let mut state = self.state.lock();
        for user_id in user_ids {
            state
                .memberships
                .entry((room_id, *user_id))
                .or_insert_with(|| ChatMembership::new(room_id, *user_id));
        }
        Ok(())
    }

    async fn create_direct_room(&self, room: &ChatRoom, other: UserId) -> StoreResult<RoomId> {
        self.check_failure()?;
        let dm_key = ChatRoom::direct_key(room.created_by, other);
        let mut state = self.state.lock();

        if let Some(existing) = state.dm_keys.get(&dm_key) {
            return Ok(*existing);
        }

        let room_id = room.id;
        state.rooms.insert(room_id, room.clone());
        state.dm_keys.insert(dm_key, room_id);
        for user_id in [room.created_by, other] {
            state
                .memberships
                .insert((room_id, user_id), ChatMembership::new(room_id, user_id));
        }
        Ok(room_id)
    }

    async fn insert_message(&self, message: &Message) -> StoreResult<()> {
        self.check_failure()?;
        self.state
            .lock()
            .messages
            .insert(message.id, message.clone());
        Ok(())
    }

    async fn upsert_message_read(&self, read: &MessageRead) -> StoreResult<()> {
        self.check_failure()?;
        self.state
            .lock()
            .reads
            .insert((read.message_id, read.user_id), read.clone());
        Ok(())
    }

    async fn update_membership_last_seen(
        &self,
        room_id: RoomId,
        user_id: UserId,
        seen_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.check_failure()?;
        if let Some(membership) = self.state.lock().memberships.get_mut(&(room_id, user_id)) {
            membership.last_seen_at = Some(seen_at);
        }
        Ok(())
    }

    async fn message_by_id(&self, message_id: MessageId) -> StoreResult<Option<Message>> {
        self.check_failure()?;
        Ok(self.state.lock().messages.get(&message_id).cloned())
    }
}

/// Identity provider backed by a fixed token table
#[derive(Default)]
pub struct StaticIdentityProvider {
    tokens: Mutex<HashMap<String, Identity>>,
}

impl StaticIdentityProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a token for a user and return the token
    pub fn register(&self, user_id: UserId) -> String {
        let token = format!("token-{user_id}");
        self.tokens
            .lock()
            .insert(token.clone(), Identity::new(user_id, None));
        token
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Identity, IdentityError> {
        self.tokens
            .lock()
            .get(token)
            .cloned()
            .ok_or(IdentityError::InvalidToken)
    }
}
