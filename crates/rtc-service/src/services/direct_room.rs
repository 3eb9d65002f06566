//! Direct-message room resolver
//!
//! Resolves the single private room shared by a pair of users, creating it on
//! first use. Creation goes through the store's atomic upsert on the canonical
//! pair key, so two peers racing to open the same conversation both land in
//! one room.

use rtc_core::entities::ChatRoom;
use rtc_core::error::DomainError;
use rtc_core::traits::ChatStore;
use rtc_core::value_objects::{RoomId, UserId};
use tracing::{debug, info};

use super::error::ServiceResult;

/// Resolves pairwise private rooms
pub struct DirectRoomService;

impl DirectRoomService {
    /// Return the private room shared by `caller` and `other`, creating it
    /// if none exists yet. Talking to yourself is rejected.
    pub async fn ensure_direct_room(
        store: &dyn ChatStore,
        caller: UserId,
        other: UserId,
    ) -> ServiceResult<RoomId> {
        if caller == other {
            return Err(DomainError::SelfDirectMessage.into());
        }

        if let Some(existing) = Self::find_existing(store, caller, other).await? {
            debug!(room_id = %existing, "Reusing existing direct room");
            return Ok(existing);
        }

        let room = ChatRoom::new_private(RoomId::generate(), caller);
        let room_id = store.create_direct_room(&room, other).await?;
        info!(room_id = %room_id, "Direct room resolved");
        Ok(room_id)
    }

    /// Scan the caller's rooms for a two-member private room that also
    /// contains `other`.
    async fn find_existing(
        store: &dyn ChatStore,
        caller: UserId,
        other: UserId,
    ) -> ServiceResult<Option<RoomId>> {
        for room_id in store.rooms_for_user(caller).await? {
            let Some(room) = store.room_by_id(room_id).await? else {
                continue;
            };
            if !room.is_private() {
                continue;
            }
            // A private room shared with a third user would be malformed
            // data; skip it rather than hijack it for this pair.
            if store.member_count(room_id).await? != 2 {
                continue;
            }
            if store.membership(room_id, other).await?.is_some() {
                return Ok(Some(room_id));
            }
        }
        Ok(None)
    }
}
