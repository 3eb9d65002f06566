//! Membership authority
//!
//! Single source of truth for "may this user act in this room". Every
//! room-scoped operation funnels through [`MembershipService::assert_member`]
//! before any side effect happens. Lookups always hit the store; there is no
//! membership cache, so revocations take effect on the next operation.

use rtc_core::entities::ChatMembership;
use rtc_core::error::DomainError;
use rtc_core::traits::ChatStore;
use rtc_core::value_objects::{RoomId, UserId};
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Authorizes room-scoped operations against the membership table
pub struct MembershipService;

impl MembershipService {
    /// Assert that `user_id` is a member of `room_id`.
    ///
    /// Fails closed: a store error is reported as `Forbidden` rather than
    /// letting the caller proceed on unknown membership state.
    pub async fn assert_member(
        store: &dyn ChatStore,
        room_id: RoomId,
        user_id: UserId,
    ) -> ServiceResult<ChatMembership> {
        match store.membership(room_id, user_id).await {
            Ok(Some(membership)) => Ok(membership),
            Ok(None) => Err(DomainError::Forbidden.into()),
            Err(e) => {
                warn!(
                    room_id = %room_id,
                    user_id = %user_id,
                    error = %e,
                    "Membership lookup failed, denying access"
                );
                Err(DomainError::Forbidden.into())
            }
        }
    }

    /// Room ids the user belongs to, for join-time subscription
    pub async fn rooms_for_user(
        store: &dyn ChatStore,
        user_id: UserId,
    ) -> ServiceResult<Vec<RoomId>> {
        store
            .rooms_for_user(user_id)
            .await
            .map_err(ServiceError::from)
    }
}
