//! ChatMembership entity <-> model mapper

use rtc_core::entities::ChatMembership;
use rtc_core::value_objects::{RoomId, UserId};

use crate::models::MembershipModel;

impl From<MembershipModel> for ChatMembership {
    fn from(model: MembershipModel) -> Self {
        ChatMembership {
            room_id: RoomId::new(model.room_id),
            user_id: UserId::new(model.user_id),
            last_seen_at: model.last_seen_at,
        }
    }
}
