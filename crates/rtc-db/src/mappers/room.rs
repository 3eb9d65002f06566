//! ChatRoom entity <-> model mapper

use rtc_core::entities::{ChatRoom, RoomType};
use rtc_core::value_objects::{RoomId, UserId};

use crate::models::RoomModel;

impl From<RoomModel> for ChatRoom {
    fn from(model: RoomModel) -> Self {
        ChatRoom {
            id: RoomId::new(model.id),
            room_type: RoomType::from(model.room_type.as_str()),
            created_by: UserId::new(model.created_by),
            created_at: model.created_at,
        }
    }
}
