//! Message entity <-> model mapper

use rtc_core::entities::Message;
use rtc_core::value_objects::{MessageId, RoomId, UserId};

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: MessageId::new(model.id),
            room_id: RoomId::new(model.room_id),
            sender_id: UserId::new(model.sender_id),
            content: model.content,
            file_url: model.file_url,
            created_at: model.created_at,
            seen: model.seen,
        }
    }
}
