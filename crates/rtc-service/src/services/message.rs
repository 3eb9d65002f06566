//! Message relay service
//!
//! Persists messages and read receipts. Authorization runs before any write,
//! through the membership authority; fan-out to live connections is the
//! gateway's job and happens only after these calls succeed.

use rtc_core::entities::{Message, MessageRead};
use rtc_core::error::DomainError;
use rtc_core::traits::ChatStore;
use rtc_core::value_objects::{MessageId, RoomId, UserId};
use tracing::debug;

use super::error::{ServiceError, ServiceResult};
use super::membership::MembershipService;

/// Handles message persistence and receipt bookkeeping
pub struct MessageService;

impl MessageService {
    /// Validate and persist a message from `sender` into `room_id`.
    ///
    /// The body must carry exactly one of text content and a file url; empty
    /// and whitespace-only values count as absent.
    pub async fn send_message(
        store: &dyn ChatStore,
        room_id: RoomId,
        sender: UserId,
        content: Option<String>,
        file_url: Option<String>,
    ) -> ServiceResult<Message> {
        let content = content.filter(|c| !c.trim().is_empty());
        let file_url = file_url.filter(|u| !u.trim().is_empty());
        match (&content, &file_url) {
            (None, None) => {
                return Err(ServiceError::Validation(
                    "message requires content or a file url".into(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(ServiceError::Validation(
                    "message carries either content or a file url, not both".into(),
                ));
            }
            _ => {}
        }

        MembershipService::assert_member(store, room_id, sender).await?;

        let message = Message::new(MessageId::generate(), room_id, sender, content, file_url);
        store.insert_message(&message).await?;
        debug!(message_id = %message.id, room_id = %room_id, "Message persisted");
        Ok(message)
    }

    /// Record that `user_id` has read `message_id` in `room_id`.
    ///
    /// Idempotent: repeated calls refresh the receipt timestamp and the
    /// caller's `last_seen_at` without duplicating rows.
    pub async fn mark_seen(
        store: &dyn ChatStore,
        room_id: RoomId,
        user_id: UserId,
        message_id: MessageId,
    ) -> ServiceResult<MessageRead> {
        MembershipService::assert_member(store, room_id, user_id).await?;

        let message = store
            .message_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;
        if message.room_id != room_id {
            return Err(DomainError::MessageNotFound(message_id).into());
        }

        let read = MessageRead::new(message_id, user_id);
        store.upsert_message_read(&read).await?;
        store
            .update_membership_last_seen(room_id, user_id, read.read_at)
            .await?;
        Ok(read)
    }
}
