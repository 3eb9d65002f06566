//! Message handlers
//!
//! Persist first, fan out second: a broadcast only ever announces a message
//! or receipt the store has already accepted.

use std::sync::Arc;

use rtc_service::MessageService;
use serde_json::Value;

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::{
    MessageNewPayload, MessageSeenPayload, SeenPayload, SendMessagePayload, ServerMessage,
};
use crate::server::GatewayState;

/// Handles `messages:send` and `messages:seen`
pub struct MessagesHandler;

impl MessagesHandler {
    /// Persist a message and broadcast it to the whole room group, sender
    /// included. The client's correlation id is echoed untouched.
    pub async fn handle_send(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: SendMessagePayload,
    ) -> HandlerResult<Value> {
        let message = MessageService::send_message(
            state.service_context().store(),
            payload.room_id,
            connection.user_id(),
            payload.content,
            payload.file_url,
        )
        .await?;

        let broadcast = ServerMessage::messages_new(&message, payload.client_id.clone());
        state
            .connection_manager()
            .send_to_room(message.room_id, broadcast, None)
            .await;

        tracing::debug!(
            message_id = %message.id,
            room_id = %message.room_id,
            "Message relayed"
        );

        Ok(
            serde_json::to_value(MessageNewPayload::from_message(&message, payload.client_id))
                .unwrap_or_default(),
        )
    }

    /// Record a read receipt and announce it to the room group
    pub async fn handle_seen(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: SeenPayload,
    ) -> HandlerResult<Value> {
        let read = MessageService::mark_seen(
            state.service_context().store(),
            payload.room_id,
            connection.user_id(),
            payload.message_id,
        )
        .await?;

        let broadcast = ServerMessage::messages_seen(
            payload.room_id,
            read.message_id,
            read.user_id,
            read.read_at,
        );
        state
            .connection_manager()
            .send_to_room(payload.room_id, broadcast, None)
            .await;

        Ok(serde_json::to_value(MessageSeenPayload {
            room_id: payload.room_id,
            message_id: read.message_id,
            user_id: read.user_id,
            read_at: read.read_at,
        })
        .unwrap_or_default())
    }
}
