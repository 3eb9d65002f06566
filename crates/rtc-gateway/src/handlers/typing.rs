//! Typing indicator handler

use std::sync::Arc;

use rtc_service::MembershipService;
use serde_json::Value;

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::{ServerMessage, TypingPayload};
use crate::server::GatewayState;

/// Handles `typing`
pub struct TypingHandler;

impl TypingHandler {
    /// Fan a typing indicator out to the room group, excluding the sender's
    /// own connection. Nothing is persisted.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: TypingPayload,
    ) -> HandlerResult<Value> {
        MembershipService::assert_member(
            state.service_context().store(),
            payload.room_id,
            connection.user_id(),
        )
        .await?;

        let message =
            ServerMessage::typing(payload.room_id, connection.user_id(), payload.is_typing);
        state
            .connection_manager()
            .send_to_room(payload.room_id, message, Some(connection.id()))
            .await;

        Ok(Value::Null)
    }
}
