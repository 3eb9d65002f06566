//! Room group handlers
//!
//! Attaching to a room group is what routes that room's events to a
//! connection; membership alone carries no live traffic.

use std::sync::Arc;

use rtc_service::MembershipService;
use serde_json::Value;

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::{RoomEchoPayload, RoomPayload, ServerMessage};
use crate::server::GatewayState;

/// Handles `rooms:join` and `rooms:leave`
pub struct RoomsHandler;

impl RoomsHandler {
    /// Attach the connection to a room group after the membership gate
    pub async fn handle_join(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: RoomPayload,
    ) -> HandlerResult<Value> {
        MembershipService::assert_member(
            state.service_context().store(),
            payload.room_id,
            connection.user_id(),
        )
        .await?;

        state
            .connection_manager()
            .join_room(connection.id(), payload.room_id)
            .await;

        // Confirmation goes to the caller only.
        connection
            .send(ServerMessage::rooms_joined(payload.room_id))
            .await
            .map_err(|e| HandlerError::Internal(e.to_string()))?;

        tracing::debug!(
            connection_id = %connection.id(),
            room_id = %payload.room_id,
            "Connection joined room group"
        );

        Ok(serde_json::to_value(RoomEchoPayload {
            room_id: payload.room_id,
        })
        .unwrap_or_default())
    }

    /// Detach the connection from a room group
    ///
    /// Leaving needs no membership check; a connection may always stop
    /// listening.
    pub async fn handle_leave(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: RoomPayload,
    ) -> HandlerResult<Value> {
        state
            .connection_manager()
            .leave_room(connection.id(), payload.room_id)
            .await;

        connection
            .send(ServerMessage::rooms_left(payload.room_id))
            .await
            .map_err(|e| HandlerError::Internal(e.to_string()))?;

        tracing::debug!(
            connection_id = %connection.id(),
            room_id = %payload.room_id,
            "Connection left room group"
        );

        Ok(serde_json::to_value(RoomEchoPayload {
            room_id: payload.room_id,
        })
        .unwrap_or_default())
    }
}
