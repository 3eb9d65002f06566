//! Direct-message room handler

use std::sync::Arc;

use rtc_service::DirectRoomService;
use serde_json::Value;

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::{DmEnsurePayload, DmRoomPayload};
use crate::server::GatewayState;

/// Handles `rooms:dm:ensure`
pub struct DmHandler;

impl DmHandler {
    /// Resolve the direct room shared with the requested peer.
    ///
    /// The answer travels back through the ack channel; clients send this
    /// event with an ack id or they never learn the room id.
    pub async fn handle_ensure(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: DmEnsurePayload,
    ) -> HandlerResult<Value> {
        let room_id = DirectRoomService::ensure_direct_room(
            state.service_context().store(),
            connection.user_id(),
            payload.other_user_id,
        )
        .await?;

        // Resolution doubles as a join: the caller starts receiving the
        // room's traffic without a separate rooms:join round trip.
        state
            .connection_manager()
            .join_room(connection.id(), room_id)
            .await;

        tracing::debug!(
            connection_id = %connection.id(),
            room_id = %room_id,
            "Direct room resolved"
        );

        Ok(serde_json::to_value(DmRoomPayload { room_id }).unwrap_or_default())
    }
}
