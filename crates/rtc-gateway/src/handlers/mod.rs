//! Event handlers
//!
//! Routes incoming client events to their handlers. Failures never close the
//! connection: the dispatcher acknowledges an error when the client asked for
//! an ack and logs it otherwise.

mod dm;
mod error;
mod messages;
mod rooms;
mod typing;

pub use dm::DmHandler;
pub use error::{HandlerError, HandlerResult};
pub use messages::MessagesHandler;
pub use rooms::RoomsHandler;
pub use typing::TypingHandler;

use std::sync::Arc;

use serde_json::Value;

use crate::connection::Connection;
use crate::protocol::{ClientEventType, ClientMessage, ServerMessage};
use crate::server::GatewayState;

/// Dispatch incoming client events to appropriate handlers
pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle a single client event to completion.
    ///
    /// Events on one connection run strictly in order; each call finishes all
    /// of its side effects before the caller reads the next frame.
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: ClientMessage,
    ) {
        let Some(event_type) = message.event_type() else {
            tracing::warn!(
                connection_id = %connection.id(),
                event = %message.event,
                "Unknown event, dropping"
            );
            return;
        };

        let ack = message.ack;
        let result = Self::route(state, connection, event_type, &message).await;

        match (result, ack) {
            (Ok(data), Some(ack)) => {
                let _ = connection.send(ServerMessage::ack_ok(ack, data)).await;
            }
            (Ok(_), None) => {}
            (Err(e), Some(ack)) => {
                tracing::debug!(
                    connection_id = %connection.id(),
                    event = %event_type,
                    error = %e,
                    "Handler error, acking"
                );
                let _ = connection
                    .send(ServerMessage::ack_error(ack, e.error_code(), e.to_string()))
                    .await;
            }
            (Err(e), None) => {
                tracing::warn!(
                    connection_id = %connection.id(),
                    event = %event_type,
                    error = %e,
                    "Handler error on fire-and-forget event"
                );
            }
        }
    }

    async fn route(
        state: &GatewayState,
        connection: &Arc<Connection>,
        event_type: ClientEventType,
        message: &ClientMessage,
    ) -> HandlerResult<Value> {
        match event_type {
            ClientEventType::RoomsJoin => {
                let payload = Self::parse(message)?;
                RoomsHandler::handle_join(state, connection, payload).await
            }
            ClientEventType::RoomsLeave => {
                let payload = Self::parse(message)?;
                RoomsHandler::handle_leave(state, connection, payload).await
            }
            ClientEventType::RoomsDmEnsure => {
                let payload = Self::parse(message)?;
                DmHandler::handle_ensure(state, connection, payload).await
            }
            ClientEventType::Typing => {
                let payload = Self::parse(message)?;
                TypingHandler::handle(state, connection, payload).await
            }
            ClientEventType::MessagesSend => {
                let payload = Self::parse(message)?;
                MessagesHandler::handle_send(state, connection, payload).await
            }
            ClientEventType::MessagesSeen => {
                let payload = Self::parse(message)?;
                MessagesHandler::handle_seen(state, connection, payload).await
            }
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(message: &ClientMessage) -> HandlerResult<T> {
        message
            .payload()
            .map_err(|e| HandlerError::InvalidPayload(e.to_string()))
    }
}
