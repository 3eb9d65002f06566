//! WebSocket handler
//!
//! Authenticates the handshake before the upgrade and runs the connection
//! lifecycle afterwards. A request without a valid bearer token is refused
//! with 401 and never reaches the WebSocket layer, so no partial session can
//! exist.

use axum::{
    extract::{ws::Message, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use futures_util::{SinkExt, StreamExt};
use rtc_core::entities::Identity;
use rtc_core::value_objects::ConnectionId;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::connection::Connection;
use crate::handlers::EventDispatcher;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::server::GatewayState;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// Query-string fallback for clients that cannot set headers
#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    token: Option<String>,
}

/// WebSocket gateway handler
///
/// The bearer token comes from the `Authorization` header or, for browser
/// WebSocket clients, the `token` query parameter.
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<AuthQuery>,
) -> Response {
    let token = auth_header
        .as_ref()
        .map(|h| h.token().to_string())
        .or(query.token);

    let Some(token) = token else {
        tracing::debug!("Handshake refused: no bearer token");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match state.service_context().identity().resolve(&token).await {
        Ok(identity) => ws
            .on_upgrade(move |socket| handle_socket(state, socket, identity))
            .into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "Handshake refused: token rejected");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

/// Handle an upgraded, authenticated WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket, identity: Identity) {
    let connection_id = ConnectionId::generate();
    let user_id = identity.user_id;

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(MESSAGE_BUFFER_SIZE);

    let connection = state.connection_manager().add_connection(
        connection_id,
        user_id,
        identity.email,
        tx,
    );

    tracing::info!(
        connection_id = %connection_id,
        user_id = %user_id,
        "WebSocket connection established"
    );

    // Announce the offline to online edge before anything else happens on
    // this connection.
    state.announce_online(user_id, connection_id).await;

    // One-time snapshot for the new socket, literal registry contents.
    let _ = connection
        .send(ServerMessage::presence_state(state.presence().snapshot()))
        .await;

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Outbound pump: everything addressed to this connection flows through
    // the channel and out of this single task.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = msg.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    // Inbound pump: events are handled to completion, one at a time, in
    // arrival order.
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_frame(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        "Binary frame dropped"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        connection_id = %connection_recv.id(),
                        "Client closed connection"
                    );
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_recv.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    cleanup_connection(&state, &connection).await;
}

/// Parse and dispatch a text frame
///
/// A malformed frame is logged and dropped; it never closes the connection.
async fn handle_text_frame(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    let message = match ClientMessage::from_json(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection.id(),
                error = %e,
                "Failed to parse frame, dropping"
            );
            return;
        }
    };

    EventDispatcher::dispatch(state, connection, message).await;
}

/// Clean up a connection on disconnect
async fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    let connection_id = connection.id();
    let user_id = connection.user_id();

    tracing::info!(connection_id = %connection_id, "Cleaning up connection");

    state
        .connection_manager()
        .remove_connection(connection_id)
        .await;

    // Announce the online to offline edge only when this was the user's last
    // connection; the dead socket is already out of the broadcast set.
    state.announce_offline(user_id, connection_id).await;
}
