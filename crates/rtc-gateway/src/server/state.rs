//! Gateway state
//!
//! Application state shared by the router, the handshake, and the handlers.

use std::sync::Arc;

use rtc_common::AppConfig;
use rtc_core::value_objects::{ConnectionId, UserId};
use rtc_service::ServiceContext;
use tokio::sync::Mutex;

use crate::connection::ConnectionManager;
use crate::presence::PresenceRegistry;
use crate::protocol::ServerMessage;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// Service context with the store and identity ports
    service_context: Arc<ServiceContext>,
    /// Connection manager for WebSocket connections
    connection_manager: Arc<ConnectionManager>,
    /// Process-local presence registry
    presence: Arc<PresenceRegistry>,
    /// Orders presence edge announcements; held across the registry
    /// mutation and the matching broadcast
    presence_gate: Arc<Mutex<()>>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        service_context: ServiceContext,
        connection_manager: Arc<ConnectionManager>,
        presence: Arc<PresenceRegistry>,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            connection_manager,
            presence,
            presence_gate: Arc::new(Mutex::new(())),
            config: Arc::new(config),
        }
    }

    /// Register a connection with the presence registry and, on an
    /// offline to online edge, broadcast it.
    ///
    /// The gate keeps the edge computation and its broadcast atomic, so
    /// announcements always leave in the order the edges happened even when
    /// a connect and a last disconnect for the same user race.
    pub async fn announce_online(&self, user_id: UserId, connection_id: ConnectionId) {
        let _ordered = self.presence_gate.lock().await;
        if self.presence.mark_online(user_id, connection_id) {
            self.connection_manager
                .broadcast(ServerMessage::presence_update(user_id, true))
                .await;
        }
    }

    /// Drop a connection from the presence registry and, on an online to
    /// offline edge, broadcast it.
    pub async fn announce_offline(&self, user_id: UserId, connection_id: ConnectionId) {
        let _ordered = self.presence_gate.lock().await;
        if self.presence.mark_offline(user_id, connection_id) {
            self.connection_manager
                .broadcast(ServerMessage::presence_update(user_id, false))
                .await;
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the presence registry
    pub fn presence(&self) -> &PresenceRegistry {
        &self.presence
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .field("presence", &self.presence)
            .finish()
    }
}
