//! Gateway server setup
//!
//! Provides the WebSocket server configuration, routes, and dependency
//! wiring.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use std::sync::Arc;

use axum::{routing::get, Router};
use rtc_common::{AppConfig, AppError, JwtIdentityProvider};
use rtc_db::PgChatStore;
use rtc_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::connection::ConnectionManager;
use crate::presence::PresenceRegistry;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    tracing::info!("Connecting to PostgreSQL...");
    let db_config = rtc_db::PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
    };
    let pool = rtc_db::create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    rtc_db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    tracing::info!("PostgreSQL connection established, migrations applied");

    let store = Arc::new(PgChatStore::new(pool));
    let identity = Arc::new(JwtIdentityProvider::new(&config.jwt.secret));

    let service_context = ServiceContextBuilder::new()
        .store(store)
        .identity(identity)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let connection_manager = ConnectionManager::new_shared();
    let presence = PresenceRegistry::new_shared();

    Ok(GatewayState::new(
        service_context,
        connection_manager,
        presence,
        config,
    ))
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    tracing::info!("Starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.gateway.address();

    let state = create_gateway_state(config).await?;
    let app = create_app(state);

    run_server(app, &addr).await
}
