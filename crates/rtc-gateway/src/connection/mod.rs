//! Connection management
//!
//! Manages WebSocket connections, room-group attachment, and message routing.

mod connection;
mod manager;

pub use connection::Connection;
pub use manager::ConnectionManager;
