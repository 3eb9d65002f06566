//! # rtc-gateway
//!
//! WebSocket gateway for real-time bidirectional chat communication.

pub mod connection;
pub mod handlers;
pub mod presence;
pub mod protocol;
pub mod server;
