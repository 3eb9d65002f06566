//! # rtc-core
//!
//! Domain layer for the real-time communication core: entities, value objects,
//! domain errors, and the ports (store + identity provider) the outer layers
//! implement. This crate has zero dependencies on infrastructure (database,
//! web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ChatMembership, ChatRoom, Identity, Message, MessageRead, RoomType};
pub use error::DomainError;
pub use traits::{ChatStore, IdentityError, IdentityProvider, StoreResult};
pub use value_objects::{ConnectionId, IdParseError, MessageId, RoomId, UserId};
