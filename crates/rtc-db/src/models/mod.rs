//! Database models - SQLx-compatible structs for PostgreSQL tables

mod membership;
mod message;
mod room;

pub use membership::MembershipModel;
pub use message::MessageModel;
pub use room::RoomModel;
