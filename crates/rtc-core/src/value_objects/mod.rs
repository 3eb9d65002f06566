//! Value objects - typed identifiers

mod ids;

pub use ids::{ConnectionId, IdParseError, MessageId, RoomId, UserId};
