//! Domain entities - core business objects

mod identity;
mod membership;
mod message;
mod message_read;
mod room;

pub use identity::Identity;
pub use membership::ChatMembership;
pub use message::Message;
pub use message_read::MessageRead;
pub use room::{ChatRoom, RoomType};
