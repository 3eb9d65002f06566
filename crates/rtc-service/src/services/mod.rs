//! Services - business logic for the real-time core

mod context;
mod direct_room;
mod error;
mod membership;
mod message;

pub use context::{ContextBuildError, ServiceContext, ServiceContextBuilder};
pub use direct_room::DirectRoomService;
pub use error::{ServiceError, ServiceResult};
pub use membership::MembershipService;
pub use message::MessageService;
