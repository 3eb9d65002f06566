//! ChatStore implementation

mod error;
mod pg;

pub use error::map_db_error;
pub use pg::PgChatStore;
