//! Ports - interfaces the infrastructure layers implement

mod identity;
mod store;

pub use identity::{IdentityError, IdentityProvider};
pub use store::{ChatStore, StoreResult};
