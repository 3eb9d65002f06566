//! Identity entity - the resolved caller of a connection
//!
//! Users are not owned by this core; the identity provider resolves a bearer
//! token into this pair once per connection and that is all we ever know.

use crate::value_objects::UserId;

/// Resolved identity of an authenticated connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: Option<String>,
}

impl Identity {
    /// Create a new Identity
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }
}
