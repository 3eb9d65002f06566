//! Identity provider port
//!
//! The only contract with the external identity provider: given a bearer
//! token, return a stable user id and optional email. Token issuance lives
//! entirely outside this core.

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::Identity;

/// Errors from resolving a bearer token
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Identity provider error: {0}")]
    Provider(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a bearer token for the identity it proves
    async fn resolve(&self, token: &str) -> Result<Identity, IdentityError>;
}
