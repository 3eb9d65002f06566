//! JWT-backed identity provider
//!
//! Fulfills the identity-provider contract by validating bearer tokens issued
//! by the external provider with a shared secret. Issuance is not this core's
//! job; `issue_token` exists for tooling and tests only.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use rtc_core::{Identity, IdentityError, IdentityProvider, UserId};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email address, if the provider knows one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the user ID from the subject claim
    ///
    /// # Errors
    /// Returns an error if the subject is not a well-formed user id
    pub fn user_id(&self) -> Result<UserId, IdentityError> {
        self.sub.parse().map_err(|_| IdentityError::InvalidToken)
    }
}

/// Identity provider that validates provider-issued JWTs locally
#[derive(Clone)]
pub struct JwtIdentityProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtIdentityProvider {
    /// Create a new provider with the secret shared with the identity service
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, IdentityError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => IdentityError::TokenExpired,
                _ => IdentityError::InvalidToken,
            })
    }

    /// Mint a token the way the external provider would.
    ///
    /// For tooling and tests; production tokens come from the provider.
    pub fn issue_token(
        &self,
        user_id: UserId,
        email: Option<String>,
        ttl_secs: i64,
    ) -> Result<String, IdentityError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| IdentityError::Provider(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Identity, IdentityError> {
        let claims = self.validate(token)?;
        let user_id = claims.user_id()?;

        Ok(Identity::new(user_id, claims.email))
    }
}
