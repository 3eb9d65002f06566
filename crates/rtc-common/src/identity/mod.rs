//! Identity resolution

mod jwt;

pub use jwt::{Claims, JwtIdentityProvider};
