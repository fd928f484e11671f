//! Signed session tokens carried in the session cookie.

pub mod claims;
pub mod tokens;

pub use claims::SessionClaims;
pub use tokens::SessionTokens;
