//! Visitor authentication.
//!
//! Pages are public, so authentication only ever answers "who is this, if
//! anyone": a missing or unusable token means an anonymous visitor.

mod jwks;

pub use jwks::{bearer_token, AuthError, AuthUser, JwksClient};
