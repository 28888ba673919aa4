//! # Authentication Module
//!
//! - `tokens`: signing and verifying session tokens (JWT, HS256)
//! - `passwords`: one-way password hashing (bcrypt)
//!
//! Token issuance is opaque to the handlers: they ask for a token for a user
//! and hand it back to the client. The `require_auth` middleware is the only
//! consumer of `TokenService::verify`.

pub mod passwords;
pub mod tokens;

pub use tokens::{Claims, TokenService};

/// The authenticated caller, inserted into request extensions by
/// `require_auth`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}
