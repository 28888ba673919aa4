//! # Database Models
//!
//! Structs mapping to rows of the `tweets` and `users` tables.
//!
//! Timestamps are stored as RFC 3339 text, the way SQLite keeps them, and
//! records serialize in camelCase so the wire format reads
//! `{"id":1,"message":"hello","createdAt":"...","updatedAt":"..."}`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A tweet as stored and as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    /// Autoincrement primary key
    pub id: i64,

    /// Tweet body. Creation caps it at 270 characters; updates store any
    /// length.
    pub message: String,

    /// When the tweet was created (RFC3339 timestamp)
    pub created_at: String,

    /// When the tweet was last updated (RFC3339 timestamp)
    pub updated_at: String,
}

/// User account
///
/// Never serialized as a whole: handlers only expose the public projection
/// (`{ "id": .. }`), so the password hash cannot leak by accident.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Autoincrement primary key
    pub id: i64,

    /// Unique username
    pub username: String,

    /// Unique email address
    pub email: String,

    /// bcrypt hash of the password; the plaintext is never stored
    pub hashed_password: String,

    /// When the account was created (RFC3339 timestamp)
    pub created_at: String,

    /// When the account was last updated (RFC3339 timestamp)
    pub updated_at: String,
}

/// Fields needed to insert a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}

/// Current time in the format stored in every timestamp column.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339()
}
