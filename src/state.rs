//! # Application State
//!
//! Everything a handler needs, built once at startup and cloned per request.
//! Collaborators are trait objects behind `Arc`, so cloning only bumps
//! reference counts and tests can inject their own stores.

use crate::auth::TokenService;
use crate::config::Config;
use crate::db::{self, SqliteTweetRepository, SqliteUserRepository, TweetRepository, UserRepository};
use anyhow::Result;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tweet storage
    pub tweets: Arc<dyn TweetRepository>,

    /// User storage
    pub users: Arc<dyn UserRepository>,

    /// Session token issuer/verifier
    pub tokens: Arc<TokenService>,

    /// bcrypt work factor for new passwords
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Connect to the database, run migrations and wire the collaborators.
    ///
    /// # Errors
    /// Fails if the database cannot be opened or a migration fails.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::connect(&config.database_url).await?;
        Ok(Self::from_pool(pool, config))
    }

    /// Wire SQLite-backed repositories around an existing pool.
    pub fn from_pool(pool: SqlitePool, config: &Config) -> Self {
        AppState {
            tweets: Arc::new(SqliteTweetRepository::new(pool.clone())),
            users: Arc::new(SqliteUserRepository::new(pool)),
            tokens: Arc::new(TokenService::new(&config.jwt_secret, config.jwt_expires_in)),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
