//! # Database Module
//!
//! Persistence sits behind two repository traits so handlers never touch SQL
//! and tests can swap the store:
//! - `models`: row types (`Tweet`, `User`)
//! - `tweets`: SQLite implementation of [`TweetRepository`]
//! - `users`: SQLite implementation of [`UserRepository`]
//!
//! Lookups return `Option`; deciding that a missing row is a 404 is the
//! handler's job, not the store's.

pub mod models;
pub mod tweets;
pub mod users;

use crate::error::AppResult;
use async_trait::async_trait;
use models::{NewUser, Tweet, User};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub use tweets::SqliteTweetRepository;
pub use users::SqliteUserRepository;

/// Storage operations for tweets
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Every tweet, oldest first.
    async fn all(&self) -> AppResult<Vec<Tweet>>;

    async fn find(&self, id: i64) -> AppResult<Option<Tweet>>;

    async fn create(&self, message: &str) -> AppResult<Tweet>;

    /// Update an existing tweet. A `None` message leaves the text unchanged
    /// and only bumps `updated_at`. Returns `None` when the row is gone.
    async fn update(&self, id: i64, message: Option<&str>) -> AppResult<Option<Tweet>>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Storage operations for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn find(&self, id: i64) -> AppResult<Option<User>>;
}

/// Open a pool and bring the schema up to date.
///
/// In-memory databases are per connection in SQLite, so they get a single
/// connection that is never recycled.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let in_memory = database_url.contains(":memory:");

    let mut options = SqlitePoolOptions::new();
    if in_memory {
        options = options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = options.connect(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::debug!(in_memory, "database ready");

    Ok(pool)
}
