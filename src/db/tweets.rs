use crate::db::models::{timestamp, Tweet};
use crate::db::TweetRepository;
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqliteTweetRepository {
    pool: SqlitePool,
}

impl SqliteTweetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetRepository for SqliteTweetRepository {
    async fn all(&self) -> AppResult<Vec<Tweet>> {
        let tweets = sqlx::query_as::<_, Tweet>("SELECT * FROM tweets ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(tweets)
    }

    async fn find(&self, id: i64) -> AppResult<Option<Tweet>> {
        let tweet = sqlx::query_as::<_, Tweet>("SELECT * FROM tweets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tweet)
    }

    async fn create(&self, message: &str) -> AppResult<Tweet> {
        let now = timestamp();

        let result = sqlx::query(
            "INSERT INTO tweets (message, created_at, updated_at)
             VALUES (?, ?, ?)",
        )
        .bind(message)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Tweet {
            id: result.last_insert_rowid(),
            message: message.to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn update(&self, id: i64, message: Option<&str>) -> AppResult<Option<Tweet>> {
        let result = sqlx::query(
            "UPDATE tweets
             SET message = COALESCE(?, message), updated_at = ?
             WHERE id = ?",
        )
        .bind(message)
        .bind(timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find(id).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tweets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
