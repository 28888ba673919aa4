//! Password hashing
//!
//! bcrypt is CPU-bound on purpose, so hashing runs on the blocking pool
//! instead of stalling the async workers.

use crate::error::{AppError, AppResult};

/// Hash `password` with bcrypt at the given cost.
pub async fn hash(password: String, cost: u32) -> AppResult<String> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

    Ok(hashed)
}
