//! # User Handlers
//!
//! Account creation. This route is not behind `require_auth`: it is how a
//! client gets its first token.

use crate::auth::passwords;
use crate::db::models::NewUser;
use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::handlers::types::CreateUserRequest;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// Create a user and sign them in
///
/// ## Route
/// POST /users
///
/// ## Response (201)
/// ```json
/// { "user": { "id": 1 }, "token": "eyJhbGciOi..." }
/// ```
///
/// ## How it works
/// 1. Body is validated before this runs (`ValidJson`)
/// 2. Password is hashed with bcrypt; only the hash is stored
/// 3. A session token is issued for the new user
///
/// Only the id is returned: the stored row, hash included, never leaves the
/// server.
pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let hashed_password = passwords::hash(req.password, state.bcrypt_cost).await?;

    let user = state
        .users
        .create(NewUser {
            username: req.username,
            email: req.email,
            hashed_password,
        })
        .await?;

    let token = state.tokens.issue(&user)?;
    tracing::info!(user_id = user.id, username = %user.username, "user created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": { "id": user.id },
            "token": token,
        })),
    ))
}
