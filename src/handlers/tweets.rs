//! # Tweet Handlers
//!
//! CRUD over tweets. Every route here sits behind `require_auth`.
//!
//! | Route | Success |
//! |---|---|
//! | `GET /tweets` | 200 `{ "tweets": [...] }` |
//! | `GET /tweets/:id` | 200 `{ "tweet": {...} }` |
//! | `POST /tweets` | 200 `{ "tweet": {...} }` |
//! | `PUT /tweets/:id` | 200 `{ "updatedTweet": {...} }` |
//! | `DELETE /tweets/:id` | 204, empty body |
//!
//! A lookup that finds nothing is a 404 "Tweet not found". `PUT` and `DELETE`
//! only match digit ids (see [`NumericId`]).

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::extract::{NumericId, ValidJson};
use crate::handlers::types::{CreateTweetRequest, UpdateTweetRequest};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

pub async fn list_tweets(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let tweets = state.tweets.all().await?;

    Ok(Json(json!({ "tweets": tweets })))
}

/// Get one tweet
///
/// Any id is accepted here; one that isn't an integer simply can't match a
/// row and gets the same 404 as a missing row.
pub async fn get_tweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let tweet = match id.parse::<i64>() {
        Ok(tweet_id) => state.tweets.find(tweet_id).await?,
        Err(_) => None,
    };

    let tweet = tweet.ok_or_else(|| AppError::tweet_not_found(&id))?;

    Ok(Json(json!({ "tweet": tweet })))
}

pub async fn create_tweet(
    State(state): State<AppState>,
    Extension(author): Extension<AuthUser>,
    ValidJson(req): ValidJson<CreateTweetRequest>,
) -> AppResult<Json<Value>> {
    let tweet = state.tweets.create(&req.message).await?;
    tracing::info!(tweet_id = tweet.id, user_id = author.id, "tweet created");

    Ok(Json(json!({ "tweet": tweet })))
}

/// Update a tweet's message
///
/// The existence check comes first: updating a row that isn't there is a
/// 404, never a write, whatever the body holds. The body is only parsed
/// afterwards, and an empty one is a no-op update. The second `ok_or_else`
/// covers a concurrent delete between the two calls.
pub async fn update_tweet(
    State(state): State<AppState>,
    NumericId(id): NumericId,
    body: Bytes,
) -> AppResult<Json<Value>> {
    if state.tweets.find(id).await?.is_none() {
        tracing::debug!(tweet_id = id, "update of missing tweet");
        return Err(AppError::tweet_not_found(id));
    }

    let req = UpdateTweetRequest::from_body(&body)?;

    let updated_tweet = state
        .tweets
        .update(id, req.message.as_deref())
        .await?
        .ok_or_else(|| AppError::tweet_not_found(id))?;

    Ok(Json(json!({ "updatedTweet": updated_tweet })))
}

pub async fn delete_tweet(
    State(state): State<AppState>,
    NumericId(id): NumericId,
) -> AppResult<StatusCode> {
    if !state.tweets.delete(id).await? {
        return Err(AppError::tweet_not_found(id));
    }

    tracing::info!(tweet_id = id, "tweet deleted");
    Ok(StatusCode::NO_CONTENT)
}
