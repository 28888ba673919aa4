//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `health`: Health check endpoint (for monitoring)
//! - `tweets`: Tweet CRUD (authenticated)
//! - `users`: Account creation (public)
//! - `types`: Request bodies and their validation rules
//!
//! ## Handler Pattern
//! Handlers take extractors and return `AppResult<impl IntoResponse>`:
//! ```rust,ignore
//! pub async fn my_handler(
//!     State(state): State<AppState>,
//!     ValidJson(req): ValidJson<MyRequest>,  // already validated
//! ) -> AppResult<Json<Value>> {
//!     let thing = state.things.find(req.id).await?;  // infra errors propagate
//!     Ok(Json(json!({ "thing": thing })))
//! }
//! ```
//! The `Err` side is rendered by `AppError`'s `IntoResponse`, so each request
//! ends in exactly one response: the success body or the error envelope.

pub mod health;
pub mod tweets;
pub mod types;
pub mod users;

use crate::error::AppError;

/// Router fallback for requests that match no route.
pub async fn route_not_found() -> AppError {
    AppError::route_not_found()
}
