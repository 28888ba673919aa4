//! # Twitter Lite API
//!
//! Two REST resources over SQLite:
//! - `/tweets`: list, get, create, update, delete (bearer token required)
//! - `/users`: account creation, which also issues the first token
//!
//! ## Request lifecycle
//! 1. `require_auth` (tweets only) verifies the bearer token
//! 2. Extractors parse and validate input (`ValidJson`, `NumericId`)
//! 3. The handler talks to the repositories and returns `AppResult<_>`
//! 4. Errors are rendered in one place, `AppError::into_response`

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod validation;

use crate::error::AppError;
use crate::handlers::{health::health_check, route_not_found, tweets, users};
use crate::state::AppState;
use axum::{
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
///
/// CORS is left to the caller since it depends on deployment config.
pub fn app(state: AppState) -> Router {
    // Auth runs on matched tweet routes only; unmatched paths fall through to
    // the 404 fallback. A known path with an unsupported method is also an
    // unmatched route, not a 405.
    let tweet_routes = Router::new()
        .route(
            "/",
            get(tweets::list_tweets)
                .post(tweets::create_tweet)
                .fallback(route_not_found),
        )
        .route(
            "/:id",
            get(tweets::get_tweet)
                .put(tweets::update_tweet)
                .delete(tweets::delete_tweet)
                .fallback(route_not_found),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let user_routes = Router::new().route("/", post(users::create_user).fallback(route_not_found));

    Router::new()
        .route("/health", get(health_check))
        .nest("/tweets", tweet_routes)
        .nest("/users", user_routes)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A panicking handler still produces exactly one response: the 500 envelope.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
