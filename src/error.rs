//! # Error Handling
//!
//! Every failure a handler can report is an [`AppError`]. Handlers never build
//! error responses themselves: they return `Err(..)` and the single
//! [`IntoResponse`] implementation below renders it.
//!
//! ## Error envelope
//! ```json
//! { "title": "Bad request.", "errors": ["Please provide a username"] }
//! ```
//! `errors` is only present when there is at least one message.
//!
//! ## Classified vs. unclassified failures
//! - `NotFound`, `BadRequest` and `Unauthorized` are domain failures. Their
//!   title and messages are safe to show to the client.
//! - Everything else (database, hashing, token signing) is an infrastructure
//!   failure. It is logged in full and rendered as a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title used for every validation failure.
pub const BAD_REQUEST_TITLE: &str = "Bad request.";

/// Title used when a tweet lookup comes back empty.
pub const TWEET_NOT_FOUND_TITLE: &str = "Tweet not found";

/// Title used for unmatched routes.
pub const ROUTE_NOT_FOUND_TITLE: &str = "Resource Not Found";

/// Title used for unclassified failures.
pub const SERVER_ERROR_TITLE: &str = "Server Error";

/// Application-wide error type
///
/// The `#[from]` attributes let `?` turn library errors into `AppError`
/// without any handler-side mapping.
#[derive(Error, Debug)]
pub enum AppError {
    /// A requested record does not exist (404).
    ///
    /// `title` is the client-facing summary, e.g. "Tweet not found".
    /// `resource` names the missing record for the logs only.
    #[error("{title}")]
    NotFound {
        title: &'static str,
        resource: Option<String>,
        errors: Vec<String>,
    },

    /// Input failed one or more declared validation rules (400).
    ///
    /// `errors` holds one message per failed rule, in rule order.
    #[error("Bad request: {}", .errors.join(", "))]
    BadRequest { errors: Vec<String> },

    /// Missing, malformed or expired credentials (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Database errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Token signing failed
    ///
    /// Verification failures are mapped to `Unauthorized` by the auth layer,
    /// so only issuance errors reach this variant.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Anything else that should never happen in a healthy process (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build the 404 for a tweet lookup that found nothing.
    ///
    /// Pure: the id is kept on the error and only shows up when the renderer
    /// logs it. Callers decide when a lookup failed.
    pub fn tweet_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound {
            title: TWEET_NOT_FOUND_TITLE,
            resource: Some(id.to_string()),
            errors: Vec::new(),
        }
    }

    /// Build the 404 returned for requests that match no route.
    pub fn route_not_found() -> Self {
        AppError::NotFound {
            title: ROUTE_NOT_FOUND_TITLE,
            resource: None,
            errors: vec!["The requested resource couldn't be found.".to_string()],
        }
    }

    /// Build a validation failure carrying every collected message.
    pub fn bad_request(errors: Vec<String>) -> Self {
        AppError::BadRequest { errors }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_)
            | AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing envelope. Infrastructure details never end up here.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            AppError::NotFound { title, errors, .. } => ErrorEnvelope::new(title, errors.clone()),
            AppError::BadRequest { errors } => ErrorEnvelope::new(BAD_REQUEST_TITLE, errors.clone()),
            AppError::Unauthorized(reason) => ErrorEnvelope::new("Unauthorized", vec![reason.clone()]),
            _ => ErrorEnvelope::new(SERVER_ERROR_TITLE, Vec::new()),
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorEnvelope {
    fn new(title: &str, errors: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            errors,
        }
    }
}

/// Render an `AppError` as an HTTP response
///
/// This is the one place errors turn into responses. Server-side failures are
/// logged with their source; client failures only at debug level.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(%status, error = ?self, "request rejected");
        }

        (status, Json(self.envelope())).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
