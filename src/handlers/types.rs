//! # Request Bodies
//!
//! JSON bodies accepted by the API and the validation rules attached to each.
//! Missing string fields deserialize to `""` so the `Present` rule reports
//! them instead of the JSON parser.

use crate::error::{AppError, AppResult};
use crate::validation::{Check, Rule, Validate};
use serde::{Deserialize, Serialize};

/// Longest tweet accepted, in characters
pub const MAX_TWEET_CHARS: usize = 270;

/// Body of `POST /tweets`
///
/// ## Example JSON
/// ```json
/// { "message": "hello" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTweetRequest {
    #[serde(default)]
    pub message: String,
}

fn tweet_message(body: &CreateTweetRequest) -> &str {
    &body.message
}

impl Validate for CreateTweetRequest {
    fn rules() -> Vec<Rule<Self>> {
        vec![
            Rule::new("message", tweet_message, Check::Present, "Please provide a message."),
            Rule::new(
                "message",
                tweet_message,
                Check::MaxChars(MAX_TWEET_CHARS),
                "Message must not be more than 270 characters long.",
            ),
        ]
    }
}

/// Body of `PUT /tweets/:id`
///
/// No rules: the 270-character cap only applies at creation. A missing
/// `message`, or a missing body altogether, leaves the stored text as it is.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTweetRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl UpdateTweetRequest {
    /// Parse a raw request body. Empty means "change nothing".
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body).map_err(|e| AppError::bad_request(vec![e.to_string()]))
    }
}

/// Body of `POST /users`
///
/// ## Example JSON
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "s3cret" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn username(body: &CreateUserRequest) -> &str {
    &body.username
}

fn email(body: &CreateUserRequest) -> &str {
    &body.email
}

fn password(body: &CreateUserRequest) -> &str {
    &body.password
}

impl Validate for CreateUserRequest {
    fn rules() -> Vec<Rule<Self>> {
        vec![
            Rule::new("username", username, Check::Present, "Please provide a username"),
            Rule::new("email", email, Check::Present, "Please provide a valid email."),
            Rule::new("email", email, Check::Email, "Please provide a valid email."),
            Rule::new("password", password, Check::Present, "Please provide a password."),
        ]
    }
}
