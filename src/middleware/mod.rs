//! # Middleware Module
//!
//! Runs before the route handlers and may short-circuit the request.
//!
//! - `auth`: `require_auth`, which rejects requests without a valid bearer
//!   token with a 401 envelope

pub mod auth;
