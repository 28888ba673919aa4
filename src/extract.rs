//! # Request Extractors
//!
//! - [`ValidJson`]: parses a JSON body and runs its [`Validate`] rules before
//!   the handler is called. Parse failures and rule failures both end up as
//!   `AppError::BadRequest`, so the handler body only ever sees valid input.
//! - [`NumericId`]: the `:id` path segment, only accepted when it is all
//!   digits. Anything else gets the unmatched-route response, as if the route
//!   did not exist.

use crate::error::AppError;
use crate::validation::Validate;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

/// A JSON body that passed its declared validation rules
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(vec![rejection.body_text()]))?;

        body.validate()?;

        Ok(ValidJson(body))
    }
}

/// A path id made only of ASCII digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for NumericId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::route_not_found())?;

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::route_not_found());
        }

        // Digits but too large for a row id: the route matches, the record can't exist
        raw.parse()
            .map(NumericId)
            .map_err(|_| AppError::tweet_not_found(&raw))
    }
}
