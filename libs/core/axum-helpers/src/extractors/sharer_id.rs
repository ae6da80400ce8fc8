//! Extractor for the identity header used by every authenticated route.

use crate::errors::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the acting user's id.
pub const SHARER_USER_HEADER: &str = "X-Sharer-User-Id";

/// Acting user id taken from the `X-Sharer-User-Id` header.
///
/// Rejects with 400 when the header is missing or is not a valid integer.
/// Whether the id refers to an existing user is checked by the services,
/// not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub i64);

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_HEADER)
            .ok_or_else(missing_header)?;

        value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(SharerId)
            .ok_or_else(missing_header)
    }
}

fn missing_header() -> ApiError {
    ApiError::BadRequest(format!("{SHARER_USER_HEADER} header is missing or invalid"))
}
