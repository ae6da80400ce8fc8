//! Gateway routes: shape validation in front of the pass-through client.

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use axum::Router;
use axum_helpers::ApiError;
use validator::ValidationError;

use crate::client::ServerClient;

pub fn routes(client: ServerClient) -> Router {
    Router::new()
        .nest("/users", users::router(client.clone()))
        .nest("/items", items::router(client.clone()))
        .nest("/bookings", bookings::router(client.clone()))
        .nest("/requests", requests::router(client))
}

/// List endpoints that accept `from`/`size` with a zero floor on both.
pub(crate) fn page_non_negative(from: i64, size: i64) -> Result<(), ApiError> {
    if from < 0 || size < 0 {
        return Err(ApiError::BadRequest(
            "from and size must not be negative".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}
