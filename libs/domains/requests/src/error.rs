use axum::response::{IntoResponse, Response};
use axum_helpers::ApiError;
use domain_items::ItemError;
use domain_users::UserError;
use pagination::PaginationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request with id {0} not found")]
    NotFound(i64),

    #[error("user with id {0} not found")]
    UserNotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

pub type RequestResult<T> = Result<T, RequestError>;

impl From<sea_orm::DbErr> for RequestError {
    fn from(err: sea_orm::DbErr) -> Self {
        RequestError::Internal(err.to_string())
    }
}

impl From<PaginationError> for RequestError {
    fn from(err: PaginationError) -> Self {
        RequestError::Validation(err.to_string())
    }
}

impl From<UserError> for RequestError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => RequestError::UserNotFound(id),
            UserError::Internal(msg) => RequestError::Internal(msg),
            other => RequestError::Validation(other.to_string()),
        }
    }
}

impl From<ItemError> for RequestError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::Internal(msg) => RequestError::Internal(msg),
            other => RequestError::Validation(other.to_string()),
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(_) | RequestError::UserNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            RequestError::Validation(msg) => ApiError::BadRequest(msg),
            RequestError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
