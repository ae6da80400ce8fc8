use axum::response::{IntoResponse, Response};
use axum_helpers::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user with id {0} not found")]
    NotFound(i64),

    #[error("user with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Internal(err.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::DuplicateEmail(_) => ApiError::Conflict(err.to_string()),
            UserError::Validation(msg) => ApiError::BadRequest(msg),
            UserError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
