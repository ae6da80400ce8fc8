use axum::response::{IntoResponse, Response};
use axum_helpers::ApiError;
use domain_users::UserError;
use pagination::PaginationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("item with id {0} not found")]
    NotFound(i64),

    #[error("user with id {0} not found")]
    UserNotFound(i64),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<sea_orm::DbErr> for ItemError {
    fn from(err: sea_orm::DbErr) -> Self {
        ItemError::Internal(err.to_string())
    }
}

impl From<PaginationError> for ItemError {
    fn from(err: PaginationError) -> Self {
        ItemError::Validation(err.to_string())
    }
}

impl From<UserError> for ItemError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => ItemError::UserNotFound(id),
            UserError::DuplicateEmail(_) | UserError::Validation(_) => {
                ItemError::Validation(err.to_string())
            }
            UserError::Internal(msg) => ItemError::Internal(msg),
        }
    }
}

impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) | ItemError::UserNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ItemError::Forbidden(msg) => ApiError::Forbidden(msg),
            ItemError::Validation(msg) => ApiError::BadRequest(msg),
            ItemError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
