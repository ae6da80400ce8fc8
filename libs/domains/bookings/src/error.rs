use axum::response::{IntoResponse, Response};
use axum_helpers::ApiError;
use domain_items::ItemError;
use domain_users::UserError;
use pagination::PaginationError;
use thiserror::Error;

/// Booking rule violations. The "wrong party" cases deliberately map to 404
/// rather than 403 so callers cannot probe for bookings they are not part of.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("booking with id {0} not found")]
    NotFound(i64),

    #[error("item with id {0} not found")]
    ItemNotFound(i64),

    #[error("user with id {0} not found")]
    UserNotFound(i64),

    #[error("owner cannot book own item")]
    OwnItem,

    #[error("only the item owner can approve a booking")]
    ApproveByBooker,

    #[error("only the item owner or the booker can access the booking")]
    NotParticipant,

    #[error("the booking has been canceled")]
    AlreadyCanceled,

    #[error("the booking has already been decided")]
    AlreadyDecided,

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<sea_orm::DbErr> for BookingError {
    fn from(err: sea_orm::DbErr) -> Self {
        BookingError::Internal(err.to_string())
    }
}

impl From<PaginationError> for BookingError {
    fn from(err: PaginationError) -> Self {
        BookingError::Validation(err.to_string())
    }
}

impl From<UserError> for BookingError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => BookingError::UserNotFound(id),
            UserError::Internal(msg) => BookingError::Internal(msg),
            other => BookingError::Validation(other.to_string()),
        }
    }
}

impl From<ItemError> for BookingError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => BookingError::ItemNotFound(id),
            ItemError::UserNotFound(id) => BookingError::UserNotFound(id),
            ItemError::Internal(msg) => BookingError::Internal(msg),
            other => BookingError::Validation(other.to_string()),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(_)
            | BookingError::ItemNotFound(_)
            | BookingError::UserNotFound(_)
            | BookingError::OwnItem
            | BookingError::ApproveByBooker
            | BookingError::NotParticipant => ApiError::NotFound(err.to_string()),
            BookingError::AlreadyCanceled
            | BookingError::AlreadyDecided
            | BookingError::UnknownState(_)
            | BookingError::Validation(_) => ApiError::BadRequest(err.to_string()),
            BookingError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
