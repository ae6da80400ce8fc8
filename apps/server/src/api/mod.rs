//! API routes module

pub mod ready;

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use domain_bookings::{BookingRepository, BookingService};
use domain_items::{ItemRepository, ItemService};
use domain_requests::{RequestRepository, RequestService};
use domain_users::{UserRepository, UserService};

use crate::openapi::ApiDoc;

/// Assemble the resource routers. Generic over the repository types so
/// tests can wire the same routes over in-memory stores.
pub fn routes<U, I, B, Q>(
    users: UserService<U>,
    items: ItemService<I>,
    bookings: BookingService<B>,
    requests: RequestService<Q>,
) -> Router
where
    U: UserRepository + 'static,
    I: ItemRepository + 'static,
    B: BookingRepository + 'static,
    Q: RequestRepository + 'static,
{
    Router::new()
        .nest("/users", domain_users::handlers::router(users))
        .nest("/items", domain_items::handlers::router(items))
        .nest("/bookings", domain_bookings::handlers::router(bookings))
        .nest("/requests", domain_requests::handlers::router(requests))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
}
