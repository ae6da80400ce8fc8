//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the ShareIt server.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt Server",
        version = "0.1.0",
        description = "Item sharing service: users, items, bookings and item requests"
    ),
    servers(
        (url = "http://localhost:9090", description = "Local development server")
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc),
        (path = "/items", api = domain_items::handlers::ApiDoc),
        (path = "/bookings", api = domain_bookings::handlers::ApiDoc),
        (path = "/requests", api = domain_requests::handlers::ApiDoc)
    ),
    tags(
        (name = "users", description = "User account endpoints"),
        (name = "items", description = "Item listing endpoints"),
        (name = "bookings", description = "Booking endpoints"),
        (name = "requests", description = "Item request endpoints")
    )
)]
pub struct ApiDoc;
