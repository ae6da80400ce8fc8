//! End-to-end scenario over the full route tree with in-memory stores.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use domain_bookings::{BookingService, InMemoryBookingRepository};
use domain_items::{BookingHistory, InMemoryItemRepository, ItemLookup, ItemService};
use domain_requests::{InMemoryRequestRepository, RequestService};
use domain_users::{InMemoryUserRepository, UserLookup, UserService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let user_service = UserService::new(InMemoryUserRepository::new());
    let users: Arc<dyn UserLookup> = Arc::new(user_service.clone());

    let booking_repository = InMemoryBookingRepository::new();
    let history: Arc<dyn BookingHistory> = Arc::new(booking_repository.clone());

    let item_service = ItemService::new(InMemoryItemRepository::new(), users.clone(), history);
    let items: Arc<dyn ItemLookup> = Arc::new(item_service.clone());

    let booking_service = BookingService::new(booking_repository, users.clone(), items.clone());
    let request_service = RequestService::new(InMemoryRequestRepository::new(), users, items);

    Router::new()
        .nest("/users", domain_users::handlers::router(user_service))
        .nest("/items", domain_items::handlers::router(item_service))
        .nest("/bookings", domain_bookings::handlers::router(booking_service))
        .nest("/requests", domain_requests::handlers::router(request_service))
}

fn request(method: Method, uri: &str, user_id: Option<i64>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header("X-Sharer-User-Id", id.to_string());
    }
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn booking_lifecycle_with_comments() {
    let app = app();

    // Two accounts: an owner and a booker.
    let (status, owner) = send(
        &app,
        request(
            Method::POST,
            "/users",
            None,
            Some(json!({"name": "Olga", "email": "olga@example.com"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let owner_id = owner["id"].as_i64().unwrap();

    let (status, booker) = send(
        &app,
        request(
            Method::POST,
            "/users",
            None,
            Some(json!({"name": "Boris", "email": "boris@example.com"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let booker_id = booker["id"].as_i64().unwrap();

    let (status, item) = send(
        &app,
        request(
            Method::POST,
            "/items",
            Some(owner_id),
            Some(json!({"name": "Drill", "description": "Cordless drill", "available": true})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = item["id"].as_i64().unwrap();

    // A finished rental: the dates are in the past.
    let (status, booking) = send(
        &app,
        request(
            Method::POST,
            "/bookings",
            Some(booker_id),
            Some(json!({
                "itemId": item_id,
                "start": "2020-01-01T10:00:00",
                "end": "2020-01-02T10:00:00"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["status"], "WAITING");
    assert_eq!(booking["item"]["name"], "Drill");
    assert_eq!(booking["booker"]["id"], booker_id);
    let booking_id = booking["id"].as_i64().unwrap();

    // Only the owner may approve.
    let (status, body) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/bookings/{booking_id}?approved=true"),
            Some(booker_id),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "only the item owner can approve a booking");

    let (status, booking) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/bookings/{booking_id}?approved=true"),
            Some(owner_id),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "APPROVED");

    // The finished rental lets the booker leave a comment.
    let (status, comment) = send(
        &app,
        request(
            Method::POST,
            &format!("/items/{item_id}/comment"),
            Some(booker_id),
            Some(json!({"text": "Great drill"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comment["text"], "Great drill");
    assert_eq!(comment["authorName"], "Boris");

    // The owner's item view carries booking history and the comment.
    let (status, item) = send(
        &app,
        request(Method::GET, &format!("/items/{item_id}"), Some(owner_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["lastBooking"]["bookerId"], booker_id);
    assert_eq!(item["comments"][0]["authorName"], "Boris");

    // A stranger sees the same item without booking history.
    let (status, booker_view) = send(
        &app,
        request(Method::GET, &format!("/items/{item_id}"), Some(booker_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(booker_view["lastBooking"].is_null());

    let (status, listed) = send(
        &app,
        request(Method::GET, "/bookings?state=PAST", Some(booker_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        request(Method::GET, "/bookings/owner?state=TEST", Some(owner_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown state: TEST");
}

#[tokio::test]
async fn request_answered_by_item() {
    let app = app();

    let (_, requester) = send(
        &app,
        request(
            Method::POST,
            "/users",
            None,
            Some(json!({"name": "Rita", "email": "rita@example.com"})),
        ),
    )
    .await;
    let requester_id = requester["id"].as_i64().unwrap();

    let (_, owner) = send(
        &app,
        request(
            Method::POST,
            "/users",
            None,
            Some(json!({"name": "Oleg", "email": "oleg@example.com"})),
        ),
    )
    .await;
    let owner_id = owner["id"].as_i64().unwrap();

    let (status, item_request) = send(
        &app,
        request(
            Method::POST,
            "/requests",
            Some(requester_id),
            Some(json!({"description": "need a ladder"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let request_id = item_request["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/items",
            Some(owner_id),
            Some(json!({
                "name": "Ladder",
                "description": "Three meters",
                "available": true,
                "requestId": request_id
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, enriched) = send(
        &app,
        request(
            Method::GET,
            &format!("/requests/{request_id}"),
            Some(requester_id),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enriched["items"][0]["name"], "Ladder");

    // The other-users listing excludes the requester's own wishes.
    let (status, others) = send(
        &app,
        request(Method::GET, "/requests/all?from=0&size=10", Some(owner_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(others.as_array().unwrap().len(), 1);

    let (status, own) = send(
        &app,
        request(Method::GET, "/requests/all", Some(requester_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own.as_array().unwrap().len(), 0);
}
