//! Gateway validation tests. Every case here is rejected before the
//! request would reach the upstream server, except the final one which
//! exercises the 502 mapping against a closed port.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shareit_gateway::{routes, ServerClient};
use tower::ServiceExt;

fn app() -> Router {
    // Nothing listens on port 1, so anything that gets forwarded fails.
    routes::routes(ServerClient::new("http://127.0.0.1:1".to_string()))
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

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(req).await.unwrap();
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
async fn rejects_invalid_email() {
    let (status, body) = send(request(
        Method::POST,
        "/users",
        None,
        Some(json!({"name": "Uma", "email": "not-an-email"})),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email: must be a valid email address");
}

#[tokio::test]
async fn rejects_blank_item_name() {
    let (status, body) = send(request(
        Method::POST,
        "/items",
        Some(1),
        Some(json!({"name": "   ", "description": "x", "available": true})),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name: must not be blank");
}

#[tokio::test]
async fn rejects_item_without_availability() {
    let (status, body) = send(request(
        Method::POST,
        "/items",
        Some(1),
        Some(json!({"name": "Drill", "description": "x"})),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "available: is required");
}

#[tokio::test]
async fn rejects_missing_sharer_header() {
    let (status, body) = send(request(
        Method::POST,
        "/items",
        None,
        Some(json!({"name": "Drill", "description": "x", "available": true})),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "X-Sharer-User-Id header is missing or invalid");
}

#[tokio::test]
async fn rejects_unknown_booking_state() {
    let (status, body) =
        send(request(Method::GET, "/bookings?state=TEST", Some(1), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown state: TEST");
}

#[tokio::test]
async fn rejects_lowercase_booking_state() {
    let (status, body) =
        send(request(Method::GET, "/bookings/owner?state=all", Some(1), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown state: all");
}

#[tokio::test]
async fn rejects_zero_size_on_booking_lists() {
    let (status, body) = send(request(
        Method::GET,
        "/bookings?state=ALL&from=0&size=0",
        Some(1),
        None,
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "size must be positive");
}

#[tokio::test]
async fn rejects_negative_from_on_item_list() {
    let (status, body) = send(request(Method::GET, "/items?from=-1", Some(1), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "from and size must not be negative");
}

#[tokio::test]
async fn rejects_blank_comment() {
    let (status, body) = send(request(
        Method::POST,
        "/items/1/comment",
        Some(1),
        Some(json!({"text": ""})),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "text: must not be blank");
}

#[tokio::test]
async fn rejects_blank_request_description() {
    let (status, body) = send(request(
        Method::POST,
        "/requests",
        Some(1),
        Some(json!({"description": "  "})),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "description: must not be blank");
}

#[tokio::test]
async fn maps_unreachable_upstream_to_502() {
    let (status, body) = send(request(Method::GET, "/users/1", None, None)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream server is unavailable");
}
