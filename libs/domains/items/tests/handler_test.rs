//! Handler tests for the items domain against the in-memory repository.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDateTime;
use domain_items::{
    handlers, BookingBrief, BookingHistory, InMemoryItemRepository, ItemResult, ItemService,
};
use domain_users::{User, UserLookup, UserResult};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct AnyUser;

#[async_trait]
impl UserLookup for AnyUser {
    async fn user_by_id(&self, id: i64) -> UserResult<Option<User>> {
        Ok(Some(User {
            id,
            name: format!("user-{id}"),
            email: format!("user{id}@example.com"),
        }))
    }
}

struct NoHistory;

#[async_trait]
impl BookingHistory for NoHistory {
    async fn last_for_item(
        &self,
        _item_id: i64,
        _now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        Ok(None)
    }

    async fn next_for_item(
        &self,
        _item_id: i64,
        _now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        Ok(None)
    }

    async fn finished_booking(
        &self,
        _item_id: i64,
        _booker_id: i64,
        _now: NaiveDateTime,
    ) -> ItemResult<Option<BookingBrief>> {
        Ok(None)
    }
}

fn app() -> axum::Router {
    let service = ItemService::new(
        InMemoryItemRepository::new(),
        Arc::new(AnyUser),
        Arc::new(NoHistory),
    );
    handlers::router(service)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_item(user_id: i64, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("X-Sharer-User-Id", user_id.to_string())
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn create_item_returns_201_with_camel_case_fields() {
    let response = app()
        .oneshot(post_item(
            7,
            json!({"name": "Drill", "description": "Cordless", "available": true, "requestId": 3}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let item = json_body(response.into_body()).await;
    assert_eq!(item["name"], "Drill");
    assert_eq!(item["requestId"], 3);
    assert_eq!(item["ownerId"], 7);
    assert!(item.get("request_id").is_none());
    assert!(item.get("owner_id").is_none());
}

#[tokio::test]
async fn create_item_without_header_returns_400() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"name": "Drill", "description": "x", "available": true}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_by_non_owner_returns_403() {
    let app = app();
    app.clone()
        .oneshot(post_item(
            1,
            json!({"name": "Drill", "description": "Cordless", "available": true}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/1")
                .header("X-Sharer-User-Id", "2")
                .header("content-type", "application/json")
                .body(Body::from(json!({"name": "Mine now"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn patch_blank_name_returns_400_with_message() {
    let app = app();
    app.clone()
        .oneshot(post_item(
            1,
            json!({"name": "Drill", "description": "Cordless", "available": true}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/1")
                .header("X-Sharer-User-Id", "1")
                .header("content-type", "application/json")
                .body(Body::from(json!({"name": " "}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "name cannot be blank");
}

#[tokio::test]
async fn search_with_blank_text_returns_empty_list() {
    let app = app();
    app.clone()
        .oneshot(post_item(
            1,
            json!({"name": "Drill", "description": "Cordless", "available": true}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search?text=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn comment_without_finished_booking_returns_400() {
    let app = app();
    app.clone()
        .oneshot(post_item(
            1,
            json!({"name": "Drill", "description": "Cordless", "available": true}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/1/comment")
                .header("X-Sharer-User-Id", "2")
                .header("content-type", "application/json")
                .body(Body::from(json!({"text": "never used it"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_item_returns_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/42")
                .header("X-Sharer-User-Id", "1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
