use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_helpers::{ApiError, SharerId, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::ServerClient;
use crate::routes::page_non_negative;

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemBody {
    #[validate(custom(function = "crate::routes::not_blank"))]
    pub name: String,
    #[validate(custom(function = "crate::routes::not_blank"))]
    pub description: String,
    #[validate(required(message = "is required"))]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CommentBody {
    #[validate(custom(function = "crate::routes::not_blank"))]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    10
}

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item).delete(delete_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(client)
}

async fn create_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(body): ValidatedJson<CreateItemBody>,
) -> Response {
    client.post("/items", Some(user_id), &body).await
}

async fn list_items(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    page_non_negative(query.from, query.size)?;
    let params = [
        ("from", query.from.to_string()),
        ("size", query.size.to_string()),
    ];
    Ok(client.get("/items", Some(user_id), &params).await)
}

async fn search_items(
    State(client): State<ServerClient>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, ApiError> {
    page_non_negative(query.from, query.size)?;
    let params = [
        ("text", query.text),
        ("from", query.from.to_string()),
        ("size", query.size.to_string()),
    ];
    Ok(client.get("/items/search", None, &params).await)
}

async fn get_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Response {
    client.get(&format!("/items/{id}"), Some(user_id), &[]).await
}

async fn update_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(body): Json<UpdateItemBody>,
) -> Response {
    client
        .patch(&format!("/items/{id}"), Some(user_id), &[], Some(&body))
        .await
}

async fn delete_item(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Response {
    client.delete(&format!("/items/{id}"), Some(user_id)).await
}

async fn add_comment(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<CommentBody>,
) -> Response {
    client
        .post(&format!("/items/{id}/comment"), Some(user_id), &body)
        .await
}
