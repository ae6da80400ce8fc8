use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use axum_helpers::{ApiError, SharerId, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::ServerClient;
use crate::routes::page_non_negative;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateRequestBody {
    #[validate(custom(function = "crate::routes::not_blank"))]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
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
        .route("/", get(own_requests).post(create_request))
        .route("/all", get(other_requests))
        .route("/{id}", get(get_request))
        .with_state(client)
}

async fn create_request(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    ValidatedJson(body): ValidatedJson<CreateRequestBody>,
) -> Response {
    client.post("/requests", Some(user_id), &body).await
}

async fn own_requests(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
) -> Response {
    client.get("/requests", Some(user_id), &[]).await
}

async fn other_requests(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    page_non_negative(query.from, query.size)?;
    let params = [
        ("from", query.from.to_string()),
        ("size", query.size.to_string()),
    ];
    Ok(client.get("/requests/all", Some(user_id), &params).await)
}

async fn get_request(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Response {
    client.get(&format!("/requests/{id}"), Some(user_id), &[]).await
}
