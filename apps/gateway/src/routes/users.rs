use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::ValidatedJson;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::ServerClient;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateUserBody {
    #[validate(custom(function = "crate::routes::not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// Partial update, forwarded as-is. The server owns the merge rules.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateUserBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
        .with_state(client)
}

async fn create_user(
    State(client): State<ServerClient>,
    ValidatedJson(body): ValidatedJson<CreateUserBody>,
) -> Response {
    client.post("/users", None, &body).await
}

async fn list_users(State(client): State<ServerClient>) -> Response {
    client.get("/users", None, &[]).await
}

async fn get_user(State(client): State<ServerClient>, Path(id): Path<i64>) -> Response {
    client.get(&format!("/users/{id}"), None, &[]).await
}

async fn update_user(
    State(client): State<ServerClient>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserBody>,
) -> Response {
    client
        .patch(&format!("/users/{id}"), None, &[], Some(&body))
        .await
}

async fn delete_user(State(client): State<ServerClient>, Path(id): Path<i64>) -> Response {
    client.delete(&format!("/users/{id}"), None).await
}
