use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use axum_helpers::{ApiError, SharerId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::ServerClient;

/// Booking filters the server understands. Parsing is case-sensitive, so
/// "all" is rejected just like any other unknown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody {
    pub item_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

#[derive(Debug, Deserialize)]
pub struct DecisionQuery {
    pub approved: bool,
}

fn default_state() -> String {
    "ALL".to_string()
}

fn default_size() -> i64 {
    10
}

fn check_list_query(query: &ListQuery) -> Result<(), ApiError> {
    BookingState::from_str(&query.state)
        .map_err(|_| ApiError::BadRequest(format!("Unknown state: {}", query.state)))?;
    if query.from < 0 {
        return Err(ApiError::BadRequest("from must not be negative".to_string()));
    }
    if query.size < 1 {
        return Err(ApiError::BadRequest("size must be positive".to_string()));
    }
    Ok(())
}

pub fn router(client: ServerClient) -> Router {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(decide_booking))
        .with_state(client)
}

async fn create_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    axum::Json(body): axum::Json<CreateBookingBody>,
) -> Response {
    client.post("/bookings", Some(user_id), &body).await
}

async fn decide_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Query(query): Query<DecisionQuery>,
) -> Response {
    let params = [("approved", query.approved.to_string())];
    client
        .patch::<()>(&format!("/bookings/{id}"), Some(user_id), &params, None)
        .await
}

async fn get_booking(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Response {
    client
        .get(&format!("/bookings/{id}"), Some(user_id), &[])
        .await
}

async fn list_bookings(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    check_list_query(&query)?;
    let params = [
        ("state", query.state),
        ("from", query.from.to_string()),
        ("size", query.size.to_string()),
    ];
    Ok(client.get("/bookings", Some(user_id), &params).await)
}

async fn list_owner_bookings(
    State(client): State<ServerClient>,
    SharerId(user_id): SharerId,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    check_list_query(&query)?;
    let params = [
        ("state", query.state),
        ("from", query.from.to_string()),
        ("size", query.size.to_string()),
    ];
    Ok(client.get("/bookings/owner", Some(user_id), &params).await)
}
