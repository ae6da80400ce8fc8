use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{ErrorResponse, SharerId};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::BookingResult;
use crate::models::{BookingResponse, CreateBooking};
use crate::repository::BookingRepository;
use crate::service::BookingService;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_booking,
        decide_booking,
        get_booking,
        bookings_by_booker,
        bookings_by_owner,
    ),
    components(schemas(BookingResponse, CreateBooking, ErrorResponse)),
    tags((name = "bookings", description = "Booking endpoints"))
)]
pub struct ApiDoc;

fn default_state() -> String {
    "ALL".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub from: i64,
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DecisionQuery {
    pub approved: bool,
}

pub fn router<R: BookingRepository + 'static>(service: BookingService<R>) -> Router {
    Router::new()
        .route("/", get(bookings_by_booker).post(create_booking))
        .route("/owner", get(bookings_by_owner))
        .route("/{id}", get(get_booking).patch(decide_booking))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    post,
    path = "",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Item unavailable or dates inverted", body = ErrorResponse),
        (status = 404, description = "Item or user not found, or own item", body = ErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    Json(input): Json<CreateBooking>,
) -> BookingResult<impl IntoResponse> {
    let booking = service.create_booking(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "bookings",
    params(
        ("id" = i64, Path, description = "Booking id"),
        DecisionQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingResponse),
        (status = 400, description = "Booking already decided or canceled", body = ErrorResponse),
        (status = 404, description = "Booking not found or caller not involved", body = ErrorResponse)
    )
)]
async fn decide_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Query(query): Query<DecisionQuery>,
) -> BookingResult<Json<BookingResponse>> {
    let booking = service.decide_booking(id, user_id, query.approved).await?;
    Ok(Json(booking))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "bookings",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, description = "Booking not found or caller not involved", body = ErrorResponse)
    )
)]
async fn get_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> BookingResult<Json<BookingResponse>> {
    Ok(Json(service.get_booking(id, user_id).await?))
}

#[utoipa::path(
    get,
    path = "",
    tag = "bookings",
    params(ListQuery),
    responses(
        (status = 200, description = "The caller's bookings", body = Vec<BookingResponse>),
        (status = 400, description = "Unknown state", body = ErrorResponse)
    )
)]
async fn bookings_by_booker<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    Query(query): Query<ListQuery>,
) -> BookingResult<Json<Vec<BookingResponse>>> {
    let bookings = service
        .bookings_by_booker(user_id, &query.state, query.from, query.size)
        .await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    get,
    path = "/owner",
    tag = "bookings",
    params(ListQuery),
    responses(
        (status = 200, description = "Bookings of the caller's items", body = Vec<BookingResponse>),
        (status = 400, description = "Unknown state", body = ErrorResponse)
    )
)]
async fn bookings_by_owner<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerId(user_id): SharerId,
    Query(query): Query<ListQuery>,
) -> BookingResult<Json<Vec<BookingResponse>>> {
    let bookings = service
        .bookings_by_owner(user_id, &query.state, query.from, query.size)
        .await?;
    Ok(Json(bookings))
}
