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

use crate::error::RequestResult;
use crate::models::{CreateRequest, ItemRequest, RequestResponse};
use crate::repository::RequestRepository;
use crate::service::RequestService;

#[derive(OpenApi)]
#[openapi(
    paths(create_request, own_requests, other_requests, get_request),
    components(schemas(ItemRequest, CreateRequest, RequestResponse, ErrorResponse)),
    tags((name = "requests", description = "Item request endpoints"))
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    #[serde(default)]
    pub from: i64,
    pub size: Option<i64>,
}

pub fn router<R: RequestRepository + 'static>(service: RequestService<R>) -> Router {
    Router::new()
        .route("/", get(own_requests).post(create_request))
        .route("/all", get(other_requests))
        .route("/{id}", get(get_request))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    post,
    path = "",
    tag = "requests",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequest),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
async fn create_request<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerId(user_id): SharerId,
    Json(input): Json<CreateRequest>,
) -> RequestResult<impl IntoResponse> {
    let request = service.create_request(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "",
    tag = "requests",
    responses(
        (status = 200, description = "The caller's requests with answering items", body = Vec<RequestResponse>),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
async fn own_requests<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerId(user_id): SharerId,
) -> RequestResult<Json<Vec<RequestResponse>>> {
    Ok(Json(service.own_requests(user_id).await?))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = "requests",
    params(PageQuery),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<RequestResponse>),
        (status = 400, description = "Bad page parameters", body = ErrorResponse)
    )
)]
async fn other_requests<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerId(user_id): SharerId,
    Query(query): Query<PageQuery>,
) -> RequestResult<Json<Vec<RequestResponse>>> {
    let requests = service
        .other_requests(user_id, query.from, query.size)
        .await?;
    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "requests",
    params(("id" = i64, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request found", body = RequestResponse),
        (status = 404, description = "Request or user not found", body = ErrorResponse)
    )
)]
async fn get_request<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> RequestResult<Json<RequestResponse>> {
    Ok(Json(service.get_request(id, user_id).await?))
}
