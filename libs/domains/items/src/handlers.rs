use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{ErrorResponse, SharerId};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::ItemResult;
use crate::models::{
    CommentResponse, CreateComment, CreateItem, Item, ItemResponse, UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        get_item,
        update_item,
        delete_item,
        search_items,
        add_comment,
    ),
    components(schemas(
        Item,
        ItemResponse,
        CreateItem,
        UpdateItem,
        CreateComment,
        CommentResponse,
        ErrorResponse
    )),
    tags((name = "items", description = "Item listing endpoints"))
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    #[serde(default)]
    pub from: i64,
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub from: i64,
    pub size: Option<i64>,
}

pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route(
            "/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/{id}/comment", post(add_comment))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "",
    tag = "items",
    params(PageQuery),
    responses(
        (status = 200, description = "The caller's items with booking info", body = Vec<ItemResponse>),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    Query(query): Query<PageQuery>,
) -> ItemResult<Json<Vec<ItemResponse>>> {
    let items = service
        .items_by_owner(user_id, query.from, query.size)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 404, description = "Unknown owner", body = ErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    Json(input): Json<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> ItemResult<Json<ItemResponse>> {
    Ok(Json(service.get_item(id, user_id).await?))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Blank name or description", body = ErrorResponse),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(input): Json<UpdateItem>,
) -> ItemResult<Json<Item>> {
    Ok(Json(service.update_item(id, user_id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 403, description = "Caller is not the owner", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> ItemResult<StatusCode> {
    service.delete_item(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<ItemResponse>)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ItemResult<Json<Vec<ItemResponse>>> {
    let items = service
        .search_items(&query.text, query.from, query.size)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment added", body = CommentResponse),
        (status = 400, description = "No finished booking by this user", body = ErrorResponse),
        (status = 404, description = "Item or user not found", body = ErrorResponse)
    )
)]
async fn add_comment<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(input): Json<CreateComment>,
) -> ItemResult<Json<CommentResponse>> {
    Ok(Json(service.add_comment(id, user_id, input).await?))
}
