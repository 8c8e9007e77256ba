//! 产品接口处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{
    Product, ProductEnvelope, ProductListResponse, ProductPayload, SearchResponse, StatsResponse,
};
use super::query::{ListQuery, SearchQuery};
use super::validation::{parse_product_id, validate_product, INVALID_ID_MESSAGE};
use crate::app::AppState;
use crate::core::{
    error::ApiError,
    extract::{JsonBody, QueryParams},
    response::MessageResponse,
};

pub async fn list_products(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Json<ProductListResponse> {
    Json(state.product_service.list(&query).await)
}

pub async fn search_products(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = state.product_service.search(query.q.as_deref()).await?;
    Ok(Json(results))
}

pub async fn product_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.product_service.stats().await)
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let product = state.product_service.get(parse_product_id(&id)).await?;
    Ok(Json(ProductEnvelope { product }))
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<(StatusCode, Json<MessageResponse<Product>>), ApiError> {
    let draft = validate_product(&payload)?;
    let product = state.product_service.create(draft).await;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_product(
            "Product created successfully",
            product,
        )),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<Json<MessageResponse<Product>>, ApiError> {
    let draft = validate_product(&payload)?;
    let id = path_id(&id)?;
    let product = state.product_service.update(id, draft).await;

    Ok(Json(MessageResponse::with_product(
        "Product updated successfully",
        product,
    )))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse<()>>, ApiError> {
    let id = path_id(&id)?;
    let message = state.product_service.delete(id).await;
    Ok(Json(MessageResponse::message(message)))
}

fn path_id(raw: &str) -> Result<i64, ApiError> {
    parse_product_id(raw).ok_or_else(|| ApiError::validation(INVALID_ID_MESSAGE))
}
