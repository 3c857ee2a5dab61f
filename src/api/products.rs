use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::entities::products;
use crate::services::catalog::{CreateProductRequest, UpdateProductRequest};

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub live_only: bool,
}

/// POST /bs/{business_id}/products
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ApiResponse<products::Model>>, ApiError> {
    let product = state.products().create(&business_id, payload).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// GET /bs/{business_id}/products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<products::Model>>>, ApiError> {
    let products = state.products().list(&business_id, query.live_only).await?;
    Ok(Json(ApiResponse::success(products)))
}

/// GET /bs/{business_id}/products/{pid}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path((business_id, pid)): Path<(String, String)>,
) -> Result<Json<ApiResponse<products::Model>>, ApiError> {
    let product = state.products().get(&business_id, &pid).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// PUT /bs/{business_id}/products/{pid}
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path((business_id, pid)): Path<(String, String)>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<products::Model>>, ApiError> {
    let product = state.products().update(&business_id, &pid, payload).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// POST /bs/{business_id}/products/{pid}/retire
pub async fn retire_product(
    State(state): State<Arc<AppState>>,
    Path((business_id, pid)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.products().retire(&business_id, &pid).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Product retired",
    ))))
}

/// DELETE /bs/{business_id}/products/{pid}
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path((business_id, pid)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.products().delete(&business_id, &pid).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Product deleted",
    ))))
}
