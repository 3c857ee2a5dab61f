use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::orders::{CreateOrderRequest, OrderView, UpdateOrderRequest};

/// POST /bs/{business_id}/orders
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<OrderView>>, ApiError> {
    let order = state.orders().create(&business_id, payload).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// GET /bs/{business_id}/orders
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<OrderView>>>, ApiError> {
    let orders = state.orders().list(&business_id).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// GET /bs/{business_id}/orders/{oid}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path((business_id, oid)): Path<(String, String)>,
) -> Result<Json<ApiResponse<OrderView>>, ApiError> {
    let order = state.orders().get(&business_id, &oid).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// PUT /bs/{business_id}/orders/{oid}
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Path((business_id, oid)): Path<(String, String)>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderView>>, ApiError> {
    let order = state.orders().update(&business_id, &oid, payload).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// DELETE /bs/{business_id}/orders/{oid}
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path((business_id, oid)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.orders().delete(&business_id, &oid).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Order deleted",
    ))))
}
