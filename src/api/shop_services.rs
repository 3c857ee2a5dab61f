use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::entities::shop_services;
use crate::services::catalog::{CreateShopServiceRequest, UpdateShopServiceRequest};

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub live_only: bool,
}

/// POST /bs/{business_id}/services
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<CreateShopServiceRequest>,
) -> Result<Json<ApiResponse<shop_services::Model>>, ApiError> {
    let service = state.shop_services().create(&business_id, payload).await?;
    Ok(Json(ApiResponse::success(service)))
}

/// GET /bs/{business_id}/services
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<shop_services::Model>>>, ApiError> {
    let services = state
        .shop_services()
        .list(&business_id, query.live_only)
        .await?;
    Ok(Json(ApiResponse::success(services)))
}

/// GET /bs/{business_id}/services/{sid}
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path((business_id, sid)): Path<(String, String)>,
) -> Result<Json<ApiResponse<shop_services::Model>>, ApiError> {
    let service = state.shop_services().get(&business_id, &sid).await?;
    Ok(Json(ApiResponse::success(service)))
}

/// PUT /bs/{business_id}/services/{sid}
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Path((business_id, sid)): Path<(String, String)>,
    Json(payload): Json<UpdateShopServiceRequest>,
) -> Result<Json<ApiResponse<shop_services::Model>>, ApiError> {
    let service = state
        .shop_services()
        .update(&business_id, &sid, payload)
        .await?;
    Ok(Json(ApiResponse::success(service)))
}

/// POST /bs/{business_id}/services/{sid}/retire
pub async fn retire_service(
    State(state): State<Arc<AppState>>,
    Path((business_id, sid)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.shop_services().retire(&business_id, &sid).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Service retired",
    ))))
}

/// DELETE /bs/{business_id}/services/{sid}
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path((business_id, sid)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.shop_services().delete(&business_id, &sid).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Service deleted",
    ))))
}
