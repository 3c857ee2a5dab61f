use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::business::{BusinessView, RegisterBusinessRequest, UpdateBusinessRequest};

/// POST /businesses
pub async fn register_business(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterBusinessRequest>,
) -> Result<Json<ApiResponse<BusinessView>>, ApiError> {
    let business = state.businesses().register(payload).await?;
    Ok(Json(ApiResponse::success(business)))
}

/// GET /businesses
pub async fn list_businesses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BusinessView>>>, ApiError> {
    let businesses = state.businesses().list().await?;
    Ok(Json(ApiResponse::success(businesses)))
}

/// GET /businesses/{id}
pub async fn get_business(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<BusinessView>>, ApiError> {
    let business = state.businesses().get(&business_id).await?;
    Ok(Json(ApiResponse::success(business)))
}

/// PUT /businesses/{id}
pub async fn update_business(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<UpdateBusinessRequest>,
) -> Result<Json<ApiResponse<BusinessView>>, ApiError> {
    let business = state.businesses().update(&business_id, payload).await?;
    Ok(Json(ApiResponse::success(business)))
}

/// DELETE /businesses/{id}
pub async fn delete_business(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.businesses().delete(&business_id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Business deleted",
    ))))
}
