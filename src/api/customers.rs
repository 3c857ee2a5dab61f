use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::entities::customers;
use crate::services::customers::{CreateCustomerRequest, UpdateCustomerRequest};

/// POST /bs/{business_id}/customers
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Json<ApiResponse<customers::Model>>, ApiError> {
    let customer = state.customers().create(&business_id, payload).await?;
    Ok(Json(ApiResponse::success(customer)))
}

/// GET /bs/{business_id}/customers
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<customers::Model>>>, ApiError> {
    let customers = state.customers().list(&business_id).await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// GET /bs/{business_id}/customers/{cust_id}
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path((business_id, cust_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<customers::Model>>, ApiError> {
    let customer = state.customers().get(&business_id, &cust_id).await?;
    Ok(Json(ApiResponse::success(customer)))
}

/// PUT /bs/{business_id}/customers/{cust_id}
pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path((business_id, cust_id)): Path<(String, String)>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<customers::Model>>, ApiError> {
    let customer = state
        .customers()
        .update(&business_id, &cust_id, payload)
        .await?;
    Ok(Json(ApiResponse::success(customer)))
}

/// DELETE /bs/{business_id}/customers/{cust_id}
pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path((business_id, cust_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.customers().delete(&business_id, &cust_id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Customer deleted",
    ))))
}
