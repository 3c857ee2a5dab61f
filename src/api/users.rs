use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse, NameResponse};
use crate::services::PublicUser;
use crate::services::users::{RegisterUserRequest, UpdateUserRequest};

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct FcmTokenRequest {
    pub fcm_token: String,
}

/// POST /users
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<Json<ApiResponse<PublicUser>>, ApiError> {
    let user = state.users().register(payload).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PublicUser>>>, ApiError> {
    let users = state.users().list().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<PublicUser>>, ApiError> {
    let user = state.users().get(&user_id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// GET /users/{id}/name
pub async fn get_user_name(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<NameResponse>>, ApiError> {
    let name = state.users().get_name(&user_id).await?;
    Ok(Json(ApiResponse::success(NameResponse { name })))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<PublicUser>>, ApiError> {
    let user = state.users().update(&user_id, payload).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /users/{id}/password
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .users()
        .update_password(&user_id, &payload.new_password)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password updated successfully",
    ))))
}

/// PUT /users/{id}/fcm-token
pub async fn update_fcm_token(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<FcmTokenRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .users()
        .update_fcm_token(&user_id, &payload.fcm_token)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "FCM token updated",
    ))))
}
