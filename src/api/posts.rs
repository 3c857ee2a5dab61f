use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::posts::{CommentRequest, CreatePostRequest, PostView, UpdatePostRequest};

/// POST /bs/{business_id}/posts
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.posts().create(&business_id, payload).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// GET /bs/{business_id}/posts
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<PostView>>>, ApiError> {
    let posts = state.posts().list(&business_id, false).await?;
    Ok(Json(ApiResponse::success(posts)))
}

/// GET /bs/{business_id}/posts/visible
pub async fn list_visible_posts(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<PostView>>>, ApiError> {
    let posts = state.posts().list(&business_id, true).await?;
    Ok(Json(ApiResponse::success(posts)))
}

/// GET /bs/{business_id}/posts/{post_id}
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path((business_id, post_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.posts().get(&business_id, &post_id, false).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// GET /bs/{business_id}/posts/{post_id}/visible
pub async fn get_visible_post(
    State(state): State<Arc<AppState>>,
    Path((business_id, post_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.posts().get(&business_id, &post_id, true).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// PUT /bs/{business_id}/posts/{post_id}
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path((business_id, post_id)): Path<(String, String)>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.posts().update(&business_id, &post_id, payload).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// POST /bs/{business_id}/posts/{post_id}/archive
pub async fn archive_post(
    State(state): State<Arc<AppState>>,
    Path((business_id, post_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.posts().archive(&business_id, &post_id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Post archived",
    ))))
}

/// DELETE /bs/{business_id}/posts/{post_id}
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path((business_id, post_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.posts().delete(&business_id, &post_id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Post deleted",
    ))))
}

// Customer-side actions; the acting customer is the authenticated caller.

/// POST /posts/{post_id}/like
pub async fn like_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.posts().like(&user.user_id, &post_id).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// POST /posts/{post_id}/unlike
pub async fn unlike_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.posts().unlike(&user.user_id, &post_id).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// POST /posts/{post_id}/comment
pub async fn comment_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(post_id): Path<String>,
    Json(payload): Json<CommentRequest>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.posts().comment(&user.user_id, &post_id, payload).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// POST /posts/{post_id}/uncomment
pub async fn uncomment_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.posts().uncomment(&user.user_id, &post_id).await?;
    Ok(Json(ApiResponse::success(post)))
}
