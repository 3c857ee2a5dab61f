use axum::{
    Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::TokenPair;

/// Authenticated caller identity, inserted by the middleware and read by
/// handlers that need the user id.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub userid: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct VerifyResetCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Bearer-token middleware: validates the access token and stashes the
/// caller identity in request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let Some(token) = extract_bearer_token(&headers) else {
        return Err(ApiError::Unauthorized("Missing bearer token".to_string()));
    };

    let claims = state.auth().verify_access_token(&token)?;

    tracing::Span::current().record("user_id", claims.sub.as_str());
    request.extensions_mut().insert(CurrentUser {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;
    Some(token.trim().to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// The login id may be the gmail address, mobile number or whatsapp
/// number. Returns an access/refresh token pair.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    if payload.userid.is_empty() {
        return Err(ApiError::validation("Login id is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let tokens = state.auth().login(&payload.userid, &payload.password).await?;
    Ok(Json(ApiResponse::success(tokens)))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let token = state.auth().refresh(&payload.refresh_token).await?;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "token": token }),
    )))
}

/// POST /auth/logout
/// Revokes the caller's refresh token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    user: axum::Extension<CurrentUser>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.auth().logout(&user.user_id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Logout successful",
    ))))
}

/// POST /auth/forgot-password
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }

    state.auth().forgot_password(&payload.email).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Reset code sent to your email",
    ))))
}

/// POST /auth/verify-reset-code
pub async fn verify_reset_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyResetCodeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth()
        .verify_reset_code(&payload.email, &payload.code)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Code verified. You may now reset your password",
    ))))
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .auth()
        .reset_password(&payload.email, &payload.code, &payload.new_password)
        .await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password updated successfully",
    ))))
}
