use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::entities::search_history;
use crate::services::search::{SearchFilters, SearchPage};

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "queryString")]
    pub query_string: Option<String>,
    pub location: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

/// GET /search
pub async fn search_businesses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchPage>>, ApiError> {
    let filters = SearchFilters::normalized(
        query.query_string,
        query.location,
        query.page,
        query.limit,
        state.search_config(),
    );

    let page = state.search().search(&filters, &user.user_id).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// POST /search/cache/clear
pub async fn clear_search_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let removed = state.search().clear_cache().await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Cleared {removed} cached entries"
    )))))
}

/// GET /search/history
pub async fn search_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<search_history::Model>>>, ApiError> {
    let entries = state
        .search()
        .history(&user.user_id, query.limit.unwrap_or(20).clamp(1, 100))
        .await?;
    Ok(Json(ApiResponse::success(entries)))
}
