use axum::{
    Json,
    extract::{Multipart, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, UploadResponse};

/// POST /uploads
/// Accepts one multipart file field, stores it through the blob store
/// and returns the public URL.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let max_size = state.upload_config().max_size_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(format!("Failed to read upload: {e}")))?;

        if bytes.is_empty() {
            return Err(ApiError::validation("Uploaded file is empty"));
        }
        if bytes.len() > max_size {
            return Err(ApiError::validation(format!(
                "Uploaded file exceeds the {max_size} byte limit"
            )));
        }

        let url = state
            .blob_store()
            .upload(&filename, bytes.to_vec())
            .await
            .map_err(|e| ApiError::internal(format!("Upload failed: {e}")))?;

        return Ok(Json(ApiResponse::success(UploadResponse { url })));
    }

    Err(ApiError::validation("Missing file field"))
}
