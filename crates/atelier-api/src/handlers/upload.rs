//! Token-based upload endpoint backing the local storage provider.
//!
//! When S3 is active, signed URLs point directly at the bucket and this
//! endpoint is never minted into a URL.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;

use atelier_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// PUT /api/uploads/{token}
pub async fn accept_upload(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let local = state.storage.local().ok_or_else(|| {
        ApiError(AppError::not_found(
            "Direct uploads are only served by the local storage provider",
        ))
    })?;

    let path = local
        .complete_signed_upload(&token, body)
        .await
        .map_err(ApiError)?;

    Ok(Json(serde_json::json!({ "success": true, "data": { "path": path } })))
}
