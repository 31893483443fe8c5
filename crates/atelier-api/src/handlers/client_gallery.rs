//! Admin client-gallery handlers.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use atelier_core::error::AppError;
use atelier_core::types::ClientGalleryId;
use atelier_service::upload::service::CommittedUpload;

use crate::dto::request::{
    ClientUploadUrlRequest, CommitClientPhotosRequest, CreateGalleryRequest, DeletePhotoRequest,
};
use crate::error::ApiError;
use crate::extractors::AdminSession;
use crate::state::AppState;

/// GET /api/admin/client-galleries
pub async fn list_galleries(
    State(state): State<AppState>,
    session: AdminSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let galleries = state
        .gallery_service
        .list_galleries(&session.ctx)
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": galleries })))
}

/// POST /api/admin/client-galleries
pub async fn create_gallery(
    State(state): State<AppState>,
    session: AdminSession,
    Json(req): Json<CreateGalleryRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let gallery = state
        .gallery_service
        .create_gallery(&session.ctx, &req.name)
        .await
        .map_err(ApiError)?;

    let share_path = gallery.share_path(session.ctx.locale);
    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "gallery": gallery, "share_path": share_path }
    })))
}

/// GET /api/admin/client-galleries/{id}
pub async fn gallery_detail(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let view = state
        .gallery_service
        .gallery_detail(&session.ctx, ClientGalleryId::from(id))
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": view })))
}

/// DELETE /api/admin/client-galleries/{id}
pub async fn delete_gallery(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .gallery_service
        .delete_gallery(&session.ctx, ClientGalleryId::from(id))
        .await
        .map_err(ApiError)?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Gallery deleted" } }),
    ))
}

/// POST /api/admin/client-galleries/{id}/upload-url
pub async fn create_upload_url(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<ClientUploadUrlRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let signed = state
        .upload_service
        .client_upload_url(&session.ctx, ClientGalleryId::from(id), &req.file_name)
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": signed })))
}

/// POST /api/admin/client-galleries/{id}/photos
pub async fn commit_photos(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<CommitClientPhotosRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let uploads: Vec<CommittedUpload> = req
        .uploads
        .into_iter()
        .map(|upload| CommittedUpload {
            path: upload.path,
            original_name: upload.original_name,
        })
        .collect();

    let photos = state
        .upload_service
        .commit_client_photos(&session.ctx, ClientGalleryId::from(id), &uploads)
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": photos })))
}

/// DELETE /api/admin/client-galleries/{id}/photos
pub async fn delete_photo(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<DeletePhotoRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .gallery_service
        .delete_photo(&session.ctx, ClientGalleryId::from(id), &req.image_url)
        .await
        .map_err(ApiError)?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Photo deleted" } }),
    ))
}

/// GET /api/admin/client-galleries/{id}/lightroom
///
/// Plain-text list of liked filenames, served as a download.
pub async fn lightroom_export(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let list = state
        .export_service
        .lightroom_list(&session.ctx, ClientGalleryId::from(id))
        .await
        .map_err(ApiError)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"lightroom-selection.txt\"".to_string(),
            ),
        ],
        list,
    ))
}
