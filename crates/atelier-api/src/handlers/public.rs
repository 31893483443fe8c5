//! Public handlers: the client gallery page, selection actions, and the
//! published portfolio.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_core::types::{ClientPhotoId, Locale};

use crate::dto::request::CommentRequest;
use crate::error::ApiError;
use crate::extractors::RequestLocale;
use crate::state::AppState;

/// GET /{lang}/gallery/{hash}
///
/// The shared proofing gallery. The share hash in the path is the sole
/// access credential.
pub async fn gallery_page(
    State(state): State<AppState>,
    Path((lang, hash)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let locale: Locale = lang
        .parse()
        .map_err(|_| ApiError(AppError::not_found("Unknown locale")))?;

    let view = state
        .gallery_service
        .public_view(&hash)
        .await
        .map_err(ApiError)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "locale": locale, "view": view }
    })))
}

/// POST /api/gallery/{hash}/photos/{photo_id}/like
///
/// Records the like and returns immediately; the write lands in the
/// background through the coalescing reconciler.
pub async fn like_photo(
    State(state): State<AppState>,
    Path((hash, photo_id)): Path<(String, Uuid)>,
) -> Json<serde_json::Value> {
    state
        .selection_service
        .like(&hash, ClientPhotoId::from(photo_id));
    Json(serde_json::json!({ "success": true }))
}

/// DELETE /api/gallery/{hash}/photos/{photo_id}/like
pub async fn unlike_photo(
    State(state): State<AppState>,
    Path((hash, photo_id)): Path<(String, Uuid)>,
) -> Json<serde_json::Value> {
    state
        .selection_service
        .unlike(&hash, ClientPhotoId::from(photo_id));
    Json(serde_json::json!({ "success": true }))
}

/// PUT /api/gallery/{hash}/photos/{photo_id}/comment
pub async fn comment_photo(
    State(state): State<AppState>,
    Path((hash, photo_id)): Path<(String, Uuid)>,
    Json(req): Json<CommentRequest>,
) -> Json<serde_json::Value> {
    state
        .selection_service
        .comment(&hash, ClientPhotoId::from(photo_id), &req.comment);
    Json(serde_json::json!({ "success": true }))
}

/// GET /api/site/projects
///
/// The published portfolio tree for the public site.
pub async fn site_projects(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tree = state
        .tree_service
        .published_tree()
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "locale": locale, "tree": tree }
    })))
}

/// GET /api/site/projects/{slug}
pub async fn site_project_by_slug(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (project, photos) = state
        .project_service
        .published_by_slug(&slug)
        .await
        .map_err(ApiError)?;

    let description = project.description(locale).map(str::to_string);
    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "locale": locale,
            "project": project,
            "description": description,
            "photos": photos,
        }
    })))
}
