//! Project CRUD, ordering, and upload handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use atelier_core::error::AppError;
use atelier_core::types::ProjectId;
use atelier_entity::project::TitleStyle;
use atelier_service::project::service::CreateProjectRequest as SvcCreateProject;

use crate::dto::request::{
    CommitMainImageRequest, CommitPhotosRequest, CreateProjectRequest, DeletePhotoRequest,
    MoveProjectRequest, ProjectUploadUrlRequest, RenameProjectRequest, ReorderRequest,
    UpdateDescriptionsRequest, UpdateTitleStyleRequest,
};
use crate::error::ApiError;
use crate::extractors::AdminSession;
use crate::state::AppState;

/// GET /api/admin/projects
pub async fn list_tree(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tree = state.tree_service.tree().await.map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": tree })))
}

/// GET /api/admin/projects/view?collection_id=...
pub async fn sibling_view(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let focused = params
        .get("collection_id")
        .map(|raw| raw.parse::<Uuid>())
        .transpose()
        .map_err(|_| ApiError(AppError::validation("Invalid collection_id")))?
        .map(ProjectId::from);

    let group = state.tree_service.view(focused).await.map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": group })))
}

/// POST /api/admin/projects
pub async fn create_project(
    State(state): State<AppState>,
    session: AdminSession,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let project = state
        .project_service
        .create_project(
            &session.ctx,
            SvcCreateProject {
                name: req.name,
                is_collection: req.is_collection,
                description_cs: req.description_cs,
                description_en: req.description_en,
            },
        )
        .await
        .map_err(ApiError)?;

    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}

/// GET /api/admin/projects/{id}
pub async fn project_detail(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (project, photos) = state
        .project_service
        .project_detail(ProjectId::from(id))
        .await
        .map_err(ApiError)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "project": project, "photos": photos }
    })))
}

/// DELETE /api/admin/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .project_service
        .delete_project(&session.ctx, ProjectId::from(id))
        .await
        .map_err(ApiError)?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Project deleted" } }),
    ))
}

/// PUT /api/admin/projects/{id}/name
pub async fn rename_project(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameProjectRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let project = state
        .project_service
        .rename_project(&session.ctx, ProjectId::from(id), &req.name)
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}

/// PUT /api/admin/projects/{id}/visibility
pub async fn toggle_visibility(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let project = state
        .project_service
        .toggle_visibility(&session.ctx, ProjectId::from(id))
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}

/// PUT /api/admin/projects/{id}/title-style
pub async fn update_title_style(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTitleStyleRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let style = parse_title_style(&req.title_style).map_err(ApiError)?;
    let project = state
        .project_service
        .set_title_style(&session.ctx, ProjectId::from(id), style)
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}

/// PUT /api/admin/projects/{id}/descriptions
pub async fn update_descriptions(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDescriptionsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let project = state
        .project_service
        .update_descriptions(
            &session.ctx,
            ProjectId::from(id),
            req.description_cs.as_deref(),
            req.description_en.as_deref(),
        )
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}

/// PUT /api/admin/projects/reorder
pub async fn reorder(
    State(state): State<AppState>,
    session: AdminSession,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group = state
        .ordering_service
        .reorder(
            &session.ctx,
            req.parent_id.map(ProjectId::from),
            req.from,
            req.to,
        )
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": group })))
}

/// PUT /api/admin/projects/{id}/move
pub async fn move_project(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveProjectRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let project = state
        .ordering_service
        .move_to_collection(
            &session.ctx,
            ProjectId::from(id),
            req.new_parent_id.map(ProjectId::from),
        )
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}

/// POST /api/admin/projects/{id}/upload-url
pub async fn create_upload_url(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<ProjectUploadUrlRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let signed = state
        .upload_service
        .project_upload_url(&session.ctx, ProjectId::from(id), &req.file_name, req.is_main)
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": signed })))
}

/// POST /api/admin/projects/{id}/photos
pub async fn commit_photos(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<CommitPhotosRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let photos = state
        .upload_service
        .commit_project_photos(&session.ctx, ProjectId::from(id), &req.paths)
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": photos })))
}

/// POST /api/admin/projects/{id}/main-image
pub async fn commit_main_image(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<CommitMainImageRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let project = state
        .upload_service
        .commit_project_main(&session.ctx, ProjectId::from(id), &req.path)
        .await
        .map_err(ApiError)?;
    Ok(Json(serde_json::json!({ "success": true, "data": project })))
}

/// DELETE /api/admin/projects/{id}/photos
pub async fn delete_photo(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(req): Json<DeletePhotoRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .project_service
        .delete_photo(&session.ctx, ProjectId::from(id), &req.image_url)
        .await
        .map_err(ApiError)?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Photo deleted" } }),
    ))
}

fn parse_title_style(s: &str) -> Result<TitleStyle, AppError> {
    match s {
        "white_text" => Ok(TitleStyle::WhiteText),
        "white_on_black" => Ok(TitleStyle::WhiteOnBlack),
        "black_text" => Ok(TitleStyle::BlackText),
        "black_on_white" => Ok(TitleStyle::BlackOnWhite),
        _ => Err(AppError::validation(format!("Invalid title style: {s}"))),
    }
}
