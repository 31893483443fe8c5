//! Project CRUD operations.

use std::sync::Arc;

use tracing::info;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::traits::storage::StorageProvider;
use atelier_core::types::ProjectId;
use atelier_database::repositories::photo::PhotoRepository;
use atelier_database::repositories::project::ProjectRepository;
use atelier_entity::photo::Photo;
use atelier_entity::project::{CreateProject, Project, TitleStyle};

use crate::context::RequestContext;
use crate::project::slug;

/// Request to create a new project or collection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateProjectRequest {
    /// Display name.
    pub name: String,
    /// Whether the new project is a collection.
    #[serde(default)]
    pub is_collection: bool,
    /// Czech description.
    pub description_cs: Option<String>,
    /// English description.
    pub description_en: Option<String>,
}

/// Manages project CRUD operations.
#[derive(Debug, Clone)]
pub struct ProjectService {
    /// Project repository.
    projects: Arc<ProjectRepository>,
    /// Photo repository.
    photos: Arc<PhotoRepository>,
    /// Storage provider, for best-effort object deletes.
    storage: Arc<dyn StorageProvider>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        projects: Arc<ProjectRepository>,
        photos: Arc<PhotoRepository>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            projects,
            photos,
            storage,
        }
    }

    /// Creates a new root-level project.
    ///
    /// The slug is derived from the name with a single existence check;
    /// on collision a timestamp suffix is appended. The new project is
    /// appended to the root sibling group and starts unpublished.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        req: CreateProjectRequest,
    ) -> AppResult<Project> {
        ctx.require_admin()?;

        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Project name is required"));
        }

        let base = slug::slugify(&name);
        if base.is_empty() {
            return Err(AppError::validation(
                "Project name must contain at least one letter or digit",
            ));
        }

        let slug = if self.projects.slug_exists(&base).await? {
            slug::with_unique_suffix(&base)
        } else {
            base
        };

        let order_index = self.projects.count_roots().await? as i32;

        let project = self
            .projects
            .create(&CreateProject {
                name,
                slug,
                order_index,
                is_collection: req.is_collection,
                description_cs: req.description_cs.filter(|d| !d.trim().is_empty()),
                description_en: req.description_en.filter(|d| !d.trim().is_empty()),
            })
            .await?;

        info!(
            project_id = %project.id,
            slug = %project.slug,
            is_collection = project.is_collection,
            "Project created"
        );

        Ok(project)
    }

    /// Fetches a project or fails with not-found.
    pub async fn get_project(&self, id: ProjectId) -> AppResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))
    }

    /// A project together with its ordered gallery.
    pub async fn project_detail(&self, id: ProjectId) -> AppResult<(Project, Vec<Photo>)> {
        let project = self.get_project(id).await?;
        let photos = self.photos.find_by_project(id).await?;
        Ok((project, photos))
    }

    /// A published project looked up by slug, with its gallery.
    pub async fn published_by_slug(&self, slug: &str) -> AppResult<(Project, Vec<Photo>)> {
        let project = self
            .projects
            .find_by_slug(slug)
            .await?
            .filter(|p| p.is_published)
            .ok_or_else(|| AppError::not_found("Project not found"))?;
        let photos = self.photos.find_by_project(project.id).await?;
        Ok((project, photos))
    }

    /// Renames a project; the slug is re-derived from the new name.
    ///
    /// Rename does no pre-check on the derived slug — the unique index
    /// reports a collision as a conflict.
    pub async fn rename_project(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        new_name: &str,
    ) -> AppResult<Project> {
        ctx.require_admin()?;

        let name = new_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Project name is required"));
        }

        let new_slug = slug::slugify(name);
        let project = self.projects.update_name(id, name, &new_slug).await?;

        info!(project_id = %id, slug = %new_slug, "Project renamed");
        Ok(project)
    }

    /// Flips the published flag.
    pub async fn toggle_visibility(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
    ) -> AppResult<Project> {
        ctx.require_admin()?;

        let current = self.get_project(id).await?;
        let updated = self
            .projects
            .set_published(id, !current.is_published)
            .await?;

        info!(
            project_id = %id,
            is_published = updated.is_published,
            "Project visibility toggled"
        );
        Ok(updated)
    }

    /// Updates both description languages.
    pub async fn update_descriptions(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        description_cs: Option<&str>,
        description_en: Option<&str>,
    ) -> AppResult<Project> {
        ctx.require_admin()?;
        self.projects
            .update_descriptions(
                id,
                description_cs.map(str::trim).filter(|d| !d.is_empty()),
                description_en.map(str::trim).filter(|d| !d.is_empty()),
            )
            .await
    }

    /// Sets the title rendering style.
    pub async fn set_title_style(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        style: TitleStyle,
    ) -> AppResult<Project> {
        ctx.require_admin()?;
        self.projects.set_title_style(id, style).await
    }

    /// Deletes a project.
    ///
    /// A collection that still has children is refused with a distinct
    /// "not empty" error; a delete that affects zero rows is reported
    /// separately from success. Stored photo objects are not removed —
    /// orphaned objects are an accepted cost.
    pub async fn delete_project(&self, ctx: &RequestContext, id: ProjectId) -> AppResult<()> {
        ctx.require_admin()?;

        let project = self.get_project(id).await?;
        if project.is_collection {
            let children = self.projects.count_children(id).await?;
            if children > 0 {
                return Err(AppError::precondition(format!(
                    "Collection '{}' is not empty ({children} projects inside)",
                    project.name
                )));
            }
        }

        let affected = self.projects.delete(id).await?;
        if affected == 0 {
            return Err(AppError::precondition(
                "Nothing was deleted — the project no longer exists",
            ));
        }

        info!(project_id = %id, slug = %project.slug, "Project deleted");
        Ok(())
    }

    /// Deletes one gallery photo by its public URL.
    ///
    /// The storage object delete is best-effort (a missing object is
    /// logged, not fatal); the database row delete is authoritative.
    pub async fn delete_photo(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        image_url: &str,
    ) -> AppResult<()> {
        ctx.require_admin()?;

        if let Some(path) = self.storage_path_of(image_url) {
            if let Err(e) = self.storage.delete(&path).await {
                tracing::warn!(path, error = %e, "Failed to delete stored object");
            }
        }

        let affected = self.photos.delete_by_image_url(image_url).await?;
        if affected == 0 {
            return Err(AppError::not_found("Photo not found"));
        }

        info!(project_id = %project_id, "Gallery photo deleted");
        Ok(())
    }

    /// Maps a public URL back to the provider path it was minted from.
    fn storage_path_of(&self, image_url: &str) -> Option<String> {
        let base = self.storage.public_url("");
        image_url
            .strip_prefix(&base)
            .filter(|path| !path.is_empty())
            .map(str::to_string)
    }
}
