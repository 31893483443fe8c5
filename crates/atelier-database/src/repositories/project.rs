//! Project repository implementation.

use futures::future::join_all;
use sqlx::PgPool;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_core::types::ProjectId;
use atelier_entity::project::ordering::OrderAssignment;
use atelier_entity::project::{CreateProject, Project, TitleStyle};

/// Repository for project CRUD, sibling-group queries, and batch
/// ordering commits.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// Find a project by its slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find project by slug", e)
            })
    }

    /// Whether any project already uses the given slug.
    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE slug = $1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check slug", e))?;
        Ok(count > 0)
    }

    /// List every project ordered by `order_index`.
    pub async fn find_all(&self) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY order_index ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    /// List one sibling group (root level for `None`), ordered by
    /// `order_index`.
    pub async fn find_siblings(&self, parent_id: Option<ProjectId>) -> AppResult<Vec<Project>> {
        let query = match parent_id {
            Some(parent) => sqlx::query_as::<_, Project>(
                "SELECT * FROM projects WHERE parent_id = $1 ORDER BY order_index ASC",
            )
            .bind(parent),
            None => sqlx::query_as::<_, Project>(
                "SELECT * FROM projects WHERE parent_id IS NULL ORDER BY order_index ASC",
            ),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list siblings", e))
    }

    /// Count root-level projects (used to append new projects).
    pub async fn count_roots(&self) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE parent_id IS NULL")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count projects", e)
                })?;
        Ok(count as u64)
    }

    /// Count direct children of a collection.
    pub async fn count_children(&self, id: ProjectId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE parent_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count children", e)
            })?;
        Ok(count as u64)
    }

    /// Create a new root-level project.
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects \
                (name, slug, order_index, is_collection, description_cs, description_en) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(data.order_index)
        .bind(data.is_collection)
        .bind(&data.description_cs)
        .bind(&data.description_en)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("projects_slug_key") =>
            {
                AppError::conflict(format!("Slug '{}' already exists", data.slug))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create project", e),
        })
    }

    /// Rename a project and store its re-derived slug.
    pub async fn update_name(
        &self,
        id: ProjectId,
        name: &str,
        slug: &str,
    ) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET name = $2, slug = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("projects_slug_key") =>
            {
                AppError::conflict(format!("Slug '{slug}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to rename project", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Set the published flag.
    pub async fn set_published(&self, id: ProjectId, is_published: bool) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET is_published = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update visibility", e))?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Update the bilingual descriptions.
    pub async fn update_descriptions(
        &self,
        id: ProjectId,
        description_cs: Option<&str>,
        description_en: Option<&str>,
    ) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET description_cs = $2, description_en = $3 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(description_cs)
        .bind(description_en)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update descriptions", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Set the title rendering style.
    pub async fn set_title_style(&self, id: ProjectId, style: TitleStyle) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET title_style = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(style)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update title style", e))?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Set or clear the cover image URL.
    pub async fn set_main_image(
        &self,
        id: ProjectId,
        main_image_url: Option<&str>,
    ) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET main_image_url = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(main_image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update main image", e))?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Move a project to another parent (or to the root with `None`).
    pub async fn set_parent(
        &self,
        id: ProjectId,
        parent_id: Option<ProjectId>,
        order_index: i32,
    ) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET parent_id = $2, order_index = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .bind(order_index)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move project", e))?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Commit a batch of `order_index` assignments.
    ///
    /// Each row is written by its own concurrent UPDATE joined by a
    /// wait-for-all barrier; if any write fails the whole batch is
    /// reported as failed with the first error found.
    pub async fn update_order_indexes(&self, assignments: &[OrderAssignment]) -> AppResult<()> {
        let updates = assignments.iter().map(|(id, order_index)| {
            sqlx::query("UPDATE projects SET order_index = $2 WHERE id = $1")
                .bind(*id)
                .bind(*order_index)
                .execute(&self.pool)
        });

        let results = join_all(updates).await;
        if let Some(first_error) = results.into_iter().find_map(|r| r.err()) {
            return Err(AppError::with_source(
                ErrorKind::Database,
                format!("Failed to save ordering: {first_error}"),
                first_error,
            ));
        }

        Ok(())
    }

    /// Delete a project. Returns the number of affected rows so callers
    /// can distinguish "nothing to delete" from success.
    pub async fn delete(&self, id: ProjectId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project", e)
            })?;
        Ok(result.rows_affected())
    }

    /// List published root-level projects and children for the public
    /// site.
    pub async fn find_published(&self) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE is_published = TRUE ORDER BY order_index ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list published projects", e)
        })
    }
}
