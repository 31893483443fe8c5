//! Sibling-group reordering and collection moves.

use std::sync::Arc;

use tracing::info;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::types::ProjectId;
use atelier_database::repositories::project::ProjectRepository;
use atelier_entity::project::ordering;
use atelier_entity::project::Project;

use crate::context::RequestContext;

/// Applies ordering operations and commits every affected row as one
/// batch.
#[derive(Debug, Clone)]
pub struct OrderingService {
    /// Project repository.
    projects: Arc<ProjectRepository>,
}

impl OrderingService {
    /// Creates a new ordering service.
    pub fn new(projects: Arc<ProjectRepository>) -> Self {
        Self { projects }
    }

    /// Moves the item at `from` to `to` within one sibling group
    /// (`None` = the root level) and rewrites the whole group's
    /// `order_index` sequence.
    ///
    /// The commit covers every row of the group; if any write fails the
    /// whole reorder is reported as failed.
    pub async fn reorder(
        &self,
        ctx: &RequestContext,
        parent_id: Option<ProjectId>,
        from: usize,
        to: usize,
    ) -> AppResult<Vec<Project>> {
        ctx.require_admin()?;

        let group = self.projects.find_siblings(parent_id).await?;
        let assignments = ordering::reorder(&group, from, to)?;
        self.projects.update_order_indexes(&assignments).await?;

        info!(
            parent_id = ?parent_id,
            from,
            to,
            group_size = assignments.len(),
            "Sibling group reordered"
        );

        self.projects.find_siblings(parent_id).await
    }

    /// Moves a project into a collection (or back to the root with
    /// `None`), appending it to the destination group.
    ///
    /// Both the source and the destination sibling groups are
    /// renumbered in the same batch commit, so neither is left with a
    /// gap in its `order_index` sequence.
    pub async fn move_to_collection(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        new_parent_id: Option<ProjectId>,
    ) -> AppResult<Project> {
        ctx.require_admin()?;

        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        if let Some(parent_id) = new_parent_id {
            if parent_id == project_id {
                return Err(AppError::validation(
                    "Cannot move a project into itself",
                ));
            }
            if project.is_collection {
                return Err(AppError::validation(
                    "Collections cannot be nested inside other collections",
                ));
            }
            let target = self
                .projects
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::not_found("Target collection not found"))?;
            if !target.is_collection {
                return Err(AppError::validation(
                    "Target project is not a collection",
                ));
            }
        }

        let old_parent_id = project.parent_id;
        if old_parent_id == new_parent_id {
            return Ok(project);
        }

        // Append at the end of the destination group.
        let destination = self.projects.find_siblings(new_parent_id).await?;
        let moved = self
            .projects
            .set_parent(project_id, new_parent_id, destination.len() as i32)
            .await?;

        // Renumber both affected groups in one commit.
        let source_after = self.projects.find_siblings(old_parent_id).await?;
        let destination_after = self.projects.find_siblings(new_parent_id).await?;

        let mut assignments = ordering::renumber(&source_after);
        assignments.extend(ordering::renumber(&destination_after));
        self.projects.update_order_indexes(&assignments).await?;

        info!(
            project_id = %project_id,
            old_parent = ?old_parent_id,
            new_parent = ?new_parent_id,
            "Project moved"
        );

        Ok(moved)
    }
}
