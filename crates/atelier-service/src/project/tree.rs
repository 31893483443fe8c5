//! Project tree building.

use std::sync::Arc;

use atelier_core::result::AppResult;
use atelier_core::types::ProjectId;
use atelier_database::repositories::project::ProjectRepository;
use atelier_entity::project::tree::{current_view, ProjectTree};
use atelier_entity::project::Project;

/// Builds display trees and scoped sibling views from the flat project
/// table.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Project repository.
    projects: Arc<ProjectRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(projects: Arc<ProjectRepository>) -> Self {
        Self { projects }
    }

    /// The full admin tree, rebuilt from scratch on every call.
    pub async fn tree(&self) -> AppResult<ProjectTree> {
        let all = self.projects.find_all().await?;
        Ok(ProjectTree::build(all))
    }

    /// The published-only tree for the public site.
    pub async fn published_tree(&self) -> AppResult<ProjectTree> {
        let published = self.projects.find_published().await?;
        Ok(ProjectTree::build(published))
    }

    /// One sibling group (root level for `None`), the scope of a single
    /// drag-and-drop session.
    pub async fn view(&self, focused: Option<ProjectId>) -> AppResult<Vec<Project>> {
        let all = self.projects.find_all().await?;
        Ok(current_view(&all, focused))
    }
}
