//! Two-level project tree for display and drag-and-drop targeting.
//!
//! The tree is a tagged structure: a root item is either a leaf project
//! or a collection whose children are leaf projects. Deeper nesting is
//! unrepresentable.

use serde::{Deserialize, Serialize};

use atelier_core::types::ProjectId;

use super::model::Project;

/// A root-level item of the project tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeItem {
    /// A plain project.
    Leaf(Project),
    /// A collection and its direct children, ordered by `order_index`.
    Collection {
        /// The collection record itself.
        project: Project,
        /// Child projects, ordered by `order_index`.
        children: Vec<Project>,
    },
}

impl TreeItem {
    /// The underlying project record.
    pub fn project(&self) -> &Project {
        match self {
            TreeItem::Leaf(project) => project,
            TreeItem::Collection { project, .. } => project,
        }
    }
}

/// The full two-level tree of projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTree {
    /// Root-level items, ordered by `order_index`.
    pub items: Vec<TreeItem>,
}

impl ProjectTree {
    /// Build the tree from a flat list of project records.
    ///
    /// Roots are records with `parent_id = NULL`; each collection root
    /// gets its direct children attached, sorted by `order_index`. The
    /// view is recomputed from scratch on every fetch, never maintained
    /// incrementally.
    pub fn build(all: Vec<Project>) -> Self {
        let (mut roots, children): (Vec<Project>, Vec<Project>) =
            all.into_iter().partition(|p| p.parent_id.is_none());
        roots.sort_by_key(|p| p.order_index);

        let items = roots
            .into_iter()
            .map(|root| {
                if root.is_collection {
                    let mut own: Vec<Project> = children
                        .iter()
                        .filter(|c| c.parent_id == Some(root.id))
                        .cloned()
                        .collect();
                    own.sort_by_key(|p| p.order_index);
                    TreeItem::Collection {
                        project: root,
                        children: own,
                    }
                } else {
                    TreeItem::Leaf(root)
                }
            })
            .collect();

        Self { items }
    }

    /// Number of root-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the tree has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Return one sibling group sorted by `order_index`: the root level when
/// `focused` is `None`, otherwise the children of the given collection.
///
/// Display and reordering are both scoped to a single sibling group at a
/// time, so a reorder can never mix items across levels.
pub fn current_view(all: &[Project], focused: Option<ProjectId>) -> Vec<Project> {
    let mut group: Vec<Project> = all
        .iter()
        .filter(|p| p.parent_id == focused)
        .cloned()
        .collect();
    group.sort_by_key(|p| p.order_index);
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::model::TitleStyle;
    use chrono::Utc;

    fn project(name: &str, order: i32, collection: bool, parent: Option<ProjectId>) -> Project {
        Project {
            id: ProjectId::new(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            is_published: false,
            order_index: order,
            is_collection: collection,
            parent_id: parent,
            description_cs: None,
            description_en: None,
            main_image_url: None,
            title_style: TitleStyle::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_partitions_roots_and_children() {
        let weddings = project("Weddings", 1, true, None);
        let weddings_id = weddings.id;
        let all = vec![
            project("Portraits", 0, false, None),
            weddings,
            project("Nature", 2, false, None),
            project("Summer", 1, false, Some(weddings_id)),
            project("Winter", 0, false, Some(weddings_id)),
        ];

        let tree = ProjectTree::build(all);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.items[0].project().name, "Portraits");
        match &tree.items[1] {
            TreeItem::Collection { project, children } => {
                assert_eq!(project.name, "Weddings");
                let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, ["Winter", "Summer"]);
            }
            TreeItem::Leaf(_) => panic!("Weddings should be a collection"),
        }
    }

    #[test]
    fn test_current_view_scopes_one_sibling_group() {
        let weddings = project("Weddings", 0, true, None);
        let weddings_id = weddings.id;
        let all = vec![
            weddings,
            project("Portraits", 1, false, None),
            project("Summer", 0, false, Some(weddings_id)),
        ];

        let roots = current_view(&all, None);
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|p| p.parent_id.is_none()));

        let children = current_view(&all, Some(weddings_id));
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "Summer");
    }

    #[test]
    fn test_empty_collection_keeps_empty_children() {
        let tree = ProjectTree::build(vec![project("Archive", 0, true, None)]);
        match &tree.items[0] {
            TreeItem::Collection { children, .. } => assert!(children.is_empty()),
            TreeItem::Leaf(_) => panic!("expected a collection"),
        }
    }
}
