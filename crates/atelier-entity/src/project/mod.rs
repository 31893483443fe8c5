//! Project and collection entities.

pub mod model;
pub mod ordering;
pub mod tree;

pub use model::{CreateProject, Project, TitleStyle};
pub use ordering::{renumber, reorder, OrderAssignment};
pub use tree::{current_view, ProjectTree, TreeItem};
