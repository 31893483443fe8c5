//! Project management: CRUD, slugs, ordering, and the display tree.

pub mod ordering;
pub mod service;
pub mod slug;
pub mod tree;

pub use ordering::OrderingService;
pub use service::ProjectService;
pub use tree::TreeService;
