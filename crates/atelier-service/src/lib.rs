//! # atelier-service
//!
//! Domain services for Atelier. Everything stateful talks to the
//! persistence gateway through the repository structs; the pure pieces
//! (slug derivation, ordering, tree building, selection state) come
//! from `atelier-entity` and are orchestrated here.

pub mod context;
pub mod gallery;
pub mod invoice;
pub mod project;
pub mod selection;
pub mod upload;

pub use context::RequestContext;
