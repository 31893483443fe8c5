//! # atelier-entity
//!
//! Entity models for Atelier: projects and collections, gallery photos,
//! client proofing galleries, client selections, and the invoice
//! document. Pure domain structures (project tree, ordering engine,
//! selection state machine) live here as well so they can be exercised
//! without a database.

pub mod client_gallery;
pub mod client_photo;
pub mod invoice;
pub mod photo;
pub mod project;
pub mod selection;
