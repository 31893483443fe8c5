//! Client proofing gallery entity.

pub mod model;

pub use model::{ClientGallery, ClientGalleryWithCounts, CreateClientGallery};
