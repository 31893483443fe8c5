//! Project gallery photo entity.

pub mod model;

pub use model::{CreatePhoto, Photo};
