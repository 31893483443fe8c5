//! Repository structs, one per table.

pub mod client_gallery;
pub mod client_photo;
pub mod photo;
pub mod project;
pub mod selection;

pub use client_gallery::ClientGalleryRepository;
pub use client_photo::ClientPhotoRepository;
pub use photo::PhotoRepository;
pub use project::ProjectRepository;
pub use selection::SelectionRepository;
