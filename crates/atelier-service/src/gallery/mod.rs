//! Client proofing galleries.

pub mod export;
pub mod link;
pub mod service;

pub use export::ExportService;
pub use link::LinkService;
pub use service::GalleryService;
