//! The photo upload pipeline.

pub mod pipeline;
pub mod progress;
pub mod service;

pub use pipeline::{HttpTransport, UploadFile, UploadPipeline, UploadTransport, UploadedObject};
pub use progress::UploadProgress;
pub use service::UploadService;
