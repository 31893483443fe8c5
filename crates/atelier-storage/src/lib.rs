//! # atelier-storage
//!
//! Photo storage backends for Atelier. Implements the
//! [`atelier_core::traits::StorageProvider`] trait for the local
//! filesystem and S3-compatible object storage, plus the image
//! compressor used by the upload pipeline.

pub mod image;
pub mod manager;
pub mod providers;
