//! Storage provider trait for pluggable photo storage backends.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A time-limited, pre-authorized upload target for a single object.
///
/// The URL permits a direct client-to-storage `PUT` without routing the
/// file bytes through the application server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUpload {
    /// Path of the object within the provider.
    pub path: String,
    /// Pre-authorized upload URL.
    pub url: String,
    /// When the URL stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Trait for photo storage backends.
///
/// Implementations exist for the local filesystem and S3-compatible
/// object storage. The [`StorageProvider`] trait is defined here in
/// `atelier-core` and implemented in `atelier-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write bytes to an object at the given path.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete the object at the given path.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether an object exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Mint a signed upload URL for the given path.
    async fn signed_upload_url(&self, path: &str) -> AppResult<SignedUpload>;

    /// Resolve a stored path to its public URL.
    fn public_url(&self, path: &str) -> String;
}
