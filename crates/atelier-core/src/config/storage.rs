//! Photo storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider to use (`local` or `s3`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum upload size in bytes per file (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Lifetime of signed upload URLs in seconds.
    #[serde(default = "default_signed_url_expiry")]
    pub signed_url_expiry_seconds: u64,
    /// Image compression settings applied before upload.
    #[serde(default)]
    pub image: ImageConfig,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

/// Image compression bounds for the upload pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Longest allowed edge after resize, in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// JPEG re-encode quality (1-100).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for stored photos.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL under which stored photos are served.
    #[serde(default = "default_local_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_local_base_url(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Public base URL for resolving stored paths (CDN or bucket endpoint).
    #[serde(default)]
    pub public_base_url: String,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MB
}

fn default_signed_url_expiry() -> u64 {
    600
}

fn default_max_dimension() -> u32 {
    2560
}

fn default_jpeg_quality() -> u8 {
    82
}

fn default_local_root() -> String {
    "./data/photos".to_string()
}

fn default_local_base_url() -> String {
    "http://localhost:8080/photos".to_string()
}

fn default_region() -> String {
    "eu-central-1".to_string()
}

fn default_bucket() -> String {
    "photos".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_defaults_are_bounded() {
        let image = ImageConfig::default();
        assert_eq!(image.max_dimension, 2560);
        assert!(image.jpeg_quality <= 100);
    }
}
