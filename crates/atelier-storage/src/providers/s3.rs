//! S3-compatible object storage provider.
//!
//! Signed upload URLs are real S3 presigned `PUT` requests, so clients
//! write photo bytes straight to the bucket without routing them
//! through the application server.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::Utc;

use atelier_core::config::storage::S3StorageConfig;
use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_core::traits::storage::{SignedUpload, StorageProvider};

/// S3-compatible storage provider.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
    upload_ttl: Duration,
}

impl S3StorageProvider {
    /// Create a new S3 provider from configuration.
    pub fn new(config: &S3StorageConfig, upload_ttl_seconds: u64) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("S3 bucket name is required"));
        }

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "atelier-config",
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        // Custom endpoints (MinIO and friends) need path-style addressing.
        if !config.endpoint.is_empty() {
            builder = builder
                .endpoint_url(config.endpoint.clone())
                .force_path_style(true);
        }

        let client = aws_sdk_s3::Client::from_conf(builder.build());

        let public_base_url = if !config.public_base_url.is_empty() {
            config.public_base_url.trim_end_matches('/').to_string()
        } else if !config.endpoint.is_empty() {
            format!(
                "{}/{}",
                config.endpoint.trim_end_matches('/'),
                config.bucket
            )
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com",
                config.bucket, config.region
            )
        };

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            "Initialized S3 storage provider"
        );

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url,
            upload_ttl: Duration::from_secs(upload_ttl_seconds),
        })
    }
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("S3 bucket '{}' is not reachable", self.bucket),
                    e,
                )
            })?;
        Ok(true)
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write object '{path}'"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object '{path}'"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to stat object '{path}'"),
                        service_err,
                    ))
                }
            }
        }
    }

    async fn signed_upload_url(&self, path: &str) -> AppResult<SignedUpload> {
        let presigning = PresigningConfig::expires_in(self.upload_ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presigning expiry", e)
        })?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign upload for '{path}'"),
                    e,
                )
            })?;

        Ok(SignedUpload {
            path: path.to_string(),
            url: presigned.uri().to_string(),
            expires_at: Utc::now() + chrono::Duration::from_std(self.upload_ttl).unwrap_or_default(),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}
