//! Local filesystem storage provider.
//!
//! Signed upload URLs are emulated with one-time tokens: the minted URL
//! points at the server's own upload endpoint, which resolves the token
//! back to a storage path through [`LocalStorageProvider::complete_signed_upload`].

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::traits::storage::{SignedUpload, StorageProvider};

/// A pending one-time upload token.
#[derive(Debug, Clone)]
struct PendingUpload {
    path: String,
    expires_at: DateTime<Utc>,
}

/// Filesystem-backed storage provider.
#[derive(Debug)]
pub struct LocalStorageProvider {
    /// Root directory all objects live under.
    root: PathBuf,
    /// Base URL under which stored objects are publicly served.
    public_base_url: String,
    /// Base URL of the server itself, for minting upload URLs.
    server_base_url: String,
    /// Signed upload URL lifetime.
    upload_ttl: Duration,
    /// Outstanding one-time upload tokens.
    pending: DashMap<String, PendingUpload>,
}

impl LocalStorageProvider {
    /// Create a new local provider rooted at the given directory.
    pub fn new(
        root: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
        server_base_url: impl Into<String>,
        upload_ttl_seconds: u64,
    ) -> Self {
        Self {
            root: root.into(),
            public_base_url: trim_trailing_slash(public_base_url.into()),
            server_base_url: trim_trailing_slash(server_base_url.into()),
            upload_ttl: Duration::seconds(upload_ttl_seconds as i64),
            pending: DashMap::new(),
        }
    }

    /// Resolve a relative object path against the root, rejecting any
    /// traversal outside it.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if escapes || path.is_empty() {
            return Err(AppError::validation(format!("Invalid storage path '{path}'")));
        }
        Ok(self.root.join(relative))
    }

    /// Accept the bytes for a previously minted upload token.
    ///
    /// Returns the storage path the object was written to. The token is
    /// consumed whether or not the write succeeds.
    pub async fn complete_signed_upload(&self, token: &str, data: Bytes) -> AppResult<String> {
        self.purge_expired();

        let (_, pending) = self
            .pending
            .remove(token)
            .ok_or_else(|| AppError::not_found("Unknown or already used upload token"))?;

        if pending.expires_at <= Utc::now() {
            return Err(AppError::validation("Upload token has expired"));
        }

        self.write(&pending.path, data).await?;
        Ok(pending.path)
    }

    fn purge_expired(&self) {
        let now = Utc::now();
        self.pending.retain(|_, pending| pending.expires_at > now);
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(true)
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &data).await?;
        tracing::debug!(path, bytes = data.len(), "Stored object locally");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let target = self.resolve(path)?;
        Ok(tokio::fs::try_exists(&target).await?)
    }

    async fn signed_upload_url(&self, path: &str) -> AppResult<SignedUpload> {
        // Validate the path before handing out a token for it.
        self.resolve(path)?;
        self.purge_expired();

        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + self.upload_ttl;
        self.pending.insert(
            token.clone(),
            PendingUpload {
                path: path.to_string(),
                expires_at,
            },
        );

        Ok(SignedUpload {
            path: path.to_string(),
            url: format!("{}/api/uploads/{}", self.server_base_url, token),
            expires_at,
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(root: &std::path::Path) -> LocalStorageProvider {
        LocalStorageProvider::new(
            root,
            "http://localhost:8080/photos/",
            "http://localhost:8080",
            600,
        )
    }

    #[tokio::test]
    async fn test_write_exists_delete_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = provider(dir.path());

        provider
            .write("g1/photo.jpg", Bytes::from_static(b"bytes"))
            .await
            .expect("write");
        assert!(provider.exists("g1/photo.jpg").await.expect("exists"));

        provider.delete("g1/photo.jpg").await.expect("delete");
        assert!(!provider.exists("g1/photo.jpg").await.expect("exists"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = provider(dir.path());
        provider.delete("nope.jpg").await.expect("idempotent delete");
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = provider(dir.path());
        assert!(provider
            .write("../escape.jpg", Bytes::from_static(b"x"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_signed_upload_token_is_one_time() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = provider(dir.path());

        let signed = provider
            .signed_upload_url("g1/proof.jpg")
            .await
            .expect("signed url");
        let token = signed.url.rsplit('/').next().unwrap().to_string();

        let path = provider
            .complete_signed_upload(&token, Bytes::from_static(b"img"))
            .await
            .expect("upload");
        assert_eq!(path, "g1/proof.jpg");
        assert!(provider.exists("g1/proof.jpg").await.expect("exists"));

        assert!(provider
            .complete_signed_upload(&token, Bytes::from_static(b"img"))
            .await
            .is_err());
    }

    #[test]
    fn test_public_url_joins_cleanly() {
        let provider = provider(std::path::Path::new("/tmp"));
        assert_eq!(
            provider.public_url("g1/photo.jpg"),
            "http://localhost:8080/photos/g1/photo.jpg"
        );
    }
}
