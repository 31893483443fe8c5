//! Storage provider selection.

use std::sync::Arc;

use atelier_core::config::storage::StorageConfig;
use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::traits::storage::StorageProvider;

use crate::providers::local::LocalStorageProvider;
use crate::providers::s3::S3StorageProvider;

/// Owns the configured storage provider.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn StorageProvider>,
    /// Set when the local provider is active, so the API can mount its
    /// token-based upload endpoint.
    local: Option<Arc<LocalStorageProvider>>,
}

impl StorageManager {
    /// Build the provider named by the configuration.
    ///
    /// `server_base_url` is the server's own public URL, used by the
    /// local provider to mint upload URLs pointing back at the server.
    pub fn new(config: &StorageConfig, server_base_url: &str) -> AppResult<Self> {
        match config.provider.as_str() {
            "local" => {
                let local = Arc::new(LocalStorageProvider::new(
                    &config.local.root_path,
                    &config.local.public_base_url,
                    server_base_url,
                    config.signed_url_expiry_seconds,
                ));
                Ok(Self {
                    provider: Arc::clone(&local) as Arc<dyn StorageProvider>,
                    local: Some(local),
                })
            }
            "s3" => {
                let s3 = Arc::new(S3StorageProvider::new(
                    &config.s3,
                    config.signed_url_expiry_seconds,
                )?);
                Ok(Self {
                    provider: s3,
                    local: None,
                })
            }
            other => Err(AppError::configuration(format!(
                "Unknown storage provider '{other}'"
            ))),
        }
    }

    /// The active provider.
    pub fn provider(&self) -> Arc<dyn StorageProvider> {
        Arc::clone(&self.provider)
    }

    /// The local provider, when it is the active one.
    pub fn local(&self) -> Option<Arc<LocalStorageProvider>> {
        self.local.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::config::storage::StorageConfig;

    fn config(provider: &str) -> StorageConfig {
        let mut config = StorageConfig {
            provider: provider.to_string(),
            max_upload_size_bytes: 1024,
            signed_url_expiry_seconds: 60,
            image: Default::default(),
            local: Default::default(),
            s3: Default::default(),
        };
        config.local.root_path = "/tmp/atelier-test".to_string();
        config
    }

    #[test]
    fn test_local_provider_selected() {
        let manager = StorageManager::new(&config("local"), "http://localhost:8080").unwrap();
        assert_eq!(manager.provider().provider_type(), "local");
        assert!(manager.local().is_some());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(StorageManager::new(&config("ftp"), "http://localhost:8080").is_err());
    }
}
