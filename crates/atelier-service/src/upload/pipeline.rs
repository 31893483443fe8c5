//! The batch upload pipeline: compress → presign → direct PUT → commit.
//!
//! Stages run per-batch, not per-file-sequential: every file moves
//! through a strict compress → presign → upload pipeline of its own,
//! but the batch fans out concurrently at each stage and joins on a
//! wait-for-all barrier. Any failure fails the whole batch with an
//! aggregate error naming the files involved; objects that already
//! reached storage are not rolled back.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use futures::future::join_all;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::traits::storage::StorageProvider;
use atelier_storage::image::ImageCompressor;

use crate::upload::progress::UploadProgress;

/// One locally selected file entering the pipeline.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original file name, kept for the Lightroom export.
    pub file_name: String,
    /// Raw file bytes.
    pub data: Bytes,
}

/// One durably stored object leaving the pipeline.
#[derive(Debug, Clone)]
pub struct UploadedObject {
    /// Storage path of the object.
    pub path: String,
    /// Original file name before sanitization and re-encoding.
    pub original_name: String,
}

/// The seam that performs the direct-to-storage PUT against a signed
/// URL. Swappable so the pipeline is testable without a network.
#[async_trait]
pub trait UploadTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Upload the bytes to the pre-authorized URL.
    async fn put(&self, url: &str, data: Bytes) -> AppResult<()>;
}

/// reqwest-backed transport used in production.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a new HTTP transport.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn put(&self, url: &str, data: Bytes) -> AppResult<()> {
        let response = self
            .client
            .put(url)
            .body(data)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    atelier_core::error::ErrorKind::ExternalService,
                    format!("Upload request failed: {e}"),
                    e,
                )
            })?;

        response.error_for_status().map_err(|e| {
            AppError::with_source(
                atelier_core::error::ErrorKind::ExternalService,
                format!("Upload rejected by storage: {e}"),
                e,
            )
        })?;
        Ok(())
    }
}

/// Drives a batch of files through compression, signed-URL issuance,
/// and the direct upload, reporting per-file progress.
#[derive(Debug, Clone)]
pub struct UploadPipeline {
    provider: Arc<dyn StorageProvider>,
    transport: Arc<dyn UploadTransport>,
    compressor: ImageCompressor,
    max_file_bytes: u64,
}

impl UploadPipeline {
    /// Creates a new upload pipeline.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        transport: Arc<dyn UploadTransport>,
        compressor: ImageCompressor,
        max_file_bytes: u64,
    ) -> Self {
        Self {
            provider,
            transport,
            compressor,
            max_file_bytes,
        }
    }

    /// Run the whole batch. `prefix` is prepended verbatim to every
    /// object name (e.g. `client-galleries/<id>/` or `<project>/gallery-`).
    ///
    /// Returns the stored objects in input order. The metadata commit is
    /// left to the caller so all rows land in a single batch call.
    pub async fn run(
        &self,
        prefix: &str,
        files: Vec<UploadFile>,
        progress: &UploadProgress,
    ) -> AppResult<Vec<UploadedObject>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let oversized: Vec<&str> = files
            .iter()
            .filter(|f| f.data.len() as u64 > self.max_file_bytes)
            .map(|f| f.file_name.as_str())
            .collect();
        if !oversized.is_empty() {
            return Err(AppError::validation(format!(
                "Files exceed the {} byte limit: {}",
                self.max_file_bytes,
                oversized.join(", ")
            )));
        }

        // Stage 1: compress everything concurrently.
        let compressions = join_all(files.iter().map(|file| async {
            self.compressor
                .compress(&file.file_name, file.data.clone())
                .await
        }))
        .await;

        let mut compressed = Vec::with_capacity(files.len());
        let mut failed: Vec<String> = Vec::new();
        for (file, result) in files.iter().zip(compressions) {
            match result {
                Ok(image) => compressed.push((file.file_name.clone(), image)),
                Err(e) => failed.push(format!("{} ({})", file.file_name, e.message)),
            }
        }
        if !failed.is_empty() {
            return Err(AppError::validation(format!(
                "Compression failed for: {}",
                failed.join(", ")
            )));
        }

        // Stage 2: one signed upload target per file.
        let timestamp = Utc::now().timestamp_millis();
        let targets: Vec<(String, String, Bytes)> = compressed
            .into_iter()
            .map(|(original, image)| {
                let path = format!(
                    "{prefix}{timestamp}-{}",
                    sanitize_file_name(&image.file_name)
                );
                (original, path, image.data)
            })
            .collect();

        let signed = join_all(
            targets
                .iter()
                .map(|(_, path, _)| self.provider.signed_upload_url(path)),
        )
        .await;

        let mut uploads = Vec::with_capacity(targets.len());
        let mut failed: Vec<String> = Vec::new();
        for ((original, path, data), result) in targets.into_iter().zip(signed) {
            match result {
                Ok(signed) => uploads.push((original, path, data, signed.url)),
                Err(e) => failed.push(format!("{original} ({})", e.message)),
            }
        }
        if !failed.is_empty() {
            return Err(AppError::external_service(format!(
                "Could not prepare uploads for: {}",
                failed.join(", ")
            )));
        }

        // Stage 3: direct PUTs, all in parallel; progress counts only
        // confirmed successes.
        let puts = join_all(uploads.iter().map(|(_, _, data, url)| async {
            let result = self.transport.put(url, data.clone()).await;
            if result.is_ok() {
                progress.confirm_one();
            }
            result
        }))
        .await;

        let mut stored = Vec::with_capacity(uploads.len());
        let mut failed: Vec<String> = Vec::new();
        for ((original, path, _, _), result) in uploads.into_iter().zip(puts) {
            match result {
                Ok(()) => stored.push(UploadedObject {
                    path,
                    original_name: original,
                }),
                Err(e) => failed.push(format!("{original} ({})", e.message)),
            }
        }
        if !failed.is_empty() {
            return Err(AppError::external_service(format!(
                "Upload failed for: {}",
                failed.join(", ")
            )));
        }

        Ok(stored)
    }
}

/// Make a file name safe for storage paths: diacritics folded away,
/// whitespace runs replaced with a hyphen, anything that is not a word
/// character, dot, or hyphen dropped.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_whitespace() {
            pending_hyphen = !out.is_empty();
            continue;
        }
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            if pending_hyphen {
                out.push('-');
                pending_hyphen = false;
            }
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::config::storage::ImageConfig;
    use atelier_core::traits::storage::SignedUpload;
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;
    use std::sync::Mutex;

    fn png_bytes() -> Bytes {
        let image = DynamicImage::ImageRgb8(RgbImage::new(32, 16));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .expect("encode png");
        Bytes::from(buffer)
    }

    #[derive(Debug, Default)]
    struct MockProvider {
        fail_paths_containing: Option<String>,
    }

    #[async_trait]
    impl StorageProvider for MockProvider {
        fn provider_type(&self) -> &str {
            "mock"
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }

        async fn write(&self, _path: &str, _data: Bytes) -> AppResult<()> {
            Ok(())
        }

        async fn delete(&self, _path: &str) -> AppResult<()> {
            Ok(())
        }

        async fn exists(&self, _path: &str) -> AppResult<bool> {
            Ok(false)
        }

        async fn signed_upload_url(&self, path: &str) -> AppResult<SignedUpload> {
            if let Some(marker) = &self.fail_paths_containing {
                if path.contains(marker.as_str()) {
                    return Err(AppError::external_service("presign refused"));
                }
            }
            Ok(SignedUpload {
                path: path.to_string(),
                url: format!("mock://upload/{path}"),
                expires_at: Utc::now(),
            })
        }

        fn public_url(&self, path: &str) -> String {
            format!("https://cdn.example.com/{path}")
        }
    }

    #[derive(Debug, Default)]
    struct MockTransport {
        fail_urls_containing: Option<String>,
        puts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl UploadTransport for MockTransport {
        async fn put(&self, url: &str, _data: Bytes) -> AppResult<()> {
            if let Some(marker) = &self.fail_urls_containing {
                if url.contains(marker.as_str()) {
                    return Err(AppError::external_service("connection closed"));
                }
            }
            self.puts.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn pipeline(provider: MockProvider, transport: Arc<MockTransport>) -> UploadPipeline {
        UploadPipeline::new(
            Arc::new(provider),
            transport,
            ImageCompressor::new(&ImageConfig {
                max_dimension: 2560,
                jpeg_quality: 80,
            }),
            10_000_000,
        )
    }

    fn batch() -> Vec<UploadFile> {
        vec![
            UploadFile {
                file_name: "Zámek ráno.png".to_string(),
                data: png_bytes(),
            },
            UploadFile {
                file_name: "IMG 0042.png".to_string(),
                data: png_bytes(),
            },
        ]
    }

    #[tokio::test]
    async fn test_successful_batch_stores_all_and_counts_progress() {
        let transport = Arc::new(MockTransport::default());
        let pipeline = pipeline(MockProvider::default(), transport.clone());
        let progress = UploadProgress::new(2);

        let stored = pipeline
            .run("client-galleries/g1/", batch(), &progress)
            .await
            .expect("batch succeeds");

        assert_eq!(stored.len(), 2);
        assert_eq!(progress.snapshot(), (2, 2));
        assert_eq!(transport.puts.lock().unwrap().len(), 2);

        assert!(stored[0].path.starts_with("client-galleries/g1/"));
        assert!(stored[0].path.ends_with("-Zamek-rano.jpg"));
        assert_eq!(stored[0].original_name, "Zámek ráno.png");
        assert!(stored[1].path.ends_with("-IMG-0042.jpg"));
    }

    #[tokio::test]
    async fn test_upload_failure_fails_batch_naming_the_file() {
        let transport = Arc::new(MockTransport {
            fail_urls_containing: Some("IMG-0042".to_string()),
            ..Default::default()
        });
        let pipeline = pipeline(MockProvider::default(), transport.clone());
        let progress = UploadProgress::new(2);

        let err = pipeline
            .run("client-galleries/g1/", batch(), &progress)
            .await
            .unwrap_err();

        assert!(err.message.contains("IMG 0042.png"));
        // The other file went through and is not rolled back.
        assert_eq!(progress.completed(), 1);
        assert_eq!(transport.puts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_presign_failure_aborts_before_any_upload() {
        let transport = Arc::new(MockTransport::default());
        let pipeline = pipeline(
            MockProvider {
                fail_paths_containing: Some("Zamek".to_string()),
            },
            transport.clone(),
        );
        let progress = UploadProgress::new(2);

        let err = pipeline
            .run("client-galleries/g1/", batch(), &progress)
            .await
            .unwrap_err();

        assert!(err.message.contains("Zámek ráno.png"));
        assert_eq!(progress.completed(), 0);
        assert!(transport.puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_file_fails_compression_stage() {
        let transport = Arc::new(MockTransport::default());
        let pipeline = pipeline(MockProvider::default(), transport);
        let progress = UploadProgress::new(1);

        let err = pipeline
            .run(
                "p1/gallery-",
                vec![UploadFile {
                    file_name: "broken.jpg".to_string(),
                    data: Bytes::from_static(b"not an image"),
                }],
                &progress,
            )
            .await
            .unwrap_err();

        assert!(err.message.contains("broken.jpg"));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Zámek ráno.png"), "Zamek-rano.png");
        assert_eq!(sanitize_file_name("IMG 0042 (1).jpg"), "IMG-0042-1.jpg");
        assert_eq!(sanitize_file_name("už_是.webp"), "uz_.webp");
    }
}
