//! Client-side-equivalent image compression, applied before upload.
//!
//! Photos are resized so their longest edge stays within the configured
//! bound and re-encoded as JPEG at the configured quality. Decoding and
//! encoding run on the blocking thread pool.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::ImageReader;

use atelier_core::config::storage::ImageConfig;
use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;

/// A compressed image ready for upload.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    /// File name with the extension rewritten to `.jpg`.
    pub file_name: String,
    /// Encoded JPEG bytes.
    pub data: Bytes,
}

/// Resizes and re-encodes images within configured bounds.
#[derive(Debug, Clone)]
pub struct ImageCompressor {
    /// Longest allowed edge after resize.
    max_dimension: u32,
    /// JPEG quality (1-100).
    quality: u8,
}

impl ImageCompressor {
    /// Create a compressor from the storage image configuration.
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            max_dimension: config.max_dimension.max(1),
            quality: config.jpeg_quality.clamp(1, 100),
        }
    }

    /// Whether the file extension names a format we can compress.
    pub fn is_supported(file_name: &str) -> bool {
        let extension = file_name
            .rsplit('.')
            .next()
            .map(|ext| ext.to_ascii_lowercase());
        matches!(
            extension.as_deref(),
            Some("jpg" | "jpeg" | "png" | "webp" | "bmp" | "gif" | "tiff" | "tif")
        )
    }

    /// Compress one image, returning re-encoded bytes and the rewritten
    /// file name.
    pub async fn compress(&self, file_name: &str, data: Bytes) -> AppResult<CompressedImage> {
        if data.is_empty() {
            return Err(AppError::validation(format!(
                "File '{file_name}' is empty"
            )));
        }

        let max_dimension = self.max_dimension;
        let quality = self.quality;
        let source_name = file_name.to_string();

        let encoded = tokio::task::spawn_blocking(move || -> AppResult<Vec<u8>> {
            let decoded = ImageReader::new(Cursor::new(data.as_ref()))
                .with_guessed_format()
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Validation,
                        format!("Cannot read image '{source_name}'"),
                        e,
                    )
                })?
                .decode()
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Validation,
                        format!("Cannot decode image '{source_name}'"),
                        e,
                    )
                })?;

            let resized = if decoded.width().max(decoded.height()) > max_dimension {
                decoded.thumbnail(max_dimension, max_dimension)
            } else {
                decoded
            };

            let mut buffer = Vec::new();
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            resized
                .to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Internal, "JPEG encoding failed", e)
                })?;
            Ok(buffer)
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Compression task panicked", e))??;

        Ok(CompressedImage {
            file_name: rewrite_extension(file_name),
            data: Bytes::from(encoded),
        })
    }
}

/// Rewrite the file name's extension to `.jpg`.
fn rewrite_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.jpg"),
        _ => format!("{file_name}.jpg"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn encoded_png(width: u32, height: u32) -> Bytes {
        let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .expect("encode png");
        Bytes::from(buffer)
    }

    fn compressor(max_dimension: u32) -> ImageCompressor {
        ImageCompressor::new(&ImageConfig {
            max_dimension,
            jpeg_quality: 80,
        })
    }

    #[tokio::test]
    async fn test_compress_bounds_longest_edge() {
        let result = compressor(64)
            .compress("wide.png", encoded_png(256, 64))
            .await
            .expect("compress");

        let reloaded = image::load_from_memory(&result.data).expect("decode output");
        assert!(reloaded.width() <= 64);
        assert!(reloaded.height() <= 64);
        assert_eq!(result.file_name, "wide.jpg");
    }

    #[tokio::test]
    async fn test_small_images_are_not_upscaled() {
        let result = compressor(2560)
            .compress("tiny.png", encoded_png(10, 8))
            .await
            .expect("compress");

        let reloaded = image::load_from_memory(&result.data).expect("decode output");
        assert_eq!((reloaded.width(), reloaded.height()), (10, 8));
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let err = compressor(2560)
            .compress("missing.jpg", Bytes::new())
            .await
            .unwrap_err();
        assert!(err.message.contains("missing.jpg"));
    }

    #[test]
    fn test_is_supported_by_extension() {
        assert!(ImageCompressor::is_supported("IMG_0001.JPG"));
        assert!(ImageCompressor::is_supported("proof.webp"));
        assert!(!ImageCompressor::is_supported("notes.txt"));
    }

    #[test]
    fn test_rewrite_extension() {
        assert_eq!(rewrite_extension("photo.png"), "photo.jpg");
        assert_eq!(rewrite_extension("archive.tar.gz"), "archive.tar.jpg");
        assert_eq!(rewrite_extension("noext"), "noext.jpg");
    }
}
