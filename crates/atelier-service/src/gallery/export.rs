//! Lightroom export of liked photo filenames.
//!
//! Produces the newline-separated list of original filenames
//! (extensions stripped) that a photographer pastes into Lightroom's
//! filename filter to pull up the client's picks.

use std::sync::Arc;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_core::types::ClientGalleryId;
use atelier_database::repositories::client_gallery::ClientGalleryRepository;
use atelier_database::repositories::client_photo::ClientPhotoRepository;
use atelier_entity::client_photo::ClientPhoto;

use crate::context::RequestContext;

/// Builds Lightroom filename lists for client galleries.
#[derive(Debug, Clone)]
pub struct ExportService {
    /// Gallery repository.
    galleries: Arc<ClientGalleryRepository>,
    /// Client photo repository.
    client_photos: Arc<ClientPhotoRepository>,
}

impl ExportService {
    /// Creates a new export service.
    pub fn new(
        galleries: Arc<ClientGalleryRepository>,
        client_photos: Arc<ClientPhotoRepository>,
    ) -> Self {
        Self {
            galleries,
            client_photos,
        }
    }

    /// The newline-separated filename list for all liked photos of a
    /// gallery.
    pub async fn lightroom_list(
        &self,
        ctx: &RequestContext,
        gallery_id: ClientGalleryId,
    ) -> AppResult<String> {
        ctx.require_admin()?;

        let gallery = self
            .galleries
            .find_by_id(gallery_id)
            .await?
            .ok_or_else(|| AppError::not_found("Gallery not found"))?;

        let liked = self.client_photos.find_liked(&gallery.share_hash).await?;
        if liked.is_empty() {
            return Err(AppError::precondition(
                "The client has not selected any photos yet",
            ));
        }

        Ok(lightroom_lines(&liked).join("\n"))
    }
}

/// One export line per photo: the original filename when recorded,
/// otherwise the name recovered from the stored URL.
pub fn lightroom_lines(photos: &[ClientPhoto]) -> Vec<String> {
    photos
        .iter()
        .map(|photo| {
            let name = photo
                .original_filename
                .clone()
                .unwrap_or_else(|| clean_filename(&photo.image_url));
            strip_extension(&name).to_string()
        })
        .collect()
}

/// Recover a display filename from a stored photo URL: the last path
/// segment with any leading upload-timestamp prefix removed.
pub fn clean_filename(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);

    // Uploaded objects are named `{unix-millis}-{name}`; strip the
    // prefix only when it looks like one (13+ digits).
    if let Some((prefix, rest)) = segment.split_once('-') {
        if prefix.len() >= 13 && prefix.chars().all(|c| c.is_ascii_digit()) && !rest.is_empty() {
            return rest.to_string();
        }
    }

    segment.to_string()
}

/// Drop the final extension of a filename, if it has one.
pub fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::types::{ClientGalleryId, ClientPhotoId};
    use chrono::Utc;

    fn photo(original: Option<&str>, url: &str) -> ClientPhoto {
        ClientPhoto {
            id: ClientPhotoId::new(),
            gallery_id: ClientGalleryId::new(),
            image_url: url.to_string(),
            original_filename: original.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_clean_filename_strips_timestamp_prefix() {
        assert_eq!(
            clean_filename("https://cdn.example.com/photos/g1/1718200000000-IMG_0042.jpg"),
            "IMG_0042.jpg"
        );
    }

    #[test]
    fn test_clean_filename_keeps_short_numeric_prefixes() {
        assert_eq!(
            clean_filename("https://cdn.example.com/photos/g1/2024-wedding.jpg"),
            "2024-wedding.jpg"
        );
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("IMG_0042.jpg"), "IMG_0042");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("noext"), "noext");
    }

    #[test]
    fn test_lines_prefer_original_filename() {
        let photos = vec![
            photo(Some("DSC_0001.NEF"), "https://cdn/x/1718200000000-dsc-0001.jpg"),
            photo(None, "https://cdn/x/1718200000001-dsc-0002.jpg"),
        ];
        assert_eq!(lightroom_lines(&photos), ["DSC_0001", "dsc-0002"]);
    }
}
