//! Client gallery entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::types::{ClientGalleryId, Locale};

/// A proofing gallery shared with one client.
///
/// The `share_hash` is both the gallery's public identifier and the sole
/// access capability: whoever holds the hash can open the gallery.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientGallery {
    /// Unique gallery identifier.
    pub id: ClientGalleryId,
    /// Display name (usually the client or shoot name).
    pub name: String,
    /// Opaque unguessable token used as the public access key.
    pub share_hash: String,
    /// When the gallery was created.
    pub created_at: DateTime<Utc>,
}

impl ClientGallery {
    /// The locale-prefixed public path of this gallery.
    pub fn share_path(&self, locale: Locale) -> String {
        format!("/{}/gallery/{}", locale, self.share_hash)
    }
}

/// Data required to create a new client gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientGallery {
    /// Display name.
    pub name: String,
    /// Generated share hash.
    pub share_hash: String,
}

/// A gallery row joined with its photo and like counts, for the admin
/// overview list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientGalleryWithCounts {
    /// Unique gallery identifier.
    pub id: ClientGalleryId,
    /// Display name.
    pub name: String,
    /// Share hash.
    pub share_hash: String,
    /// When the gallery was created.
    pub created_at: DateTime<Utc>,
    /// Number of photos uploaded to the gallery.
    pub photo_count: i64,
    /// Number of photos the client has liked.
    pub liked_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_path_is_locale_prefixed() {
        let gallery = ClientGallery {
            id: ClientGalleryId::new(),
            name: "Novakovi".to_string(),
            share_hash: "deadbeef".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(gallery.share_path(Locale::En), "/en/gallery/deadbeef");
    }
}
