//! Client selection entity model.
//!
//! A selection row exists per `(client_id, photo_id)` pair — `client_id`
//! is the gallery's share hash. The pair's uniqueness is the only
//! consistency guarantee; nothing checks that the photo belongs to the
//! gallery identified by the hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::types::{ClientPhotoId, SelectionId};

/// A client's like/comment state for one photo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientSelection {
    /// Row identifier.
    pub id: SelectionId,
    /// Share hash of the gallery session that made the selection.
    pub client_id: String,
    /// The photo the selection refers to.
    pub photo_id: ClientPhotoId,
    /// Whether the photo is currently liked. Unlike keeps the row with
    /// `is_liked = false` so a comment survives.
    pub is_liked: bool,
    /// Optional comment text; NULL means no comment.
    pub comment: Option<String>,
    /// Last upsert time.
    pub updated_at: DateTime<Utc>,
}

/// A partial update applied through the upsert path.
///
/// A like action touches only `is_liked`; a comment action touches only
/// `comment`. Fields left as `None` keep whatever the row already holds,
/// matching upsert-by-composite-key semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPatch {
    /// New liked flag, if the action changed it.
    pub is_liked: Option<bool>,
    /// New comment value, if the action changed it. The inner `None`
    /// clears the comment.
    pub comment: Option<Option<String>>,
}

impl SelectionPatch {
    /// A patch that only sets the liked flag.
    pub fn liked(value: bool) -> Self {
        Self {
            is_liked: Some(value),
            comment: None,
        }
    }

    /// A patch that only sets (or clears) the comment.
    pub fn commented(value: Option<String>) -> Self {
        Self {
            is_liked: None,
            comment: Some(value),
        }
    }

    /// Merge a newer patch over this one; newer fields win, untouched
    /// fields carry over.
    pub fn merge(&mut self, newer: SelectionPatch) {
        if newer.is_liked.is_some() {
            self.is_liked = newer.is_liked;
        }
        if newer.comment.is_some() {
            self.comment = newer.comment;
        }
    }

    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.is_liked.is_none() && self.comment.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut patch = SelectionPatch::liked(true);
        patch.merge(SelectionPatch::commented(Some("crop tighter".to_string())));
        assert_eq!(patch.is_liked, Some(true));
        assert_eq!(patch.comment, Some(Some("crop tighter".to_string())));
    }

    #[test]
    fn test_merge_newer_like_wins() {
        let mut patch = SelectionPatch::liked(true);
        patch.merge(SelectionPatch::liked(false));
        assert_eq!(patch.is_liked, Some(false));
    }
}
