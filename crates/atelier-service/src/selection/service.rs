//! Selection actions for visiting clients.

use std::collections::HashMap;
use std::sync::Arc;

use atelier_core::result::AppResult;
use atelier_core::types::ClientPhotoId;
use atelier_database::repositories::selection::SelectionRepository;
use atelier_entity::selection::{normalize_comment, SelectionPatch, SelectionState};

use crate::selection::reconciler::{SelectionReconciler, SelectionWriter};

/// Applies like/comment actions for a gallery visitor.
///
/// Actions return as soon as they are recorded; the reconciler pushes
/// them to the database in the background, one serialized write per
/// (client, photo) pair. The UI stays at most one round-trip ahead of
/// persisted truth.
#[derive(Debug, Clone)]
pub struct SelectionService {
    /// Selection repository, for the seeding read path.
    selections: Arc<SelectionRepository>,
    /// Coalescing write path.
    reconciler: SelectionReconciler,
}

impl SelectionService {
    /// Creates a new selection service.
    pub fn new(selections: Arc<SelectionRepository>) -> Self {
        let writer: Arc<dyn SelectionWriter> = Arc::clone(&selections) as _;
        Self {
            selections,
            reconciler: SelectionReconciler::new(writer),
        }
    }

    /// Seed the per-photo selection state for a gallery visit, from one
    /// full fetch. There is no incremental sync afterwards.
    pub async fn seed(
        &self,
        share_hash: &str,
    ) -> AppResult<HashMap<ClientPhotoId, SelectionState>> {
        let rows = self.selections.find_by_client(share_hash).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.photo_id,
                    SelectionState::new(row.is_liked, row.comment),
                )
            })
            .collect())
    }

    /// Mark a photo as liked.
    pub fn like(&self, share_hash: &str, photo_id: ClientPhotoId) {
        self.reconciler
            .apply(share_hash, photo_id, SelectionPatch::liked(true));
    }

    /// Remove a like. The row is kept so an existing comment survives.
    pub fn unlike(&self, share_hash: &str, photo_id: ClientPhotoId) {
        self.reconciler
            .apply(share_hash, photo_id, SelectionPatch::liked(false));
    }

    /// Set or clear a comment; whitespace-only text clears it.
    pub fn comment(&self, share_hash: &str, photo_id: ClientPhotoId, text: &str) {
        self.reconciler.apply(
            share_hash,
            photo_id,
            SelectionPatch::commented(normalize_comment(text)),
        );
    }

    /// The most recent write failure for a pair, if any.
    pub fn last_error(&self, share_hash: &str, photo_id: ClientPhotoId) -> Option<String> {
        self.reconciler.last_error(share_hash, photo_id)
    }

    /// Wait for all dispatched writes to settle (shutdown path).
    pub async fn flush(&self) {
        self.reconciler.flush().await;
    }
}
