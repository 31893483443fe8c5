//! Client selection repository implementation.
//!
//! All writes go through a single upsert keyed by the
//! `(client_id, photo_id)` unique constraint, mirroring how a like
//! action touches only `is_liked` and a comment action touches only
//! `comment`.

use sqlx::PgPool;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_core::types::ClientPhotoId;
use atelier_entity::selection::{ClientSelection, SelectionPatch};

/// Repository for client selections.
#[derive(Debug, Clone)]
pub struct SelectionRepository {
    pool: PgPool,
}

impl SelectionRepository {
    /// Create a new selection repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert a selection row, applying only the fields the patch sets.
    ///
    /// Untouched fields keep their stored value, so repeating the same
    /// patch is a no-op against final state.
    pub async fn upsert(
        &self,
        client_id: &str,
        photo_id: ClientPhotoId,
        patch: &SelectionPatch,
    ) -> AppResult<ClientSelection> {
        let comment_changed = patch.comment.is_some();
        let comment_value = patch.comment.clone().flatten();

        sqlx::query_as::<_, ClientSelection>(
            "INSERT INTO client_selections (client_id, photo_id, is_liked, comment) \
             VALUES ($1, $2, COALESCE($3, FALSE), CASE WHEN $4 THEN $5 ELSE NULL END) \
             ON CONFLICT (client_id, photo_id) DO UPDATE SET \
                is_liked = COALESCE($3, client_selections.is_liked), \
                comment = CASE WHEN $4 THEN $5 ELSE client_selections.comment END, \
                updated_at = NOW() \
             RETURNING *",
        )
        .bind(client_id)
        .bind(photo_id)
        .bind(patch.is_liked)
        .bind(comment_changed)
        .bind(comment_value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save selection", e))
    }

    /// Fetch every selection a client has made, used to seed the
    /// gallery view once per visit.
    pub async fn find_by_client(&self, client_id: &str) -> AppResult<Vec<ClientSelection>> {
        sqlx::query_as::<_, ClientSelection>(
            "SELECT * FROM client_selections WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load selections", e))
    }

    /// Fetch one selection row, if present.
    pub async fn find_one(
        &self,
        client_id: &str,
        photo_id: ClientPhotoId,
    ) -> AppResult<Option<ClientSelection>> {
        sqlx::query_as::<_, ClientSelection>(
            "SELECT * FROM client_selections WHERE client_id = $1 AND photo_id = $2",
        )
        .bind(client_id)
        .bind(photo_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load selection", e))
    }
}
