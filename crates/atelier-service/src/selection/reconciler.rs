//! Coalescing write reconciler for client selections.
//!
//! Every (client, photo) pair gets a monotonically increasing sequence
//! and at most one in-flight upsert. User actions merge into the pair's
//! pending patch; when the in-flight write completes, exactly the
//! latest merged state is sent next. Toggling like and unlike inside
//! one network round-trip therefore results in a single write carrying
//! the final intent — the two racing upserts of a naive
//! dispatch-per-action scheme cannot happen.
//!
//! Dispatch never blocks the caller. Failures are logged and retained
//! as the pair's last error; nothing is retried automatically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Notify;

use atelier_core::result::AppResult;
use atelier_core::types::ClientPhotoId;
use atelier_database::repositories::selection::SelectionRepository;
use atelier_entity::selection::SelectionPatch;

/// The seam the reconciler writes through. Implemented by the selection
/// repository in production and by recorders in tests.
#[async_trait]
pub trait SelectionWriter: Send + Sync + std::fmt::Debug + 'static {
    /// Apply one merged patch for a (client, photo) pair.
    async fn write(
        &self,
        client_id: &str,
        photo_id: ClientPhotoId,
        patch: &SelectionPatch,
    ) -> AppResult<()>;
}

#[async_trait]
impl SelectionWriter for SelectionRepository {
    async fn write(
        &self,
        client_id: &str,
        photo_id: ClientPhotoId,
        patch: &SelectionPatch,
    ) -> AppResult<()> {
        self.upsert(client_id, photo_id, patch).await.map(|_| ())
    }
}

type Key = (String, ClientPhotoId);

#[derive(Debug, Default)]
struct KeyState {
    /// Bumped on every applied action; diagnostic only — ordering is
    /// enforced by the single drain task per key.
    seq: u64,
    /// Latest merged state not yet sent.
    pending: Option<SelectionPatch>,
    /// Whether a drain task currently owns this key.
    in_flight: bool,
    /// Message of the most recent failed write, if any.
    last_error: Option<String>,
}

#[derive(Debug)]
struct Inner {
    writer: Arc<dyn SelectionWriter>,
    keys: DashMap<Key, KeyState>,
    busy: AtomicUsize,
    idle: Notify,
}

impl Inner {
    async fn drain(&self, key: Key) {
        loop {
            let patch = match self.keys.get_mut(&key) {
                Some(mut entry) => match entry.pending.take() {
                    Some(patch) => patch,
                    None => {
                        entry.in_flight = false;
                        break;
                    }
                },
                None => break,
            };

            if let Err(e) = self.writer.write(&key.0, key.1, &patch).await {
                tracing::warn!(
                    client_id = %key.0,
                    photo_id = %key.1,
                    error = %e,
                    "Selection write failed"
                );
                if let Some(mut entry) = self.keys.get_mut(&key) {
                    entry.last_error = Some(e.message.clone());
                }
            }
        }

        self.busy.fetch_sub(1, Ordering::AcqRel);
        self.idle.notify_waiters();
    }
}

/// Serializes selection writes per (client, photo) pair, sending only
/// the last intended state.
#[derive(Debug, Clone)]
pub struct SelectionReconciler {
    inner: Arc<Inner>,
}

impl SelectionReconciler {
    /// Creates a reconciler writing through the given writer.
    pub fn new(writer: Arc<dyn SelectionWriter>) -> Self {
        Self {
            inner: Arc::new(Inner {
                writer,
                keys: DashMap::new(),
                busy: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        }
    }

    /// Record a user action and dispatch it without blocking.
    ///
    /// If a write for the pair is already in flight, the action merges
    /// into the pending patch and rides the next write.
    pub fn apply(&self, client_id: &str, photo_id: ClientPhotoId, patch: SelectionPatch) {
        if patch.is_empty() {
            return;
        }

        let key: Key = (client_id.to_string(), photo_id);
        let should_dispatch = {
            let mut entry = self.inner.keys.entry(key.clone()).or_default();
            entry.seq += 1;
            match &mut entry.pending {
                Some(pending) => pending.merge(patch),
                None => entry.pending = Some(patch),
            }
            if entry.in_flight {
                false
            } else {
                entry.in_flight = true;
                true
            }
        };

        if should_dispatch {
            self.inner.busy.fetch_add(1, Ordering::AcqRel);
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                inner.drain(key).await;
            });
        }
    }

    /// Wait until every dispatched write has settled. Used on shutdown
    /// and in tests; normal request handling never calls this.
    pub async fn flush(&self) {
        loop {
            if self.inner.busy.load(Ordering::Acquire) == 0 {
                return;
            }
            let notified = self.inner.idle.notified();
            if self.inner.busy.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// How many actions have been recorded for a pair — the pair's
    /// monotonic sequence.
    pub fn actions_recorded(&self, client_id: &str, photo_id: ClientPhotoId) -> u64 {
        self.inner
            .keys
            .get(&(client_id.to_string(), photo_id))
            .map(|entry| entry.seq)
            .unwrap_or(0)
    }

    /// The most recent write failure for a pair, if any.
    pub fn last_error(&self, client_id: &str, photo_id: ClientPhotoId) -> Option<String> {
        self.inner
            .keys
            .get(&(client_id.to_string(), photo_id))
            .and_then(|entry| entry.last_error.clone())
    }

    /// Number of keys with a drain task currently running.
    pub fn in_flight(&self) -> usize {
        self.inner.busy.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::error::AppError;
    use std::sync::Mutex;
    use tokio::sync::Semaphore;

    /// Records writes, optionally holding each one until the test
    /// releases a permit.
    #[derive(Debug)]
    struct RecordingWriter {
        calls: Mutex<Vec<SelectionPatch>>,
        gate: Semaphore,
    }

    impl RecordingWriter {
        fn open() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                gate: Semaphore::new(Semaphore::MAX_PERMITS),
            })
        }

        fn gated() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                gate: Semaphore::new(0),
            })
        }

        fn calls(&self) -> Vec<SelectionPatch> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SelectionWriter for RecordingWriter {
        async fn write(
            &self,
            _client_id: &str,
            _photo_id: ClientPhotoId,
            patch: &SelectionPatch,
        ) -> AppResult<()> {
            self.gate.acquire().await.unwrap().forget();
            self.calls.lock().unwrap().push(patch.clone());
            Ok(())
        }
    }

    #[derive(Debug)]
    struct FailingWriter;

    #[async_trait]
    impl SelectionWriter for FailingWriter {
        async fn write(
            &self,
            _client_id: &str,
            _photo_id: ClientPhotoId,
            _patch: &SelectionPatch,
        ) -> AppResult<()> {
            Err(AppError::database("connection reset"))
        }
    }

    #[tokio::test]
    async fn test_single_action_writes_once() {
        let writer = RecordingWriter::open();
        let reconciler = SelectionReconciler::new(writer.clone());
        let photo = ClientPhotoId::new();

        reconciler.apply("hash", photo, SelectionPatch::liked(true));
        reconciler.flush().await;

        assert_eq!(writer.calls(), vec![SelectionPatch::liked(true)]);
        assert_eq!(reconciler.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_actions_during_flight_coalesce_to_final_state() {
        let writer = RecordingWriter::gated();
        let reconciler = SelectionReconciler::new(writer.clone());
        let photo = ClientPhotoId::new();

        // First action starts a write that blocks on the gate.
        reconciler.apply("hash", photo, SelectionPatch::liked(true));
        tokio::task::yield_now().await;

        // Rapid toggles land while the first write is in flight.
        reconciler.apply("hash", photo, SelectionPatch::liked(false));
        reconciler.apply("hash", photo, SelectionPatch::liked(true));
        reconciler.apply("hash", photo, SelectionPatch::liked(false));

        writer.gate.add_permits(10);
        reconciler.flush().await;

        let calls = writer.calls();
        assert!(
            calls.len() <= 2,
            "three toggles must coalesce, got {} writes",
            calls.len()
        );
        assert_eq!(
            calls.last().unwrap().is_liked,
            Some(false),
            "the last write must carry the final intent"
        );
        assert_eq!(reconciler.actions_recorded("hash", photo), 4);
    }

    #[tokio::test]
    async fn test_like_and_comment_merge_into_one_patch() {
        let writer = RecordingWriter::gated();
        let reconciler = SelectionReconciler::new(writer.clone());
        let photo = ClientPhotoId::new();

        reconciler.apply("hash", photo, SelectionPatch::liked(true));
        tokio::task::yield_now().await;
        reconciler.apply("hash", photo, SelectionPatch::commented(Some("crop".into())));
        reconciler.apply("hash", photo, SelectionPatch::liked(false));

        writer.gate.add_permits(10);
        reconciler.flush().await;

        let last = writer.calls().last().cloned().unwrap();
        assert_eq!(last.is_liked, Some(false));
        assert_eq!(last.comment, Some(Some("crop".to_string())));
    }

    #[tokio::test]
    async fn test_failed_writes_are_recorded_not_retried() {
        let reconciler = SelectionReconciler::new(Arc::new(FailingWriter));
        let photo = ClientPhotoId::new();

        reconciler.apply("hash", photo, SelectionPatch::liked(true));
        reconciler.flush().await;

        assert!(reconciler
            .last_error("hash", photo)
            .is_some_and(|msg| msg.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_independent_pairs_do_not_serialize_each_other() {
        let writer = RecordingWriter::open();
        let reconciler = SelectionReconciler::new(writer.clone());

        for _ in 0..4 {
            reconciler.apply("hash", ClientPhotoId::new(), SelectionPatch::liked(true));
        }
        reconciler.flush().await;

        assert_eq!(writer.calls().len(), 4);
    }
}
