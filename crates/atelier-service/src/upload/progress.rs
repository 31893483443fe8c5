//! Shared upload progress accounting.

use std::sync::atomic::{AtomicU32, Ordering};

/// Progress of one upload batch, shared between the pipeline and
/// whoever reports it.
///
/// `completed` counts confirmed successful uploads only — a dispatched
/// but unfinished PUT does not move the counter.
#[derive(Debug)]
pub struct UploadProgress {
    completed: AtomicU32,
    total: u32,
}

impl UploadProgress {
    /// Create a tracker for a batch of the given size.
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicU32::new(0),
            total: total as u32,
        }
    }

    /// Record one confirmed successful upload.
    pub fn confirm_one(&self) {
        self.completed.fetch_add(1, Ordering::AcqRel);
    }

    /// Number of confirmed uploads so far.
    pub fn completed(&self) -> u32 {
        self.completed.load(Ordering::Acquire)
    }

    /// Batch size.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// `(completed, total)` snapshot.
    pub fn snapshot(&self) -> (u32, u32) {
        (self.completed(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_confirmed_uploads_only() {
        let progress = UploadProgress::new(3);
        assert_eq!(progress.snapshot(), (0, 3));

        progress.confirm_one();
        progress.confirm_one();
        assert_eq!(progress.snapshot(), (2, 3));
    }
}
