//! Batched membership writes
//!
//! Splits a candidate id list into fixed-size chunks and runs one
//! query → reconcile → insert → commit cycle per chunk, in order. Each chunk
//! commits on its own: a failure on chunk k leaves chunks before k applied
//! and reports how far the run got. Re-running the same input is safe since
//! every chunk re-checks existing membership.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{BatchProgress, LikeError};
use crate::model::{CollectionId, CompanyId};
use crate::reconcile::reconcile;
use crate::store::LikeStore;
use crate::validation::ValidationError;

/// Default number of ids per committed chunk
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Final counters of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Candidate ids examined (including ones already liked)
    pub processed: usize,
    /// Membership rows inserted
    pub added: u64,
    /// Chunks committed
    pub chunks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOrchestrator {
    chunk_size: NonZeroUsize,
}

impl Default for BatchOrchestrator {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl BatchOrchestrator {
    /// Orchestrator with `chunk_size` ids per commit. Zero is rejected.
    pub fn new(chunk_size: usize) -> Result<Self, ValidationError> {
        let chunk_size = NonZeroUsize::new(chunk_size).ok_or(ValidationError::BelowMinimum {
            field: "chunk_size",
            min: 1,
            value: 0,
        })?;
        Ok(Self { chunk_size })
    }

    /// One id per chunk.
    pub fn single() -> Self {
        Self {
            chunk_size: NonZeroUsize::MIN,
        }
    }

    /// One chunk covering an input of `len` ids.
    pub fn whole(len: usize) -> Self {
        Self {
            chunk_size: NonZeroUsize::new(len).unwrap_or(NonZeroUsize::MIN),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size.get()
    }

    /// Number of chunks an input of `len` ids is split into.
    pub fn chunk_count(&self, len: usize) -> usize {
        len.div_ceil(self.chunk_size.get())
    }

    /// Add every id in `ids` to `collection`, chunk by chunk.
    ///
    /// # Errors
    ///
    /// Returns [`LikeError::PartialBatch`] when a chunk fails; its progress
    /// counts only the chunks committed before the failure.
    pub async fn like_all<S>(
        &self,
        store: &S,
        collection: CollectionId,
        ids: &[CompanyId],
    ) -> Result<BatchReport, LikeError>
    where
        S: LikeStore + ?Sized,
    {
        let total = ids.len();
        let mut progress = BatchProgress::default();

        for (index, chunk) in ids.chunks(self.chunk_size.get()).enumerate() {
            let added = match Self::apply_chunk(store, collection, chunk).await {
                Ok(added) => added,
                Err(source) => {
                    warn!(
                        chunk = index,
                        committed = progress.chunks_committed,
                        error = %source,
                        "chunk failed, stopping batch"
                    );
                    return Err(LikeError::PartialBatch { progress, source });
                }
            };

            progress.chunks_committed += 1;
            progress.processed += chunk.len();
            progress.added += added;

            debug!(chunk = index, size = chunk.len(), added, "chunk committed");
            info!("Processed {}/{}", progress.processed, total);
        }

        Ok(BatchReport {
            processed: progress.processed,
            added: progress.added,
            chunks: progress.chunks_committed,
        })
    }

    async fn apply_chunk<S>(
        store: &S,
        collection: CollectionId,
        chunk: &[CompanyId],
    ) -> Result<u64, crate::store::StoreError>
    where
        S: LikeStore + ?Sized,
    {
        let existing = store.members_among(collection, chunk).await?;
        let fresh = reconcile(chunk, &existing);
        if fresh.is_empty() {
            return Ok(0);
        }
        store.insert_members(collection, &fresh).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CollectionName;
    use crate::store::memory::MemoryStore;

    fn ids(range: std::ops::RangeInclusive<i32>) -> Vec<CompanyId> {
        range.map(CompanyId).collect()
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let err = BatchOrchestrator::new(0).unwrap_err();
        assert!(matches!(err, ValidationError::BelowMinimum { .. }));
    }

    #[test]
    fn chunk_count_rounds_up() {
        let orchestrator = BatchOrchestrator::default();
        assert_eq!(orchestrator.chunk_size(), 1000);
        assert_eq!(orchestrator.chunk_count(2500), 3);
        assert_eq!(orchestrator.chunk_count(1000), 1);
        assert_eq!(orchestrator.chunk_count(0), 0);
        assert_eq!(BatchOrchestrator::whole(0).chunk_size(), 1);
    }

    #[tokio::test]
    async fn three_chunks_for_2500_ids() {
        let (store, liked) = MemoryStore::seeded(2500, &CollectionName::default());
        let report = BatchOrchestrator::default()
            .like_all(&store, liked, &ids(1..=2500))
            .await
            .unwrap();

        assert_eq!(
            report,
            BatchReport {
                processed: 2500,
                added: 2500,
                chunks: 3
            }
        );
        assert_eq!(store.insert_sizes().await, vec![1000, 1000, 500]);
    }

    #[tokio::test]
    async fn chunk_inserts_only_new_ids() {
        let (store, liked) = MemoryStore::seeded(10, &CollectionName::default());
        store.insert_members(liked, &ids(2..=3)).await.unwrap();

        let report = BatchOrchestrator::new(4)
            .unwrap()
            .like_all(&store, liked, &ids(1..=10))
            .await
            .unwrap();

        assert_eq!(report.chunks, 3);
        assert_eq!(report.added, 8);
        // seed insert, then chunks [1..=4] minus {2,3}, [5..=8], [9,10]
        assert_eq!(store.insert_sizes().await, vec![2, 2, 4, 2]);
    }

    #[tokio::test]
    async fn skips_insert_when_chunk_fully_liked() {
        let (store, liked) = MemoryStore::seeded(10, &CollectionName::default());
        store.insert_members(liked, &ids(1..=5)).await.unwrap();

        let report = BatchOrchestrator::new(5)
            .unwrap()
            .like_all(&store, liked, &ids(1..=10))
            .await
            .unwrap();

        assert_eq!(report.added, 5);
        assert_eq!(report.chunks, 2);
        // seed insert + second chunk only
        assert_eq!(store.insert_calls().await, 2);
    }

    #[tokio::test]
    async fn failure_keeps_earlier_chunks() {
        let (store, liked) = MemoryStore::seeded(2500, &CollectionName::default());
        store.fail_insert_on_call(2).await;

        let err = BatchOrchestrator::default()
            .like_all(&store, liked, &ids(1..=2500))
            .await
            .unwrap_err();

        assert_eq!(
            err.progress(),
            Some(BatchProgress {
                chunks_committed: 1,
                processed: 1000,
                added: 1000
            })
        );
        assert_eq!(store.membership_count(liked).await, 1000);
    }
}
