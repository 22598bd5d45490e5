//! Typed errors for liked-collection operations
//!
//! Library code returns `LikeError`; binaries wrap it with `anyhow` and the
//! HTTP layer maps each variant to a status code.

use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Counters accumulated by a multi-chunk run up to the point it stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// Chunks durably committed
    pub chunks_committed: usize,
    /// Candidate ids covered by the committed chunks
    pub processed: usize,
    /// Membership rows inserted by the committed chunks
    pub added: u64,
}

#[derive(Error, Debug)]
pub enum LikeError {
    /// The named collection does not exist
    #[error("collection not found: '{name}'")]
    CollectionNotFound { name: String },

    /// A single unit of storage work failed and was rolled back
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),

    /// A chunk failed mid-run; earlier chunks stay committed
    #[error(
        "batch stopped after {} committed chunk(s) ({} processed, {} added): {source}",
        .progress.chunks_committed,
        .progress.processed,
        .progress.added
    )]
    PartialBatch {
        progress: BatchProgress,
        #[source]
        source: StoreError,
    },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl LikeError {
    /// Progress made before the failure, if the error came from a batch run.
    pub fn progress(&self) -> Option<BatchProgress> {
        match self {
            Self::PartialBatch { progress, .. } => Some(*progress),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_batch_display_includes_progress() {
        let err = LikeError::PartialBatch {
            progress: BatchProgress {
                chunks_committed: 2,
                processed: 2000,
                added: 1500,
            },
            source: StoreError::Unavailable("connection reset".into()),
        };
        assert_eq!(
            err.to_string(),
            "batch stopped after 2 committed chunk(s) (2000 processed, 1500 added): \
             storage unavailable: connection reset"
        );
        assert_eq!(err.progress().map(|p| p.chunks_committed), Some(2));
    }

    #[test]
    fn not_found_has_no_progress() {
        let err = LikeError::CollectionNotFound {
            name: "Liked Companies".into(),
        };
        assert!(err.progress().is_none());
        assert_eq!(err.to_string(), "collection not found: 'Liked Companies'");
    }
}
