//! likectl-core: liked-collection membership logic
//!
//! Reconciles candidate company ids against an existing membership set and
//! drives batched, per-chunk committed writes through the [`LikeStore`]
//! persistence seam. Storage backends live elsewhere (`likectl-server` for
//! Postgres); an in-memory store ships here for tests and demo serving.

pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod reconcile;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{ConfigError, LikeConfig};
pub use error::{BatchProgress, LikeError};
pub use model::{
    AnnotatedCompany, Collection, CollectionId, CollectionName, Company, CompanyId, Page,
    PageWindow,
};
pub use orchestrator::{BatchOrchestrator, BatchReport, DEFAULT_CHUNK_SIZE};
pub use reconcile::{partition, reconcile, Reconciliation};
pub use service::LikeService;
pub use store::{memory::MemoryStore, LikeStore, StoreError};
pub use validation::ValidationError;
