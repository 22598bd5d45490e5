//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Listing totals come from a separate COUNT, independent of the page window
//! - Handles conflicts via ON CONFLICT (no check-then-insert race)
//! - Uses transactions for multi-step operations

pub mod collections;
pub mod companies;
pub mod memberships;

pub use collections::{CollectionRepo, CollectionRow};
pub use companies::{CompanyRepo, CompanyRow};
pub use memberships::MembershipRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
