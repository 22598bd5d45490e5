//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - Connection pool, one connection acquired per call
//! - Membership uniqueness is a DB constraint; inserts use ON CONFLICT DO NOTHING
//! - Transactions for every write (one per chunk, one per reset)

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use pool::create_pool;
pub use repos::*;
pub use store::PgStore;
