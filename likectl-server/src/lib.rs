//! likectl-server: HTTP server and Postgres storage for likectl
//!
//! Serves the company listing and liked-collection endpoints on top of
//! `likectl-core`, backed by either [`db::PgStore`] or the core's in-memory
//! store.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
