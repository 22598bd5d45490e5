//! Request-side models shared by route handlers

pub mod pagination;

pub use pagination::PageParams;
