//! Route handlers organized by resource

pub mod collections;
pub mod companies;
pub mod health;
