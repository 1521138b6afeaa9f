//! Data models
//!
//! `order` mirrors the JSON the vendor keeps in local storage. `row` is the
//! flat, export-ready projection built from it.

pub mod order;
pub mod row;

// Re-exports
pub use order::*;
pub use row::*;
