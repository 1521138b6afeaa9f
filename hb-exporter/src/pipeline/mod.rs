//! Normalization and enrichment pipeline
//!
//! store → [`normalize`] → [`enrich`] → [`KeyLibrary`]. The library is the
//! only owner of the row set; reload and recompute are explicit calls.

pub mod enrich;
pub mod filter;
pub mod library;
pub mod normalize;
pub mod ownership;

pub use filter::RowFilter;
pub use library::KeyLibrary;
pub use ownership::{CacheState, OWNED_APPS_KEY, OwnedApps, OwnershipCache};
