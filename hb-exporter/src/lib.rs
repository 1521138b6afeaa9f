//! hb-exporter - key table builder for Humble Bundle orders
//!
//! # Overview
//!
//! - **store** (`store`): local storage access, lz-string codec, order reader
//! - **pipeline** (`pipeline`): normalization, ownership and copy counters
//! - **claim** (`claim`): sequential key redemption with a per-message log
//! - **export** (`export`): ASF, keys, delimited table and JSON output
//!
//! ```text
//! hb-exporter/src/
//! ├── core/       # config, errors
//! ├── store/      # key-value store, codec, order reader
//! ├── pipeline/   # normalize, enrich, ownership cache, filter, library
//! ├── utils/      # logger, clipboard
//! ├── claim.rs
//! └── export.rs
//! ```

pub mod claim;
pub mod core;
pub mod export;
pub mod pipeline;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use claim::{ClaimLog, ClaimReport, ClaimedKey};
pub use core::{AppError, AppResult, Config};
pub use export::{ExportError, ExportFormat, export};
pub use pipeline::{KeyLibrary, OwnershipCache, RowFilter};
pub use store::{FileStore, KeyValueStore, MemoryStore};

pub use utils::logger::init_logger_with_file;
