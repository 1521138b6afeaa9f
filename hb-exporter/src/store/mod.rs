//! Key-value store access
//!
//! The vendor page caches its orders in browser local storage. This module
//! treats that storage as an opaque string-to-string map and layers the
//! lz-string codec and the order reader on top of it.

pub mod codec;
pub mod file;
pub mod memory;
pub mod reader;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use reader::{LoadReport, ORDER_KEY_PREFIX, SkippedRecord, load_orders};

use thiserror::Error;

/// Store error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dump file is not a JSON object of strings
    #[error("Invalid store file: {0}")]
    InvalidFile(#[from] serde_json::Error),

    /// Payload failed to decompress
    #[error("Failed to decompress record")]
    Decompress,

    /// Decompressed payload is not valid UTF-16
    #[error("Record is not valid UTF-16: {0}")]
    Utf16(#[from] std::string::FromUtf16Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// String key-value store, the shape of browser local storage
pub trait KeyValueStore {
    /// All keys currently present, in no guaranteed order
    fn keys(&self) -> Vec<String>;

    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> StoreResult<()>;
}
