//! Shared types for hb-key-exporter
//!
//! Raw order records as the vendor stores them, the flattened row model used
//! by the pipeline and exporters, and the request shape for key redemption.

pub mod models;
pub mod request;

// Re-exports
pub use models::{Category, KeyEntry, KeyKind, Order, OrderCategory, Ownership, Row, RowLinks};
pub use request::{RedeemMode, RedeemRequest};
pub use serde::{Deserialize, Serialize};
