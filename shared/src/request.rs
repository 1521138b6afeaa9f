//! Request types for key redemption

use crate::models::Row;
use serde::{Deserialize, Serialize};

/// How a key should be claimed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RedeemMode {
    /// Reveal the key itself
    #[default]
    Key,
    /// Turn the key into a shareable gift link
    Gift,
}

impl RedeemMode {
    pub fn is_gift(&self) -> bool {
        matches!(self, RedeemMode::Gift)
    }
}

/// The subset of a row the redemption endpoint needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedeemRequest {
    pub machine_name: String,
    /// Order gamekey
    pub gamekey: String,
    pub keyindex: Option<u32>,
}

impl RedeemRequest {
    pub fn new(machine_name: impl Into<String>, gamekey: impl Into<String>, keyindex: u32) -> Self {
        Self {
            machine_name: machine_name.into(),
            gamekey: gamekey.into(),
            keyindex: Some(keyindex),
        }
    }
}

impl From<&Row> for RedeemRequest {
    fn from(row: &Row) -> Self {
        Self {
            machine_name: row.machine_name.clone(),
            gamekey: row.category_id.clone(),
            keyindex: row.keyindex,
        }
    }
}
