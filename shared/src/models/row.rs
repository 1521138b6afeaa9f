//! Row Model
//!
//! One row per purchased key. Field order is the column order of the
//! delimited export, so keep it stable.

use serde::{Deserialize, Serialize};

/// Steam store page
pub const STEAM_APP_URL: &str = "https://store.steampowered.com/app/";
/// Steam key activation page
pub const STEAM_REGISTER_URL: &str = "https://store.steampowered.com/account/registerkey?key=";
/// Order download page
pub const DOWNLOAD_URL: &str = "https://www.humblebundle.com/download?key=";

/// Display category derived from the order's raw category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Store,
    Bundle,
    Choice,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Store => "Store",
            Category::Bundle => "Bundle",
            Category::Choice => "Choice",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "store" => Ok(Category::Store),
            "bundle" => Ok(Category::Bundle),
            "choice" => Ok(Category::Choice),
            "other" => Ok(Category::Other),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// What kind of value the row holds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum KeyKind {
    Gift,
    Key,
    #[default]
    #[serde(rename = "-")]
    Unknown,
}

impl KeyKind {
    /// Gift flag wins, then a revealed value means a plain key
    pub fn derive(is_gift: bool, revealed: &str) -> Self {
        if is_gift {
            KeyKind::Gift
        } else if !revealed.is_empty() {
            KeyKind::Key
        } else {
            KeyKind::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Gift => "Gift",
            KeyKind::Key => "Key",
            KeyKind::Unknown => "-",
        }
    }
}

/// Whether the platform account already owns the app
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Ownership {
    Yes,
    No,
    /// No platform app id on the row
    #[default]
    #[serde(rename = "-")]
    Unknown,
}

impl Ownership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::Yes => "Yes",
            Ownership::No => "No",
            Ownership::Unknown => "-",
        }
    }
}

/// Flattened key row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub machine_name: String,
    pub category: Category,
    /// Parent order gamekey
    pub category_id: String,
    /// Parent product display name
    pub category_human_name: String,
    pub human_name: String,
    pub key_type: String,
    #[serde(rename = "type")]
    pub kind: KeyKind,
    /// Empty until the key is revealed
    pub redeemed_key_val: String,
    pub is_gift: bool,
    pub is_expired: bool,
    pub expiry_date: String,
    pub steam_app_id: Option<u64>,
    pub created: String,
    pub keyindex: Option<u32>,
    pub owned: Ownership,
    /// Rows sharing this display name across the whole loaded set
    #[serde(default)]
    pub copies: usize,
    /// Of those, rows that are neither revealed nor gifts
    #[serde(default)]
    pub unrevealed_copies: usize,
}

impl Row {
    /// Revealed column: gifts count as revealed
    pub fn is_revealed(&self) -> bool {
        self.is_gift || !self.redeemed_key_val.is_empty()
    }

    /// Counted in `unrevealed_copies`
    pub fn is_unrevealed_key(&self) -> bool {
        self.redeemed_key_val.is_empty() && !self.is_gift
    }

    /// Eligible for bulk claim
    pub fn is_claimable(&self) -> bool {
        self.is_unrevealed_key() && !self.is_expired
    }

    /// Revealed, non-gift, unexpired steam key
    pub fn is_activatable_steam_key(&self) -> bool {
        !self.is_gift && !self.redeemed_key_val.is_empty() && !self.is_expired && self.key_type == "steam"
    }

    pub fn links(&self) -> RowLinks {
        RowLinks {
            store_page: self.steam_app_id.map(|id| format!("{STEAM_APP_URL}{id}")),
            download_page: format!("{DOWNLOAD_URL}{}", self.category_id),
            activate: self
                .is_activatable_steam_key()
                .then(|| format!("{STEAM_REGISTER_URL}{}", self.redeemed_key_val)),
            gift: (self.is_gift && !self.redeemed_key_val.is_empty() && !self.is_expired)
                .then(|| self.redeemed_key_val.clone()),
        }
    }
}

/// Outbound links for a row
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RowLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_page: Option<String>,
    pub download_page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift: Option<String>,
}
