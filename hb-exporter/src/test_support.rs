//! Row fixtures for unit tests

use shared::{Category, KeyKind, Ownership, Row};

/// Unrevealed steam key in bundle `g1`, adjusted per test
pub(crate) struct RowBuilder(Row);

impl RowBuilder {
    pub(crate) fn new(human_name: &str) -> Self {
        Self(Row {
            machine_name: human_name.to_lowercase().replace(' ', "_"),
            category: Category::Bundle,
            category_id: "g1".to_string(),
            category_human_name: "Spring Bundle".to_string(),
            human_name: human_name.to_string(),
            key_type: "steam".to_string(),
            kind: KeyKind::Unknown,
            redeemed_key_val: String::new(),
            is_gift: false,
            is_expired: false,
            expiry_date: String::new(),
            steam_app_id: None,
            created: String::new(),
            keyindex: Some(0),
            owned: Ownership::Unknown,
            copies: 1,
            unrevealed_copies: 1,
        })
    }

    pub(crate) fn machine_name(mut self, machine_name: &str) -> Self {
        self.0.machine_name = machine_name.to_string();
        self
    }

    pub(crate) fn key_type(mut self, key_type: &str) -> Self {
        self.0.key_type = key_type.to_string();
        self
    }

    pub(crate) fn revealed(mut self, value: &str) -> Self {
        self.0.redeemed_key_val = value.to_string();
        self
    }

    pub(crate) fn gift(mut self) -> Self {
        self.0.is_gift = true;
        self
    }

    pub(crate) fn expired(mut self) -> Self {
        self.0.is_expired = true;
        self
    }

    pub(crate) fn app_id(mut self, id: u64) -> Self {
        self.0.steam_app_id = Some(id);
        self
    }

    pub(crate) fn build(mut self) -> Row {
        self.0.kind = KeyKind::derive(self.0.is_gift, &self.0.redeemed_key_val);
        self.0
    }
}

/// Shorthand for an untouched fixture
pub(crate) fn row(human_name: &str) -> Row {
    RowBuilder::new(human_name).build()
}
