//! Row selection, the CLI counterpart of the table search

use shared::{Category, Row};

/// Conjunction of optional criteria; the default matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    /// Case-insensitive substring of display, bundle or machine name
    pub search: Option<String>,
    pub category: Option<Category>,
    pub key_type: Option<String>,
    pub unrevealed_only: bool,
    pub hide_expired: bool,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_key_type(mut self, key_type: impl Into<String>) -> Self {
        self.key_type = Some(key_type.into());
        self
    }

    pub fn unrevealed_only(mut self) -> Self {
        self.unrevealed_only = true;
        self
    }

    pub fn hide_expired(mut self) -> Self {
        self.hide_expired = true;
        self
    }

    pub fn matches(&self, row: &Row) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = [&row.human_name, &row.category_human_name, &row.machine_name]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if self.category.is_some_and(|c| c != row.category) {
            return false;
        }
        if self
            .key_type
            .as_deref()
            .is_some_and(|t| !t.eq_ignore_ascii_case(&row.key_type))
        {
            return false;
        }
        if self.unrevealed_only && row.is_revealed() {
            return false;
        }
        if self.hide_expired && row.is_expired {
            return false;
        }
        true
    }
}
