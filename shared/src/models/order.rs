//! Order Model
//!
//! Shape of the order records cached by the vendor's account page. Every
//! field is optional on the wire; missing values are defaulted here and the
//! display fallbacks are applied later by the normalizer.

use serde::{Deserialize, Deserializer, Serialize};

/// Explicit `null` decodes like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw product category as stored on the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderCategory {
    Storefront,
    Bundle,
    Gamepage,
    Widget,
    Subscriptioncontent,
    /// Any value this crate does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

/// Product descriptor attached to an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: OrderCategory,
    #[serde(default)]
    pub human_name: Option<String>,
}

/// Third-party key entry (one `all_tpks` element)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct KeyEntry {
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub human_name: Option<String>,
    #[serde(default)]
    pub is_expired: Option<bool>,
    #[serde(default)]
    pub is_gift: Option<bool>,
    #[serde(default)]
    pub key_type: Option<String>,
    /// Position of the key within its order, required for redemption
    #[serde(default)]
    pub keyindex: Option<u32>,
    /// Revealed key (or gift link) once claimed
    #[serde(default)]
    pub redeemed_key_val: Option<String>,
    #[serde(default)]
    pub steam_app_id: Option<u64>,
    #[serde(default)]
    pub sold_out: Option<bool>,
    #[serde(default)]
    pub direct_redeem: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exclusive_countries: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disallowed_countries: Vec<String>,
}

/// Key container (`tpkd_dict`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct KeyBundle {
    #[serde(default)]
    pub all_tpks: Option<Vec<KeyEntry>>,
}

/// Order record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Order {
    #[serde(default)]
    pub created: Option<String>,
    /// Order identifier, doubles as the `key` parameter for redemption
    #[serde(default, deserialize_with = "null_as_default")]
    pub gamekey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product: OrderProduct,
    #[serde(default)]
    pub tpkd_dict: Option<KeyBundle>,
}

impl Order {
    /// Key entries of this order, empty when the record carries none
    pub fn keys(&self) -> &[KeyEntry] {
        self.tpkd_dict
            .as_ref()
            .and_then(|dict| dict.all_tpks.as_deref())
            .unwrap_or_default()
    }

    /// Whether the order has at least one key entry
    pub fn has_keys(&self) -> bool {
        !self.keys().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserialize_full() {
        let json = r#"{
            "created": "2024-01-01T10:00:00",
            "gamekey": "g1",
            "product": {"category": "bundle", "human_name": "Spring Bundle"},
            "tpkd_dict": {"all_tpks": [{
                "machine_name": "steam_123",
                "human_name": "Game A",
                "key_type": "steam",
                "is_gift": false,
                "is_expired": false,
                "keyindex": 0,
                "steam_app_id": 440,
                "exclusive_countries": ["DE"]
            }]}
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.gamekey, "g1");
        assert_eq!(order.product.category, OrderCategory::Bundle);
        assert_eq!(order.keys().len(), 1);
        let key = &order.keys()[0];
        assert_eq!(key.machine_name.as_deref(), Some("steam_123"));
        assert_eq!(key.keyindex, Some(0));
        assert_eq!(key.steam_app_id, Some(440));
        assert_eq!(key.exclusive_countries, vec!["DE".to_string()]);
        assert!(key.disallowed_countries.is_empty());
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let json = r#"{"gamekey": "g2", "product": {"category": "mystery"}}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.product.category, OrderCategory::Unknown);
        assert!(!order.has_keys());
    }

    #[test]
    fn test_missing_key_list() {
        let order: Order = serde_json::from_str(r#"{"gamekey": "g3", "tpkd_dict": {}}"#).unwrap();
        assert!(order.keys().is_empty());

        let order: Order =
            serde_json::from_str(r#"{"gamekey": "g4", "tpkd_dict": {"all_tpks": null}}"#).unwrap();
        assert!(!order.has_keys());
    }

    #[test]
    fn test_null_category_is_unknown() {
        let order: Order = serde_json::from_str(r#"{"gamekey": "g5", "product": {"category": null}}"#).unwrap();
        assert_eq!(order.product.category, OrderCategory::Unknown);
    }

    #[test]
    fn test_null_product_is_default() {
        let order: Order = serde_json::from_str(r#"{"gamekey": "g6", "product": null}"#).unwrap();
        assert_eq!(order.product, OrderProduct::default());
    }

    #[test]
    fn test_null_country_lists_are_empty() {
        let entry: KeyEntry = serde_json::from_str(
            r#"{"machine_name": "a", "exclusive_countries": null, "disallowed_countries": null}"#,
        )
        .unwrap();
        assert!(entry.exclusive_countries.is_empty());
        assert!(entry.disallowed_countries.is_empty());
    }
}
