//! Order → row flattening
//!
//! One row per key entry, joined with the parent order's fields. Empty strings
//! are treated the same as missing values in every fallback.

use shared::{Category, KeyEntry, KeyKind, Order, OrderCategory, Ownership, Row};

const PLACEHOLDER: &str = "-";

/// Display category for a raw order category
pub fn category_label(raw: OrderCategory) -> Category {
    match raw {
        OrderCategory::Storefront => Category::Store,
        OrderCategory::Bundle => Category::Bundle,
        OrderCategory::Subscriptioncontent => Category::Choice,
        _ => Category::Other,
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

fn normalize_entry(order: &Order, category: Category, entry: &KeyEntry) -> Row {
    let machine_name = non_empty(entry.machine_name.as_ref());
    let redeemed = non_empty(entry.redeemed_key_val.as_ref()).unwrap_or_default();
    let is_gift = entry.is_gift.unwrap_or(false);

    Row {
        machine_name: machine_name.unwrap_or(PLACEHOLDER).to_string(),
        category,
        category_id: order.gamekey.clone(),
        category_human_name: non_empty(order.product.human_name.as_ref())
            .unwrap_or(PLACEHOLDER)
            .to_string(),
        human_name: non_empty(entry.human_name.as_ref())
            .or(machine_name)
            .unwrap_or(PLACEHOLDER)
            .to_string(),
        key_type: non_empty(entry.key_type.as_ref()).unwrap_or(PLACEHOLDER).to_string(),
        kind: KeyKind::derive(is_gift, redeemed),
        redeemed_key_val: redeemed.to_string(),
        is_gift,
        is_expired: entry.is_expired.unwrap_or(false),
        expiry_date: non_empty(entry.expiry_date.as_ref()).unwrap_or_default().to_string(),
        // id 0 is not a real app
        steam_app_id: entry.steam_app_id.filter(|id| *id != 0),
        created: non_empty(order.created.as_ref()).unwrap_or_default().to_string(),
        keyindex: entry.keyindex,
        owned: Ownership::Unknown,
        copies: 0,
        unrevealed_copies: 0,
    }
}

/// Flatten one order
pub fn normalize_order(order: &Order) -> Vec<Row> {
    let category = category_label(order.product.category);
    order
        .keys()
        .iter()
        .map(|entry| normalize_entry(order, category, entry))
        .collect()
}

/// Flatten a batch of orders, preserving order
pub fn normalize_orders(orders: &[Order]) -> Vec<Row> {
    orders.iter().flat_map(normalize_order).collect()
}
