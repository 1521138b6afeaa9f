//! Derived row fields
//!
//! Ownership labels depend only on the owned set. Copy counters are
//! aggregates over the whole row set and must be recomputed after every load
//! or mutation.

use super::ownership::OwnedApps;
use shared::{KeyKind, Ownership, Row};
use std::collections::HashMap;

pub fn ownership_label(app_id: Option<u64>, owned: &OwnedApps) -> Ownership {
    match app_id {
        Some(id) if owned.contains(id) => Ownership::Yes,
        Some(_) => Ownership::No,
        None => Ownership::Unknown,
    }
}

pub fn apply_ownership(rows: &mut [Row], owned: &OwnedApps) {
    for row in rows {
        row.owned = ownership_label(row.steam_app_id, owned);
    }
}

/// Group by display name, attach total and still-claimable counts
pub fn count_copies(rows: &mut [Row]) {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for row in rows.iter() {
        let entry = counts.entry(row.human_name.clone()).or_default();
        entry.0 += 1;
        if row.is_unrevealed_key() {
            entry.1 += 1;
        }
    }

    for row in rows.iter_mut() {
        let (copies, unrevealed) = counts.get(&row.human_name).copied().unwrap_or_default();
        row.copies = copies;
        row.unrevealed_copies = unrevealed;
    }
}

/// Type labels follow the gift flag and revealed value
pub fn refresh_kinds(rows: &mut [Row]) {
    for row in rows {
        row.kind = KeyKind::derive(row.is_gift, &row.redeemed_key_val);
    }
}

/// Everything that depends on mutable row state
pub fn recompute_derived(rows: &mut [Row]) {
    refresh_kinds(rows);
    count_copies(rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RowBuilder, row};

    #[test]
    fn test_ownership_labels() {
        let owned: OwnedApps = [440u64].into_iter().collect();
        let mut rows = vec![
            RowBuilder::new("A").app_id(440).build(),
            RowBuilder::new("B").app_id(570).build(),
            row("C"),
        ];
        apply_ownership(&mut rows, &owned);
        assert_eq!(rows[0].owned, Ownership::Yes);
        assert_eq!(rows[1].owned, Ownership::No);
        assert_eq!(rows[2].owned, Ownership::Unknown);
    }

    #[test]
    fn test_empty_owned_set_still_labels() {
        let mut rows = vec![RowBuilder::new("A").app_id(440).build(), row("B")];
        apply_ownership(&mut rows, &OwnedApps::new());
        assert_eq!(rows[0].owned, Ownership::No);
        assert_eq!(rows[1].owned, Ownership::Unknown);
    }

    #[test]
    fn test_copy_counts() {
        let mut rows = vec![
            row("Game A"),
            RowBuilder::new("Game A").revealed("KEY-1").build(),
            RowBuilder::new("Game A").gift().build(),
            row("Game B"),
        ];
        count_copies(&mut rows);

        for r in &rows[..3] {
            assert_eq!(r.copies, 3);
            assert_eq!(r.unrevealed_copies, 1);
        }
        assert_eq!(rows[3].copies, 1);
        assert_eq!(rows[3].unrevealed_copies, 1);
    }

    #[test]
    fn test_copy_count_invariants() {
        let mut rows: Vec<Row> = (0..20)
            .map(|i| {
                let name = format!("Game {}", i % 4);
                let revealed = if i % 3 == 0 { "KEY" } else { "" };
                let builder = RowBuilder::new(&name).revealed(revealed);
                if i % 5 == 0 {
                    builder.gift().build()
                } else {
                    builder.build()
                }
            })
            .collect();
        count_copies(&mut rows);

        let mut seen: HashMap<String, usize> = HashMap::new();
        for r in &rows {
            *seen.entry(r.human_name.clone()).or_default() += 1;
            assert!(r.unrevealed_copies <= r.copies);
        }
        for r in &rows {
            assert_eq!(r.copies, seen[&r.human_name]);
        }
    }

    #[test]
    fn test_recompute_after_mutation() {
        let mut rows = vec![row("Game A"), row("Game A")];
        recompute_derived(&mut rows);
        assert_eq!(rows[0].unrevealed_copies, 2);

        rows[0].redeemed_key_val = "KEY-1".to_string();
        recompute_derived(&mut rows);
        assert_eq!(rows[0].kind, KeyKind::Key);
        assert_eq!(rows[1].kind, KeyKind::Unknown);
        assert_eq!(rows[1].unrevealed_copies, 1);
    }
}
