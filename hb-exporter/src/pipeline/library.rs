//! The loaded row set
//!
//! Owns the rows between a reload and the next one. Every mutation goes
//! through here so derived fields are recomputed over the complete set.

use super::enrich::{apply_ownership, count_copies, recompute_derived};
use super::filter::RowFilter;
use super::normalize::normalize_orders;
use super::ownership::{OwnedApps, OwnershipCache};
use crate::claim::{ClaimReport, apply_outcome, claim_rows};
use crate::store::{KeyValueStore, SkippedRecord, load_orders};
use hb_client::{ClientResult, KeyRedeemer, OwnedAppsSource, RedeemOutcome, RedeemRequest};
use shared::{Order, RedeemMode, Row};

#[derive(Debug, Clone, Default)]
pub struct KeyLibrary {
    rows: Vec<Row>,
    skipped: Vec<SkippedRecord>,
}

impl KeyLibrary {
    /// Normalize and enrich a batch of orders
    pub fn from_orders(orders: &[Order], owned: &OwnedApps) -> Self {
        let mut rows = normalize_orders(orders);
        apply_ownership(&mut rows, owned);
        count_copies(&mut rows);
        Self {
            rows,
            skipped: Vec::new(),
        }
    }

    /// Full reload: read the store, resolve ownership, rebuild every row
    pub async fn load<S, F>(
        store: &mut S,
        cache: &mut OwnershipCache,
        source: &F,
        refresh_owned: bool,
    ) -> Self
    where
        S: KeyValueStore + ?Sized,
        F: OwnedAppsSource + ?Sized,
    {
        tracing::debug!("Loading products...");
        let report = load_orders(&*store);
        let owned = cache.load(&mut *store, source, refresh_owned).await;
        tracing::info!(
            orders = report.orders.len(),
            owned = owned.len(),
            skipped = report.skipped.len(),
            "Loaded orders"
        );

        let mut library = Self::from_orders(&report.orders, owned);
        library.skipped = report.skipped;
        library
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records the last load could not decode
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Rows matching the filter, in load order
    pub fn select(&self, filter: &RowFilter) -> Vec<&Row> {
        self.rows.iter().filter(|row| filter.matches(row)).collect()
    }

    /// Owned copy of the matching rows, the export input
    pub fn snapshot(&self, filter: &RowFilter) -> Vec<Row> {
        self.select(filter).into_iter().cloned().collect()
    }

    /// Matching rows, most recent purchase first
    pub fn newest_first(&self, filter: &RowFilter) -> Vec<&Row> {
        let mut rows = self.select(filter);
        rows.sort_by(|a, b| b.created.cmp(&a.created));
        rows
    }

    pub fn find(&self, gamekey: &str, keyindex: u32) -> Option<&Row> {
        self.rows
            .iter()
            .find(|row| row.category_id == gamekey && row.keyindex == Some(keyindex))
    }

    /// Redo every derived field over the full set
    pub fn recompute(&mut self) {
        recompute_derived(&mut self.rows);
    }

    /// Bulk claim over the filtered subset
    pub async fn claim<R: KeyRedeemer + ?Sized>(
        &mut self,
        filter: &RowFilter,
        redeemer: &R,
        mode: RedeemMode,
    ) -> ClaimReport {
        let selected = self.rows.iter_mut().filter(|row| filter.matches(row));
        let report = claim_rows(selected, redeemer, mode).await;
        self.recompute();
        report
    }

    /// Bulk claim, then snapshot the same rows that were selected before it
    ///
    /// A claimed row may stop matching the filter (`unrevealed_only`), it is
    /// still part of the returned selection.
    pub async fn claim_snapshot<R: KeyRedeemer + ?Sized>(
        &mut self,
        filter: &RowFilter,
        redeemer: &R,
        mode: RedeemMode,
    ) -> (ClaimReport, Vec<Row>) {
        let positions: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| filter.matches(row))
            .map(|(i, _)| i)
            .collect();
        let selected = self
            .rows
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| positions.binary_search(i).is_ok())
            .map(|(_, row)| row);
        let report = claim_rows(selected, redeemer, mode).await;
        self.recompute();
        let rows = positions.iter().map(|&i| self.rows[i].clone()).collect();
        (report, rows)
    }

    /// Reveal a single row identified by order and key index
    pub async fn claim_one<R: KeyRedeemer + ?Sized>(
        &mut self,
        gamekey: &str,
        keyindex: u32,
        redeemer: &R,
        mode: RedeemMode,
    ) -> Option<ClientResult<RedeemOutcome>> {
        let index = self
            .rows
            .iter()
            .position(|row| row.category_id == gamekey && row.keyindex == Some(keyindex))?;

        let request = RedeemRequest::from(&self.rows[index]);
        let result = redeemer.redeem(&request, mode).await;
        if let Ok(outcome) = &result
            && apply_outcome(&mut self.rows[index], outcome)
        {
            self.recompute();
        }
        Some(result)
    }
}
