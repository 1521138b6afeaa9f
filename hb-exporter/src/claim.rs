//! Key claiming
//!
//! Rows are claimed one at a time; the next request starts only after the
//! previous one resolved. Failures are collected per message and never stop
//! the loop. The redeemer never touches rows, results are written back here.

use hb_client::{KeyRedeemer, RedeemOutcome, RedeemRequest};
use serde::Serialize;
use shared::{KeyKind, RedeemMode, Row};
use std::collections::BTreeMap;

/// Failure message → display names it affected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClaimLog(BTreeMap<String, Vec<String>>);

impl ClaimLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: impl Into<String>, name: impl Into<String>) {
        self.0.entry(message.into()).or_default().push(name.into());
    }

    pub fn get(&self, message: &str) -> Option<&[String]> {
        self.0.get(message).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed rows
    pub fn failures(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

/// A value obtained during a bulk claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimedKey {
    pub human_name: String,
    pub value: String,
}

/// Summary of a bulk claim
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClaimReport {
    pub claimed: usize,
    pub revealed: Vec<ClaimedKey>,
    /// Rows left alone because they were not claimable
    pub skipped: usize,
    pub failures: ClaimLog,
}

/// Write a successful outcome into the row
///
/// Gift mode also flips the gift flag so the link is never exported as a key.
pub fn apply_outcome(row: &mut Row, outcome: &RedeemOutcome) -> bool {
    let Some(value) = outcome.value() else {
        return false;
    };
    row.redeemed_key_val = value.to_string();
    if matches!(outcome, RedeemOutcome::GiftLink { .. }) {
        row.is_gift = true;
    }
    row.kind = KeyKind::derive(row.is_gift, &row.redeemed_key_val);
    true
}

/// Claim every claimable row, sequentially
///
/// Copy counters are not touched; callers recompute derived fields over the
/// full row set afterwards.
pub async fn claim_rows<'a, R, I>(rows: I, redeemer: &R, mode: RedeemMode) -> ClaimReport
where
    R: KeyRedeemer + ?Sized,
    I: IntoIterator<Item = &'a mut Row>,
{
    let mut report = ClaimReport::default();

    for row in rows {
        if !row.is_claimable() {
            report.skipped += 1;
            continue;
        }

        let request = RedeemRequest::from(&*row);
        match redeemer.redeem(&request, mode).await {
            Ok(outcome @ (RedeemOutcome::Revealed { .. } | RedeemOutcome::GiftLink { .. })) => {
                apply_outcome(row, &outcome);
                report.claimed += 1;
                report.revealed.push(ClaimedKey {
                    human_name: row.human_name.clone(),
                    value: row.redeemed_key_val.clone(),
                });
            }
            Ok(RedeemOutcome::Rejected { message }) => {
                tracing::warn!(machine_name = %row.machine_name, %message, "Redemption rejected");
                report.failures.record(message, row.human_name.clone());
            }
            Err(e) => {
                tracing::error!(machine_name = %row.machine_name, error = %e, "Error redeeming product");
                report.failures.record(e.to_string(), row.human_name.clone());
            }
        }
    }

    tracing::info!(
        claimed = report.claimed,
        skipped = report.skipped,
        failed = report.failures.failures(),
        "Claim finished"
    );
    report
}
