//! The bounded, most-recent-first entry list shared by every store.

use std::collections::BTreeMap;

use chrono::Utc;

use pgx_contracts::{
    error::PgxResult,
    history::{HistoryEntry, HistoryStats},
    report::{Report, RunId},
};

use crate::fingerprint::fingerprint_report;

/// Entries newest first, never longer than `capacity`.
#[derive(Debug, Clone)]
pub(crate) struct HistoryLog {
    pub(crate) entries: Vec<HistoryEntry>,
    pub(crate) capacity: usize,
}

impl HistoryLog {
    pub(crate) fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(), capacity }
    }

    /// Adopt previously stored entries, dropping any beyond capacity.
    pub(crate) fn with_entries(mut entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// The log as it would be after prepending one batch.
    ///
    /// `self` is not modified, so a store can persist the result before
    /// committing to it. Returns the new log and the number of entries
    /// evicted.
    pub(crate) fn with_batch(&self, run_id: &RunId, reports: &[Report]) -> PgxResult<(Self, usize)> {
        let recorded_at = Utc::now();

        let mut entries = Vec::with_capacity(reports.len() + self.entries.len());
        for report in reports {
            entries.push(HistoryEntry {
                run_id: run_id.clone(),
                recorded_at,
                fingerprint: fingerprint_report(report)?,
                report: report.clone(),
            });
        }
        entries.extend(self.entries.iter().cloned());

        let evicted = entries.len().saturating_sub(self.capacity);
        entries.truncate(self.capacity);

        Ok((Self { entries, capacity: self.capacity }, evicted))
    }

    pub(crate) fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub(crate) fn stats(&self) -> HistoryStats {
        let mut by_risk_label = BTreeMap::new();
        let mut by_drug: BTreeMap<&str, usize> = BTreeMap::new();

        for entry in &self.entries {
            *by_risk_label
                .entry(entry.report.risk_assessment.risk_label)
                .or_insert(0) += 1;
            *by_drug.entry(entry.report.drug.as_str()).or_insert(0) += 1;
        }

        // Highest count wins; on a tie the alphabetically first name does.
        let most_frequent_drug = by_drug
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(drug, _)| drug.to_string());

        HistoryStats {
            total_reports: self.entries.len(),
            by_risk_label,
            most_frequent_drug,
            latest_timestamp: self.entries.iter().map(|e| e.report.timestamp).max(),
        }
    }
}
