//! History entries and aggregate statistics.
//!
//! The history store keeps completed reports most-recent-first. Each entry
//! wraps a `Report` with the run that produced it and a content fingerprint.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{report::{Report, RunId}, risk::RiskLabel};

/// One stored report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The run that produced the report.
    pub run_id: RunId,
    /// Wall-clock time the batch was stored (UTC).
    pub recorded_at: DateTime<Utc>,
    /// SHA-256 (hex) of the report's content, excluding timestamps.
    ///
    /// Two runs over identical input produce identical fingerprints.
    pub fingerprint: String,
    pub report: Report,
}

/// Aggregate figures over everything currently retained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_reports: usize,
    pub by_risk_label: BTreeMap<RiskLabel, usize>,
    /// Most frequently assessed drug; ties go to the alphabetically first.
    pub most_frequent_drug: Option<String>,
    /// Timestamp of the newest retained report.
    pub latest_timestamp: Option<DateTime<Utc>>,
}
