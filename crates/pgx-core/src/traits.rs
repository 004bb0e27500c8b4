//! Collaborator traits for the PGX pipeline.
//!
//! These three traits are the pipeline's only seams to the outside:
//!
//! - `RationaleGenerator`: untrusted text generation, possibly LLM-backed
//! - `ReportVerifier`: checks an assembled report against the EHR schema
//! - `HistoryStore`: append-only sink for completed reports
//!
//! Inference itself (parsing, phenotype, risk, recommendation) is plain
//! functions over the knowledge base and is not pluggable.

use pgx_contracts::{
    error::PgxResult,
    history::{HistoryEntry, HistoryStats},
    profile::GeneProfile,
    recommendation::ClinicalRecommendation,
    report::{Explanation, Report, RunId},
    risk::RiskAssessment,
    verify::VerificationReport,
};

/// Produces the free-text rationale attached to a report.
///
/// Implementations are **untrusted**: the pipeline recovers from any error or
/// malformed explanation by substituting a templated one, so a failing
/// generator can only degrade explanation quality, never the structured risk
/// data.
pub trait RationaleGenerator: Send + Sync {
    /// Explain the assessment for `drug`.
    ///
    /// Receives only already-computed structured fields.
    fn generate(
        &self,
        drug: &str,
        profile: &GeneProfile,
        risk: &RiskAssessment,
        recommendation: &ClinicalRecommendation,
    ) -> PgxResult<Explanation>;
}

/// Checks an assembled report before it leaves the pipeline.
pub trait ReportVerifier: Send + Sync {
    /// Return a `VerificationReport` with `passed = true` if every check
    /// passes, or `passed = false` with populated `failures`.
    fn verify(&self, report: &Report) -> PgxResult<VerificationReport>;
}

/// The history of completed reports.
///
/// Entries are kept most-recent-first and the store enforces its own
/// capacity, dropping the oldest entries beyond it.
pub trait HistoryStore: Send + Sync {
    /// Prepend one run's reports as a single batch, preserving their order.
    fn record_run(&self, run_id: &RunId, reports: &[Report]) -> PgxResult<()>;

    /// The `limit` most recent entries, newest first.
    fn recent(&self, limit: usize) -> PgxResult<Vec<HistoryEntry>>;

    /// Aggregate statistics over every retained entry.
    fn stats(&self) -> PgxResult<HistoryStats>;
}
