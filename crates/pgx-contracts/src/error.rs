//! Error types for the PGX risk pipeline.
//!
//! All fallible operations in the workspace return `PgxResult<T>`.
//! Only `Format` and `UnsupportedDrug` are expected to reach a caller during a
//! normal run; the rest describe collaborator or configuration failures.

use thiserror::Error;

/// The unified error type for the PGX crates.
#[derive(Debug, Error)]
pub enum PgxError {
    /// The input is not a usable variant file (missing `##fileformat` line).
    #[error("invalid variant file: {reason}")]
    Format { reason: String },

    /// None of the requested drug names map to a known drug–gene pair.
    #[error("none of the requested drugs are supported: {requested}")]
    UnsupportedDrug { requested: String },

    /// The rationale generator failed or returned malformed text.
    ///
    /// Never surfaced by the pipeline; it substitutes a templated explanation.
    #[error("rationale generation failed: {reason}")]
    RationaleGeneration { reason: String },

    /// An assembled report does not conform to the EHR report schema.
    #[error("report verification failed: {reason}")]
    VerificationFailed { reason: String },

    /// The history store could not persist a batch of reports.
    #[error("history write failed: {reason}")]
    HistoryWriteFailed { reason: String },

    /// An input file could not be read.
    #[error("failed to read input: {reason}")]
    Io { reason: String },

    /// The knowledge base or another configuration source is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the PGX crates.
pub type PgxResult<T> = Result<T, PgxError>;
