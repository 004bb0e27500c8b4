//! Report verification schema and result types.
//!
//! Before reports are persisted or returned, a verifier checks the serialized
//! report against a `ReportSchema`: a JSON Schema document for structure plus
//! semantic rules that JSON Schema cannot express cleanly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything a serialized `Report` is checked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSchema {
    /// Unique identifier for this schema (e.g. "ehr-pgx-report-v1").
    pub schema_id: String,
    /// A JSON Schema document used for structural validation.
    pub json_schema: Value,
    /// Additional rules evaluated after structural validation.
    pub rules: Vec<VerificationRule>,
}

/// A single verification rule applied to a serialized report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRule {
    /// Unique identifier for this rule, referenced in failure reports.
    pub rule_id: String,
    pub description: String,
    pub rule_type: VerificationRuleType,
}

/// The kinds of semantic checks the verifier supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationRuleType {
    /// The field at `field_path` must be present and non-null.
    RequiredField {
        /// Dotted path, e.g. "risk_assessment.risk_label".
        field_path: String,
    },

    /// The field at `field_path` must equal one of `allowed`.
    AllowedValues { field_path: String, allowed: Vec<Value> },

    /// The numeric field at `field_path` must lie within `[min, max]`.
    NumberRange { field_path: String, min: f64, max: f64 },

    /// Delegate to a named function registered with the verifier.
    Custom { function_name: String },
}

/// The result of running all checks in a `ReportSchema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if every check passed.
    pub passed: bool,
    /// All failures collected during this run. Empty on pass.
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    /// Join all failures into one line, `[rule] message; …`.
    pub fn failure_summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single rule failure within a `VerificationReport`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    pub rule_id: String,
    pub message: String,
}
