//! Schema-based report verifier.
//!
//! `SchemaVerifier` implements `ReportVerifier` from `pgx-core`. A report is
//! serialized to JSON and checked in two phases:
//!
//! 1. **Structural**: the JSON is validated against `ReportSchema::json_schema`
//!    with the `jsonschema` crate.
//! 2. **Semantic**: each `VerificationRule` is evaluated in order. All
//!    failures are collected before returning.
//!
//! Custom rules delegate to named functions registered via `register_rule`.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use pgx_contracts::{
    error::{PgxError, PgxResult},
    report::Report,
    verify::{ReportSchema, VerificationFailure, VerificationReport, VerificationRuleType},
};
use pgx_core::traits::ReportVerifier;

use crate::schema::{
    ehr_report_schema, DIPLOTYPE_IS_STAR_PAIR, SAFE_HAS_NO_SEVERITY, VARIANTS_IN_PRIMARY_GENE,
};

/// A caller-supplied verification function.
///
/// Receives the whole serialized report. Returns `Some(message)` when the
/// check fails, or `None` on success.
pub type CustomVerifierFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Verifies reports against one `ReportSchema`.
pub struct SchemaVerifier {
    schema: ReportSchema,
    custom_rules: HashMap<String, CustomVerifierFn>,
}

impl SchemaVerifier {
    /// A verifier for `schema` with no custom rules registered.
    pub fn new(schema: ReportSchema) -> Self {
        Self {
            schema,
            custom_rules: HashMap::new(),
        }
    }

    /// The EHR schema with its custom rules registered.
    pub fn ehr() -> Self {
        let mut verifier = Self::new(ehr_report_schema());
        verifier.register_rule(SAFE_HAS_NO_SEVERITY, Box::new(safe_has_no_severity));
        verifier.register_rule(DIPLOTYPE_IS_STAR_PAIR, Box::new(diplotype_is_star_pair));
        verifier.register_rule(VARIANTS_IN_PRIMARY_GENE, Box::new(variants_in_primary_gene));
        verifier
    }

    /// Register a custom verification function under `name`.
    ///
    /// The name must match the `function_name` of a
    /// `VerificationRuleType::Custom` rule. Registering the same name twice
    /// replaces the previous function.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomVerifierFn) {
        self.custom_rules.insert(name.into(), f);
    }

    /// Check an already-serialized report.
    pub fn verify_value(&self, payload: &Value) -> VerificationReport {
        let schema = &self.schema;
        let mut failures: Vec<VerificationFailure> = Vec::new();

        // ── Phase 1: JSON Schema structural validation ───────────────────────
        if !schema.json_schema.is_null() {
            match jsonschema::validator_for(&schema.json_schema) {
                Ok(validator) => {
                    for error in validator.iter_errors(payload) {
                        let message = format!(
                            "JSON Schema violation at {}: {}",
                            error.instance_path, error
                        );
                        warn!(schema_id = %schema.schema_id, %message, "structural validation failure");
                        failures.push(VerificationFailure {
                            rule_id: "json-schema".to_string(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    let message = format!("invalid JSON Schema document: {e}");
                    warn!(schema_id = %schema.schema_id, %message, "schema compilation failure");
                    failures.push(VerificationFailure {
                        rule_id: "json-schema".to_string(),
                        message,
                    });
                }
            }
        }

        // ── Phase 2: Semantic rule evaluation ────────────────────────────────
        for rule in &schema.rules {
            debug!(rule_id = %rule.rule_id, description = %rule.description, "evaluating verification rule");

            let failure_msg = match &rule.rule_type {
                VerificationRuleType::RequiredField { field_path } => {
                    if resolve_path(payload, field_path).is_none() {
                        Some(format!("required field '{field_path}' is missing or null"))
                    } else {
                        None
                    }
                }

                VerificationRuleType::AllowedValues { field_path, allowed } => {
                    match resolve_path(payload, field_path) {
                        None => Some(format!(
                            "field '{field_path}' is missing; cannot check allowed values"
                        )),
                        Some(actual) if allowed.contains(actual) => None,
                        Some(actual) => Some(format!(
                            "field '{field_path}' has value {actual} which is not in the allowed set"
                        )),
                    }
                }

                VerificationRuleType::NumberRange { field_path, min, max } => {
                    match resolve_path(payload, field_path).map(Value::as_f64) {
                        None => Some(format!(
                            "field '{field_path}' is missing; cannot check range"
                        )),
                        Some(None) => Some(format!("field '{field_path}' is not a number")),
                        Some(Some(n)) if n >= *min && n <= *max => None,
                        Some(Some(n)) => Some(format!(
                            "field '{field_path}' is {n}, outside [{min}, {max}]"
                        )),
                    }
                }

                // An unregistered name is itself a failure.
                VerificationRuleType::Custom { function_name } => {
                    match self.custom_rules.get(function_name.as_str()) {
                        Some(f) => f(payload),
                        None => Some(format!(
                            "no custom rule registered for function name '{function_name}'"
                        )),
                    }
                }
            };

            if let Some(message) = failure_msg {
                warn!(rule_id = %rule.rule_id, %message, "semantic rule failed");
                failures.push(VerificationFailure {
                    rule_id: rule.rule_id.clone(),
                    message,
                });
            }
        }

        let passed = failures.is_empty();
        debug!(
            schema_id = %schema.schema_id,
            passed,
            failure_count = failures.len(),
            "verification complete"
        );

        VerificationReport { passed, failures }
    }
}

impl ReportVerifier for SchemaVerifier {
    fn verify(&self, report: &Report) -> PgxResult<VerificationReport> {
        let payload = serde_json::to_value(report).map_err(|e| PgxError::VerificationFailed {
            reason: format!("report could not be serialized: {e}"),
        })?;
        Ok(self.verify_value(&payload))
    }
}

/// Resolve a dot-notation path against a JSON value. `None` when any
/// segment is missing or the value is `null`.
fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = value;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(v) if !v.is_null() => current = v,
            _ => return None,
        }
    }
    Some(current)
}

fn safe_has_no_severity(payload: &Value) -> Option<String> {
    let label = resolve_path(payload, "risk_assessment.risk_label")?.as_str()?;
    let severity = resolve_path(payload, "risk_assessment.severity")?.as_str()?;
    if label == "Safe" && severity != "none" {
        Some(format!("risk label 'Safe' carries severity '{severity}'"))
    } else {
        None
    }
}

fn diplotype_is_star_pair(payload: &Value) -> Option<String> {
    let diplotype = resolve_path(payload, "pharmacogenomic_profile.diplotype")?.as_str()?;
    let well_formed = diplotype
        .split_once('/')
        .map(|(a, b)| is_star_allele(a) && is_star_allele(b))
        .unwrap_or(false);
    if well_formed {
        None
    } else {
        Some(format!("diplotype '{diplotype}' is not a star-allele pair"))
    }
}

fn is_star_allele(s: &str) -> bool {
    s.strip_prefix('*')
        .map(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(false)
}

fn variants_in_primary_gene(payload: &Value) -> Option<String> {
    let gene = resolve_path(payload, "pharmacogenomic_profile.primary_gene")?.as_str()?;
    let variants = resolve_path(payload, "pharmacogenomic_profile.detected_variants")?.as_array()?;
    let stray: Vec<&str> = variants
        .iter()
        .filter(|v| v.get("gene").and_then(Value::as_str) != Some(gene))
        .map(|v| v.get("rsid").and_then(Value::as_str).unwrap_or("?"))
        .collect();
    if stray.is_empty() {
        None
    } else {
        Some(format!("variants outside primary gene '{gene}': {}", stray.join(", ")))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
