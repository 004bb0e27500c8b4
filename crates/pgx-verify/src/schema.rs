//! The EHR report schema.
//!
//! Downstream EHR ingestion relies on the exact field names and JSON types
//! below; the semantic rules pin the closed vocabularies and ranges.

use serde_json::{json, Value};

use pgx_contracts::verify::{ReportSchema, VerificationRule, VerificationRuleType};

pub const EHR_SCHEMA_ID: &str = "ehr-pgx-report-v1";

/// Custom rule: a `Safe` label always carries severity `none`.
pub const SAFE_HAS_NO_SEVERITY: &str = "safe-has-no-severity";

/// Custom rule: the diplotype is a `*x/*y` star-allele pair.
pub const DIPLOTYPE_IS_STAR_PAIR: &str = "diplotype-is-star-pair";

/// Custom rule: every detected variant lies in the report's primary gene.
pub const VARIANTS_IN_PRIMARY_GENE: &str = "variants-in-primary-gene";

pub const RISK_LABELS: [&str; 5] = ["Safe", "Adjust Dosage", "Toxic", "Ineffective", "Unknown"];
pub const SEVERITIES: [&str; 5] = ["none", "low", "moderate", "high", "critical"];
pub const PHENOTYPES: [&str; 6] = ["PM", "IM", "NM", "RM", "URM", "Unknown"];
pub const EVIDENCE_LEVELS: [&str; 4] = ["A", "B", "C", "D"];

/// The schema every outgoing report is checked against.
pub fn ehr_report_schema() -> ReportSchema {
    ReportSchema {
        schema_id: EHR_SCHEMA_ID.to_string(),
        json_schema: ehr_json_schema(),
        rules: vec![
            rule(
                "patient-id-required",
                "Every report names the patient",
                VerificationRuleType::RequiredField { field_path: "patient_id".to_string() },
            ),
            rule(
                "risk-label-allowed",
                "Risk label is one of the closed set",
                allowed("risk_assessment.risk_label", &RISK_LABELS),
            ),
            rule(
                "severity-allowed",
                "Severity is one of the closed set",
                allowed("risk_assessment.severity", &SEVERITIES),
            ),
            rule(
                "phenotype-allowed",
                "Phenotype uses a standard abbreviation",
                allowed("pharmacogenomic_profile.phenotype", &PHENOTYPES),
            ),
            rule(
                "evidence-level-allowed",
                "Evidence level is a CPIC level",
                allowed("clinical_recommendation.evidenceLevel", &EVIDENCE_LEVELS),
            ),
            rule(
                "confidence-in-range",
                "Confidence score is a probability",
                VerificationRuleType::NumberRange {
                    field_path: "risk_assessment.confidence_score".to_string(),
                    min: 0.0,
                    max: 1.0,
                },
            ),
            rule(
                "completeness-in-range",
                "Annotation completeness is a fraction",
                VerificationRuleType::NumberRange {
                    field_path: "quality_metrics.annotationCompleteness".to_string(),
                    min: 0.0,
                    max: 1.0,
                },
            ),
            rule(
                SAFE_HAS_NO_SEVERITY,
                "Safe reports carry no severity",
                VerificationRuleType::Custom { function_name: SAFE_HAS_NO_SEVERITY.to_string() },
            ),
            rule(
                DIPLOTYPE_IS_STAR_PAIR,
                "Diplotype is a star-allele pair",
                VerificationRuleType::Custom { function_name: DIPLOTYPE_IS_STAR_PAIR.to_string() },
            ),
            rule(
                VARIANTS_IN_PRIMARY_GENE,
                "Profile variants belong to the primary gene",
                VerificationRuleType::Custom { function_name: VARIANTS_IN_PRIMARY_GENE.to_string() },
            ),
        ],
    }
}

fn rule(id: &str, description: &str, rule_type: VerificationRuleType) -> VerificationRule {
    VerificationRule {
        rule_id: id.to_string(),
        description: description.to_string(),
        rule_type,
    }
}

fn allowed(field_path: &str, values: &[&str]) -> VerificationRuleType {
    VerificationRuleType::AllowedValues {
        field_path: field_path.to_string(),
        allowed: values.iter().map(|v| Value::from(*v)).collect(),
    }
}

fn ehr_json_schema() -> Value {
    let text = json!({ "type": "string", "minLength": 1 });
    let count = json!({ "type": "integer", "minimum": 0 });

    json!({
        "type": "object",
        "required": [
            "patient_id", "drug", "timestamp", "risk_assessment",
            "pharmacogenomic_profile", "clinical_recommendation",
            "llm_generated_explanation", "quality_metrics"
        ],
        "properties": {
            "patient_id": text,
            "drug": text,
            "timestamp": { "type": "string" },
            "risk_assessment": {
                "type": "object",
                "required": ["risk_label", "confidence_score", "severity"],
                "properties": {
                    "risk_label": { "type": "string" },
                    "confidence_score": { "type": "number" },
                    "severity": { "type": "string" }
                }
            },
            "pharmacogenomic_profile": {
                "type": "object",
                "required": ["primary_gene", "diplotype", "phenotype", "detected_variants"],
                "properties": {
                    "primary_gene": text,
                    "diplotype": text,
                    "phenotype": { "type": "string" },
                    "detected_variants": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": [
                                "rsid", "gene", "position", "ref", "alt",
                                "star_allele", "clinical_significance", "genotype"
                            ],
                            "properties": {
                                "rsid": text,
                                "gene": text,
                                "position": count,
                                "ref": { "type": "string" },
                                "alt": { "type": "string" },
                                "star_allele": text,
                                "clinical_significance": { "type": "string" },
                                "genotype": text,
                                "chromosome": { "type": "string" }
                            }
                        }
                    }
                }
            },
            "clinical_recommendation": {
                "type": "object",
                "required": [
                    "action", "dosingGuideline", "monitoringAdvice",
                    "alternativeDrugs", "cpicGuideline", "evidenceLevel"
                ],
                "properties": {
                    "action": text,
                    "dosingGuideline": text,
                    "monitoringAdvice": { "type": "string" },
                    "alternativeDrugs": { "type": "array", "items": { "type": "string" } },
                    "cpicGuideline": text,
                    "evidenceLevel": { "type": "string" }
                }
            },
            "llm_generated_explanation": {
                "type": "object",
                "required": ["summary", "mechanism", "clinicalImpact", "variantDetails", "references"],
                "properties": {
                    "summary": text,
                    "mechanism": text,
                    "clinicalImpact": text,
                    "variantDetails": text,
                    "references": { "type": "array", "items": { "type": "string" } }
                }
            },
            "quality_metrics": {
                "type": "object",
                "required": [
                    "vcf_parsing_success", "variantsAnalyzed",
                    "pharmacogenomicVariantsFound", "annotationCompleteness", "timestamp"
                ],
                "properties": {
                    "vcf_parsing_success": { "type": "boolean" },
                    "variantsAnalyzed": count,
                    "pharmacogenomicVariantsFound": count,
                    "annotationCompleteness": { "type": "number" },
                    "timestamp": { "type": "string" }
                }
            }
        }
    })
}
