//! # pgx-contracts
//!
//! Shared types and error contracts for the PGX risk pipeline.
//!
//! Every crate in the workspace imports from here. No inference logic lives
//! in this crate, only data definitions, the recommendation merge and error
//! types.

pub mod error;
pub mod history;
pub mod profile;
pub mod recommendation;
pub mod report;
pub mod risk;
pub mod variant;
pub mod verify;

#[cfg(test)]
mod tests {
    use super::*;
    use error::PgxError;
    use profile::Phenotype;
    use recommendation::{ClinicalRecommendation, EvidenceLevel, RecommendationOverride};
    use report::{Explanation, RunId};
    use risk::{RiskAssessment, RiskLabel, Severity};
    use variant::Zygosity;

    fn baseline() -> ClinicalRecommendation {
        ClinicalRecommendation {
            action: "Standard Dosing".to_string(),
            dosing_guideline: "Use label-recommended dosing.".to_string(),
            monitoring_advice: "Routine monitoring.".to_string(),
            alternative_drugs: vec![],
            cpic_guideline: "CPIC Guideline for Codeine and CYP2D6".to_string(),
            evidence_level: EvidenceLevel::A,
        }
    }

    // ── Zygosity ─────────────────────────────────────────────────────────────

    #[test]
    fn zygosity_recognizes_phased_and_unphased_calls() {
        assert_eq!(Zygosity::from_call("0/0"), Zygosity::HomozygousReference);
        assert_eq!(Zygosity::from_call("0|0"), Zygosity::HomozygousReference);
        assert_eq!(Zygosity::from_call("0/1"), Zygosity::Heterozygous);
        assert_eq!(Zygosity::from_call("1/0"), Zygosity::Heterozygous);
        assert_eq!(Zygosity::from_call("1|0"), Zygosity::Heterozygous);
        assert_eq!(Zygosity::from_call("1/1"), Zygosity::HomozygousAlternate);
        assert_eq!(Zygosity::from_call("1|1"), Zygosity::HomozygousAlternate);
    }

    #[test]
    fn zygosity_unrecognized_calls_are_other() {
        assert_eq!(Zygosity::from_call("./."), Zygosity::Other);
        assert_eq!(Zygosity::from_call("1/2"), Zygosity::Other);
        assert_eq!(Zygosity::from_call(""), Zygosity::Other);
        assert!(!Zygosity::Other.is_non_reference());
        assert!(Zygosity::Heterozygous.is_non_reference());
    }

    // ── Wire names ───────────────────────────────────────────────────────────

    #[test]
    fn phenotype_serializes_as_abbreviation() {
        let json = serde_json::to_string(&Phenotype::UltraRapidMetabolizer).unwrap();
        assert_eq!(json, "\"URM\"");
        let decoded: Phenotype = serde_json::from_str("\"PM\"").unwrap();
        assert_eq!(decoded, Phenotype::PoorMetabolizer);
    }

    #[test]
    fn risk_assessment_uses_display_labels() {
        let risk = RiskAssessment {
            risk_label: RiskLabel::AdjustDosage,
            severity: Severity::Moderate,
            confidence_score: 0.95,
        };
        let value = serde_json::to_value(&risk).unwrap();
        assert_eq!(value["risk_label"], "Adjust Dosage");
        assert_eq!(value["severity"], "moderate");
        assert_eq!(value["confidence_score"], 0.95);
    }

    #[test]
    fn recommendation_uses_camel_case_keys() {
        let value = serde_json::to_value(baseline()).unwrap();
        for key in [
            "action",
            "dosingGuideline",
            "monitoringAdvice",
            "alternativeDrugs",
            "cpicGuideline",
            "evidenceLevel",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["evidenceLevel"], "A");
    }

    // ── Override merge ───────────────────────────────────────────────────────

    #[test]
    fn override_replaces_only_specified_fields() {
        let patch = RecommendationOverride {
            action: Some("Avoid".to_string()),
            alternative_drugs: Some(vec!["Morphine".to_string()]),
            ..Default::default()
        };

        let merged = patch.apply_to(baseline());

        assert_eq!(merged.action, "Avoid");
        assert_eq!(merged.alternative_drugs, vec!["Morphine".to_string()]);
        // Untouched fields keep the baseline.
        assert_eq!(merged.dosing_guideline, "Use label-recommended dosing.");
        assert_eq!(merged.monitoring_advice, "Routine monitoring.");
        assert_eq!(merged.evidence_level, EvidenceLevel::A);
    }

    #[test]
    fn empty_override_is_identity() {
        let merged = RecommendationOverride::default().apply_to(baseline());
        assert_eq!(merged, baseline());
    }

    // ── Explanation ──────────────────────────────────────────────────────────

    #[test]
    fn explanation_with_blank_field_is_malformed() {
        let mut explanation = Explanation {
            summary: "s".to_string(),
            mechanism: "m".to_string(),
            clinical_impact: "c".to_string(),
            variant_details: "v".to_string(),
            references: vec![],
        };
        assert!(explanation.is_well_formed());

        explanation.mechanism = "   ".to_string();
        assert!(!explanation.is_well_formed());
    }

    // ── RunId ────────────────────────────────────────────────────────────────

    #[test]
    fn run_id_new_produces_unique_values() {
        let unique: std::collections::HashSet<String> =
            (0..50).map(|_| RunId::new().0.to_string()).collect();
        assert_eq!(unique.len(), 50);
    }

    // ── PgxError display messages ────────────────────────────────────────────

    #[test]
    fn error_format_display() {
        let err = PgxError::Format {
            reason: "missing ##fileformat declaration".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid variant file"));
        assert!(msg.contains("##fileformat"));
    }

    #[test]
    fn error_unsupported_drug_display() {
        let err = PgxError::UnsupportedDrug {
            requested: "ASPIRIN, FOO".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("requested drugs are supported"));
        assert!(msg.contains("ASPIRIN"));
    }

    #[test]
    fn error_io_display() {
        let err = PgxError::Io {
            reason: "'patient.vcf': No such file or directory".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to read input"));
        assert!(!msg.contains("invalid variant file"));
    }

    #[test]
    fn error_config_display() {
        let err = PgxError::ConfigError {
            reason: "unknown gene".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }
}
