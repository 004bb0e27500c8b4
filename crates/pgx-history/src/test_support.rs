//! Report fixtures shared by the store tests.

use chrono::{Duration, TimeZone, Utc};

use pgx_contracts::{
    profile::{GeneProfile, Phenotype},
    recommendation::{ClinicalRecommendation, EvidenceLevel},
    report::{Explanation, QualityMetrics, Report},
    risk::{RiskAssessment, RiskLabel, Severity},
};

/// A complete report for `drug` carrying `label`.
pub(crate) fn make_report(drug: &str, label: RiskLabel) -> Report {
    make_report_at(drug, label, 0)
}

/// As `make_report`, timestamped `minutes` after a fixed epoch.
pub(crate) fn make_report_at(drug: &str, label: RiskLabel, minutes: i64) -> Report {
    let timestamp = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes);
    Report {
        patient_id: "PATIENT_001".to_string(),
        drug: drug.to_string(),
        timestamp,
        risk_assessment: RiskAssessment {
            risk_label: label,
            severity: Severity::None,
            confidence_score: 0.99,
        },
        pharmacogenomic_profile: GeneProfile {
            primary_gene: "CYP2D6".to_string(),
            diplotype: "*1/*1".to_string(),
            phenotype: Phenotype::NormalMetabolizer,
            detected_variants: vec![],
        },
        clinical_recommendation: ClinicalRecommendation {
            action: "Standard Dosing".to_string(),
            dosing_guideline: "Use standard label-recommended dosing.".to_string(),
            monitoring_advice: "Routine clinical monitoring.".to_string(),
            alternative_drugs: vec![],
            cpic_guideline: "CPIC Guideline for Codeine and CYP2D6".to_string(),
            evidence_level: EvidenceLevel::A,
        },
        llm_generated_explanation: Explanation {
            summary: "summary".to_string(),
            mechanism: "mechanism".to_string(),
            clinical_impact: "impact".to_string(),
            variant_details: "none".to_string(),
            references: vec![],
        },
        quality_metrics: QualityMetrics {
            vcf_parsing_success: true,
            variants_analyzed: 1,
            pharmacogenomic_variants_found: 0,
            annotation_completeness: 0.99,
            timestamp,
        },
    }
}
