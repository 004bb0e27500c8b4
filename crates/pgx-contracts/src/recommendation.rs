//! Clinical recommendation types and the partial-override merge.
//!
//! A recommendation is resolved as "baseline + sparse override": the
//! knowledge base supplies a complete baseline per drug, and an override for a
//! specific (drug, phenotype) pair replaces only the fields it sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// CPIC level of evidence behind a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvidenceLevel {
    A,
    B,
    C,
    D,
}

impl fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            EvidenceLevel::A => "A",
            EvidenceLevel::B => "B",
            EvidenceLevel::C => "C",
            EvidenceLevel::D => "D",
        };
        f.write_str(code)
    }
}

/// A structured clinical action for one drug.
///
/// Field names follow the camelCase keys expected by EHR ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecommendation {
    pub action: String,
    pub dosing_guideline: String,
    pub monitoring_advice: String,
    pub alternative_drugs: Vec<String>,
    pub cpic_guideline: String,
    pub evidence_level: EvidenceLevel,
}

/// A sparse set of recommendation fields for one (drug, phenotype) pair.
///
/// Every `None` field keeps the baseline's value when merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationOverride {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub dosing_guideline: Option<String>,
    #[serde(default)]
    pub monitoring_advice: Option<String>,
    #[serde(default)]
    pub alternative_drugs: Option<Vec<String>>,
    #[serde(default)]
    pub cpic_guideline: Option<String>,
    #[serde(default)]
    pub evidence_level: Option<EvidenceLevel>,
}

impl RecommendationOverride {
    /// Merge this override onto `baseline`, field by field.
    pub fn apply_to(&self, baseline: ClinicalRecommendation) -> ClinicalRecommendation {
        ClinicalRecommendation {
            action: self.action.clone().unwrap_or(baseline.action),
            dosing_guideline: self
                .dosing_guideline
                .clone()
                .unwrap_or(baseline.dosing_guideline),
            monitoring_advice: self
                .monitoring_advice
                .clone()
                .unwrap_or(baseline.monitoring_advice),
            alternative_drugs: self
                .alternative_drugs
                .clone()
                .unwrap_or(baseline.alternative_drugs),
            cpic_guideline: self.cpic_guideline.clone().unwrap_or(baseline.cpic_guideline),
            evidence_level: self.evidence_level.unwrap_or(baseline.evidence_level),
        }
    }
}
