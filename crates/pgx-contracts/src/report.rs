//! The per-drug report and its supporting blocks.
//!
//! `Report` is the only unit handed to persistence and presentation. Its
//! serialized field names are fixed by downstream EHR ingestion and must not
//! change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    profile::GeneProfile,
    recommendation::ClinicalRecommendation,
    risk::RiskAssessment,
};

/// Unique identifier for one pipeline run.
///
/// Every history entry written by a run carries the same `RunId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    /// Create a new, unique run ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-text rationale attached to a report.
///
/// Produced by an external text generator, or by the templated fallback when
/// that generator fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub summary: String,
    pub mechanism: String,
    pub clinical_impact: String,
    pub variant_details: String,
    pub references: Vec<String>,
}

impl Explanation {
    /// True when every text field carries content.
    ///
    /// The pipeline treats anything else from a generator as malformed.
    pub fn is_well_formed(&self) -> bool {
        [
            &self.summary,
            &self.mechanism,
            &self.clinical_impact,
            &self.variant_details,
        ]
        .iter()
        .all(|s| !s.trim().is_empty())
    }
}

/// Parsing and annotation quality figures attached to every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    /// Data lines scanned after the header, shared by every report of a run.
    #[serde(rename = "variantsAnalyzed")]
    pub variants_analyzed: usize,
    /// Variants found in this report's gene.
    #[serde(rename = "pharmacogenomicVariantsFound")]
    pub pharmacogenomic_variants_found: usize,
    #[serde(rename = "annotationCompleteness")]
    pub annotation_completeness: f64,
    pub timestamp: DateTime<Utc>,
}

/// One drug's complete pharmacogenomic assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub patient_id: String,
    pub drug: String,
    pub timestamp: DateTime<Utc>,
    pub risk_assessment: RiskAssessment,
    pub pharmacogenomic_profile: GeneProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub llm_generated_explanation: Explanation,
    pub quality_metrics: QualityMetrics,
}
