//! Knowledge-base configuration schema.
//!
//! A `KnowledgeConfig` is deserialized from TOML. It is a flat declaration of
//! genes, drugs, annotated variants and recommendation overrides; indexing
//! and consistency checks happen when it is turned into a `KnowledgeBase`.

use serde::{Deserialize, Serialize};

use pgx_contracts::{
    profile::Phenotype,
    recommendation::{EvidenceLevel, RecommendationOverride},
};

/// How a drug relates to its primary gene's product.
///
/// Expressed in TOML as kebab-case strings:
/// ```toml
/// class = "prodrug"
/// class = "active-drug"
/// class = "metabolic-shunt"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrugClass {
    /// Needs bioactivation by the gene product to work.
    Prodrug,
    /// Already active; the gene product clears it.
    ActiveDrug,
    /// The gene product detoxifies the drug or a toxic metabolite.
    MetabolicShunt,
}

/// A supported drug and the gene that governs its response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugEntry {
    /// Upper-case drug name, the key requested drug names are matched against.
    pub name: String,
    pub gene: String,
    pub class: DrugClass,
    /// Guideline citation carried by every recommendation for this drug.
    pub guideline: String,
}

/// Curated annotation for one rsID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAnnotation {
    pub rsid: String,
    pub gene: String,
    pub star_allele: String,
    /// Phenotype category for a homozygous carrier.
    pub phenotype: Phenotype,
    pub clinical_significance: String,
}

/// Recommendation fields shared by every drug for normal metabolizers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    pub action: String,
    pub dosing_guideline: String,
    pub monitoring_advice: String,
    #[serde(default)]
    pub alternative_drugs: Vec<String>,
    pub evidence_level: EvidenceLevel,
}

/// Generic advice for non-normal phenotypes with no specific override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub action: String,
    pub dosing_guideline: String,
}

/// One row of the (drug, phenotype) override table.
///
/// Only the fields present in TOML replace the drug's baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub drug: String,
    pub phenotype: Phenotype,
    pub action: Option<String>,
    pub dosing_guideline: Option<String>,
    pub monitoring_advice: Option<String>,
    pub alternative_drugs: Option<Vec<String>>,
    pub cpic_guideline: Option<String>,
    pub evidence_level: Option<EvidenceLevel>,
}

impl OverrideEntry {
    /// The sparse patch this row contributes.
    pub fn to_override(&self) -> RecommendationOverride {
        RecommendationOverride {
            action: self.action.clone(),
            dosing_guideline: self.dosing_guideline.clone(),
            monitoring_advice: self.monitoring_advice.clone(),
            alternative_drugs: self.alternative_drugs.clone(),
            cpic_guideline: self.cpic_guideline.clone(),
            evidence_level: self.evidence_level,
        }
    }
}

/// The top-level structure deserialized from a knowledge-base TOML file.
///
/// Example:
/// ```toml
/// wild_type_allele = "*1"
/// increased_function_marker = "rs12248560"
/// genes = ["CYP2D6"]
///
/// [[drugs]]
/// name = "CODEINE"
/// gene = "CYP2D6"
/// class = "prodrug"
/// guideline = "CPIC Guideline for Codeine and CYP2D6"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    pub wild_type_allele: String,
    /// rsID whose alternate allele raises enzyme activity.
    pub increased_function_marker: String,
    pub genes: Vec<String>,
    pub baseline: BaselineConfig,
    pub fallback: FallbackConfig,
    pub drugs: Vec<DrugEntry>,
    pub variants: Vec<VariantAnnotation>,
    #[serde(default)]
    pub recommendations: Vec<OverrideEntry>,
}
