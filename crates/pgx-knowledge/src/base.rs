//! The indexed, read-only knowledge base.
//!
//! `KnowledgeBase` is built once from a `KnowledgeConfig` and never mutated
//! afterwards. Construction checks that every drug, variant and override
//! refers to a declared gene or drug, so lookups during a run cannot
//! dangle.

use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};

use tracing::debug;

use pgx_contracts::{
    error::{PgxError, PgxResult},
    profile::Phenotype,
    recommendation::{ClinicalRecommendation, RecommendationOverride},
};

use crate::config::{
    BaselineConfig, DrugEntry, FallbackConfig, KnowledgeConfig, VariantAnnotation,
};

/// The knowledge base shipped with the crate.
const BUILTIN_KNOWLEDGE: &str = include_str!("../knowledge/cpic.toml");

/// Static pharmacogenomic reference data.
///
/// ```rust,ignore
/// use pgx_knowledge::KnowledgeBase;
///
/// let kb = KnowledgeBase::builtin()?;
/// assert!(kb.is_gene_of_interest("CYP2D6"));
/// ```
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    wild_type_allele: String,
    increased_function_marker: String,
    genes: BTreeSet<String>,
    drugs: HashMap<String, DrugEntry>,
    variants: HashMap<String, VariantAnnotation>,
    overrides: HashMap<(String, Phenotype), RecommendationOverride>,
    baseline: BaselineConfig,
    fallback: FallbackConfig,
}

impl KnowledgeBase {
    /// Parse the embedded `knowledge/cpic.toml`.
    pub fn builtin() -> PgxResult<Self> {
        Self::from_toml_str(BUILTIN_KNOWLEDGE)
    }

    /// Parse `s` as TOML and build a `KnowledgeBase`.
    ///
    /// Returns `PgxError::ConfigError` if the TOML is malformed, does not
    /// match `KnowledgeConfig`, or is internally inconsistent.
    pub fn from_toml_str(s: &str) -> PgxResult<Self> {
        let config: KnowledgeConfig = toml::from_str(s).map_err(|e| PgxError::ConfigError {
            reason: format!("failed to parse knowledge base TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a knowledge base.
    pub fn from_file(path: &Path) -> PgxResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PgxError::ConfigError {
            reason: format!("failed to read knowledge base '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Index and validate a deserialized configuration.
    pub fn from_config(config: KnowledgeConfig) -> PgxResult<Self> {
        let genes: BTreeSet<String> = config.genes.iter().map(|g| g.to_uppercase()).collect();

        let mut drugs = HashMap::new();
        for mut drug in config.drugs {
            drug.name = drug.name.trim().to_uppercase();
            drug.gene = drug.gene.to_uppercase();
            if !genes.contains(&drug.gene) {
                return Err(PgxError::ConfigError {
                    reason: format!(
                        "drug '{}' targets gene '{}' which is not in the gene set",
                        drug.name, drug.gene
                    ),
                });
            }
            if drugs.contains_key(&drug.name) {
                return Err(PgxError::ConfigError {
                    reason: format!("drug '{}' is declared more than once", drug.name),
                });
            }
            drugs.insert(drug.name.clone(), drug);
        }

        let mut variants = HashMap::new();
        for mut variant in config.variants {
            variant.gene = variant.gene.to_uppercase();
            if !genes.contains(&variant.gene) {
                return Err(PgxError::ConfigError {
                    reason: format!(
                        "variant '{}' is annotated to gene '{}' which is not in the gene set",
                        variant.rsid, variant.gene
                    ),
                });
            }
            if variants.contains_key(&variant.rsid) {
                return Err(PgxError::ConfigError {
                    reason: format!("variant '{}' is annotated more than once", variant.rsid),
                });
            }
            variants.insert(variant.rsid.clone(), variant);
        }

        if !variants.contains_key(&config.increased_function_marker) {
            return Err(PgxError::ConfigError {
                reason: format!(
                    "increased-function marker '{}' has no variant annotation",
                    config.increased_function_marker
                ),
            });
        }

        let mut overrides = HashMap::new();
        for entry in &config.recommendations {
            let drug = entry.drug.trim().to_uppercase();
            if !drugs.contains_key(&drug) {
                return Err(PgxError::ConfigError {
                    reason: format!("recommendation override refers to unknown drug '{}'", drug),
                });
            }
            let key = (drug, entry.phenotype);
            if overrides.contains_key(&key) {
                return Err(PgxError::ConfigError {
                    reason: format!(
                        "recommendation override for '{}' / {} is declared more than once",
                        key.0, key.1
                    ),
                });
            }
            overrides.insert(key, entry.to_override());
        }

        debug!(
            genes = genes.len(),
            drugs = drugs.len(),
            variants = variants.len(),
            overrides = overrides.len(),
            "knowledge base loaded"
        );

        Ok(Self {
            wild_type_allele: config.wild_type_allele,
            increased_function_marker: config.increased_function_marker,
            genes,
            drugs,
            variants,
            overrides,
            baseline: config.baseline,
            fallback: config.fallback,
        })
    }

    // ── Lookups ──────────────────────────────────────────────────────────────

    /// The star-allele notation for a reference haplotype (`*1`).
    pub fn wild_type_allele(&self) -> &str {
        &self.wild_type_allele
    }

    pub fn increased_function_marker(&self) -> &str {
        &self.increased_function_marker
    }

    pub fn is_gene_of_interest(&self, gene: &str) -> bool {
        self.genes.contains(gene)
    }

    /// Genes of interest in alphabetical order.
    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(String::as_str)
    }

    /// Look up a drug by its normalized (trimmed, upper-case) name.
    pub fn drug(&self, name: &str) -> Option<&DrugEntry> {
        self.drugs.get(name)
    }

    pub fn variant(&self, rsid: &str) -> Option<&VariantAnnotation> {
        self.variants.get(rsid)
    }

    pub fn recommendation_override(
        &self,
        drug: &str,
        phenotype: Phenotype,
    ) -> Option<&RecommendationOverride> {
        self.overrides.get(&(drug.to_string(), phenotype))
    }

    /// The complete normal-metabolizer recommendation for `drug`.
    pub fn baseline_for(&self, drug: &DrugEntry) -> ClinicalRecommendation {
        ClinicalRecommendation {
            action: self.baseline.action.clone(),
            dosing_guideline: self.baseline.dosing_guideline.clone(),
            monitoring_advice: self.baseline.monitoring_advice.clone(),
            alternative_drugs: self.baseline.alternative_drugs.clone(),
            cpic_guideline: drug.guideline.clone(),
            evidence_level: self.baseline.evidence_level,
        }
    }

    /// The generic advice for a non-normal phenotype with no override:
    /// the baseline with only its action and dosing text replaced.
    pub fn fallback_for(&self, drug: &DrugEntry) -> ClinicalRecommendation {
        RecommendationOverride {
            action: Some(self.fallback.action.clone()),
            dosing_guideline: Some(self.fallback.dosing_guideline.clone()),
            ..Default::default()
        }
        .apply_to(self.baseline_for(drug))
    }
}
