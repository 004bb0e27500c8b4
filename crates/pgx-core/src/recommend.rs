//! Recommendation resolution: baseline, override table, generic fallback.

use pgx_contracts::{profile::Phenotype, recommendation::ClinicalRecommendation};
use pgx_knowledge::{DrugEntry, KnowledgeBase};

/// Resolve the clinical recommendation for `drug` at `phenotype`.
///
/// 1. An exact (drug, phenotype) override is merged onto the drug's baseline.
/// 2. Otherwise normal metabolizers get the baseline unchanged.
/// 3. Any other phenotype gets the generic "Dose Adjustment Advised"
///    fallback, which keeps every other baseline field.
///
/// Never fails for a drug present in the knowledge base.
pub fn resolve(
    knowledge: &KnowledgeBase,
    drug: &DrugEntry,
    phenotype: Phenotype,
) -> ClinicalRecommendation {
    match knowledge.recommendation_override(&drug.name, phenotype) {
        Some(patch) => patch.apply_to(knowledge.baseline_for(drug)),
        None if phenotype == Phenotype::NormalMetabolizer => knowledge.baseline_for(drug),
        None => knowledge.fallback_for(drug),
    }
}
