//! Diplotype and phenotype inference for a single gene.
//!
//! This is a single-variant heuristic: one *driving* variant determines the
//! phenotype and diplotype. Two different loss-of-function variants on the
//! same gene (compound heterozygosity) are not combined; only the driving
//! one is reported.
//!
//! Driving variant selection:
//!
//! 1. the first homozygous-alternate call, else
//! 2. the first heterozygous call, else
//! 3. the first variant in file order.

use tracing::debug;

use pgx_contracts::{
    profile::{GeneProfile, Phenotype},
    variant::{VariantRecord, Zygosity},
};
use pgx_knowledge::KnowledgeBase;

/// Infer a `GeneProfile` for `gene` from the variants found in it.
///
/// `variants` must already be restricted to `gene`.
pub fn infer(knowledge: &KnowledgeBase, gene: &str, variants: &[VariantRecord]) -> GeneProfile {
    let wild = knowledge.wild_type_allele();
    let mut phenotype = Phenotype::NormalMetabolizer;
    let mut diplotype = format!("{wild}/{wild}");

    if let Some(driver) = driving_variant(variants) {
        let zygosity = driver.zygosity();
        let star = &driver.star_allele;

        match zygosity {
            Zygosity::HomozygousAlternate => {
                phenotype = knowledge
                    .variant(&driver.rsid)
                    .map(|a| a.phenotype)
                    .unwrap_or(Phenotype::PoorMetabolizer);
                diplotype = format!("{star}/{star}");
            }
            Zygosity::Heterozygous => {
                phenotype = Phenotype::IntermediateMetabolizer;
                diplotype = format!("{wild}/{star}");
            }
            Zygosity::HomozygousReference | Zygosity::Other => {}
        }

        // The increased-function marker raises activity, the opposite of the
        // loss-of-function mapping above.
        if driver.rsid == knowledge.increased_function_marker() && zygosity.is_non_reference() {
            phenotype = if zygosity == Zygosity::HomozygousAlternate {
                Phenotype::UltraRapidMetabolizer
            } else {
                Phenotype::RapidMetabolizer
            };
        }

        debug!(
            gene,
            driving_variant = %driver.rsid,
            genotype = %driver.genotype,
            phenotype = %phenotype,
            diplotype = %diplotype,
            "phenotype inferred"
        );
    }

    GeneProfile {
        primary_gene: gene.to_string(),
        diplotype,
        phenotype,
        detected_variants: variants.to_vec(),
    }
}

/// Pick the variant that determines the phenotype.
fn driving_variant(variants: &[VariantRecord]) -> Option<&VariantRecord> {
    variants
        .iter()
        .find(|v| v.zygosity() == Zygosity::HomozygousAlternate)
        .or_else(|| variants.iter().find(|v| v.zygosity() == Zygosity::Heterozygous))
        .or_else(|| variants.first())
}

// ── Tests ────────────────────────────────────────────────────────────────────
