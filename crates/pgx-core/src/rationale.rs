//! Deterministic, templated rationale.
//!
//! `TemplateRationale` builds an `Explanation` purely from already-computed
//! structured fields. The pipeline uses it whenever the injected generator
//! fails; it also serves as the generator itself when no text service is
//! configured.

use pgx_contracts::{
    error::PgxResult,
    profile::{GeneProfile, Phenotype},
    recommendation::ClinicalRecommendation,
    report::Explanation,
    risk::RiskAssessment,
};

use crate::traits::RationaleGenerator;

/// Reference appended to every templated explanation.
const PHARMGKB_REFERENCE: &str = "PharmGKB clinical annotations (https://www.pharmgkb.org)";

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRationale;

impl TemplateRationale {
    pub fn new() -> Self {
        Self
    }

    /// Build the explanation. Infallible and deterministic.
    pub fn explain(
        &self,
        drug: &str,
        profile: &GeneProfile,
        risk: &RiskAssessment,
        recommendation: &ClinicalRecommendation,
    ) -> Explanation {
        let gene = &profile.primary_gene;

        let summary = format!(
            "{} ({}) for {}: predicted {} status gives a risk label of '{}' with {} severity.",
            gene,
            profile.diplotype,
            drug,
            profile.phenotype.description(),
            risk.risk_label,
            risk.severity,
        );

        let mechanism = match profile.phenotype {
            Phenotype::NormalMetabolizer => format!(
                "{gene} activity is expected to be normal, so {drug} exposure should follow the typical dose-response."
            ),
            Phenotype::PoorMetabolizer => format!(
                "Little or no {gene} enzyme activity is expected, which changes how {drug} is activated or cleared."
            ),
            Phenotype::IntermediateMetabolizer => format!(
                "Reduced {gene} enzyme activity is expected from one non-functional allele, altering {drug} exposure."
            ),
            Phenotype::RapidMetabolizer | Phenotype::UltraRapidMetabolizer => format!(
                "Increased {gene} enzyme activity is expected, accelerating the metabolism of {drug}."
            ),
            Phenotype::Unknown => format!(
                "{gene} activity could not be determined from the detected variants."
            ),
        };

        let clinical_impact = format!(
            "{}. {}",
            recommendation.action, recommendation.dosing_guideline
        );

        let variant_details = if profile.detected_variants.is_empty() {
            format!("No variants were detected in {gene}; a wild-type diplotype is assumed.")
        } else {
            profile
                .detected_variants
                .iter()
                .map(|v| format!("{} ({} {}, genotype {})", v.rsid, v.gene, v.star_allele, v.genotype))
                .collect::<Vec<_>>()
                .join("; ")
        };

        Explanation {
            summary,
            mechanism,
            clinical_impact,
            variant_details,
            references: vec![
                recommendation.cpic_guideline.clone(),
                PHARMGKB_REFERENCE.to_string(),
            ],
        }
    }
}

impl RationaleGenerator for TemplateRationale {
    fn generate(
        &self,
        drug: &str,
        profile: &GeneProfile,
        risk: &RiskAssessment,
        recommendation: &ClinicalRecommendation,
    ) -> PgxResult<Explanation> {
        Ok(self.explain(drug, profile, risk, recommendation))
    }
}

#[cfg(test)]
mod tests {
    use pgx_contracts::{
        profile::{GeneProfile, Phenotype},
        recommendation::{ClinicalRecommendation, EvidenceLevel},
        risk::{RiskAssessment, RiskLabel, Severity},
        variant::VariantRecord,
    };

    use super::TemplateRationale;

    fn fixtures(variants: Vec<VariantRecord>) -> (GeneProfile, RiskAssessment, ClinicalRecommendation) {
        (
            GeneProfile {
                primary_gene: "CYP2D6".to_string(),
                diplotype: "*4/*4".to_string(),
                phenotype: Phenotype::PoorMetabolizer,
                detected_variants: variants,
            },
            RiskAssessment {
                risk_label: RiskLabel::Ineffective,
                severity: Severity::Moderate,
                confidence_score: 0.95,
            },
            ClinicalRecommendation {
                action: "Avoid Codeine".to_string(),
                dosing_guideline: "Avoid codeine.".to_string(),
                monitoring_advice: "Monitor analgesia.".to_string(),
                alternative_drugs: vec!["Morphine".to_string()],
                cpic_guideline: "CPIC Guideline for Codeine and CYP2D6".to_string(),
                evidence_level: EvidenceLevel::A,
            },
        )
    }

    #[test]
    fn explanation_is_well_formed_and_cites_guideline() {
        let (profile, risk, rec) = fixtures(vec![]);
        let explanation = TemplateRationale::new().explain("CODEINE", &profile, &risk, &rec);

        assert!(explanation.is_well_formed());
        assert!(explanation.summary.contains("CODEINE"));
        assert!(explanation.summary.contains("*4/*4"));
        assert!(explanation.summary.contains("Ineffective"));
        assert!(explanation.variant_details.contains("No variants"));
        assert_eq!(explanation.references[0], "CPIC Guideline for Codeine and CYP2D6");
    }

    #[test]
    fn summary_names_phenotype_once() {
        let (mut profile, risk, rec) = fixtures(vec![]);
        let explanation = TemplateRationale::new().explain("CODEINE", &profile, &risk, &rec);
        assert!(explanation.summary.contains("predicted poor metabolizer status"));
        assert!(!explanation.summary.contains("metabolizer metabolizer"));

        profile.phenotype = Phenotype::Unknown;
        let explanation = TemplateRationale::new().explain("CODEINE", &profile, &risk, &rec);
        assert!(explanation.summary.contains("predicted undetermined metabolizer status gives"));
    }

    #[test]
    fn explanation_lists_detected_variants() {
        let variant = VariantRecord {
            rsid: "rs3892097".to_string(),
            gene: "CYP2D6".to_string(),
            position: 42130692,
            ref_allele: "G".to_string(),
            alt_allele: "A".to_string(),
            star_allele: "*4".to_string(),
            clinical_significance: "No function".to_string(),
            genotype: "1/1".to_string(),
            chromosome: Some("22".to_string()),
        };
        let (profile, risk, rec) = fixtures(vec![variant]);
        let explanation = TemplateRationale::new().explain("CODEINE", &profile, &risk, &rec);

        assert!(explanation.variant_details.contains("rs3892097"));
        assert!(explanation.variant_details.contains("1/1"));
    }

    #[test]
    fn explanation_is_deterministic() {
        let (profile, risk, rec) = fixtures(vec![]);
        let generator = TemplateRationale::new();
        assert_eq!(
            generator.explain("CODEINE", &profile, &risk, &rec),
            generator.explain("CODEINE", &profile, &risk, &rec)
        );
    }
}
