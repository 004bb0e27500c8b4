//! Drug-class-aware risk classification.
//!
//! `classify` is total over (drug class × phenotype) and pure. Normal
//! metabolizers short-circuit to `Safe` for every drug; every other
//! phenotype is dispatched on the drug's pharmacological class:
//!
//! | class           | PM                   | IM              | RM / URM    | Unknown        |
//! |-----------------|----------------------|-----------------|-------------|----------------|
//! | prodrug         | Ineffective/moderate | Adjust/low      | Toxic/high  | Unknown/low    |
//! | active drug     | Toxic/high           | Adjust/moderate | Unknown/low | Unknown/low    |
//! | metabolic shunt | Toxic/critical       | Adjust/moderate | Unknown/low | Toxic/critical |

use pgx_contracts::{
    profile::Phenotype,
    risk::{RiskAssessment, RiskLabel, Severity},
};
use pgx_knowledge::{DrugClass, DrugEntry};

/// Confidence attached to a normal-metabolizer classification.
pub const NORMAL_CONFIDENCE: f64 = 0.99;

/// Confidence attached to every other classification.
pub const ALTERED_CONFIDENCE: f64 = 0.95;

/// Classify the risk of `drug` for a patient with `phenotype`.
pub fn classify(drug: &DrugEntry, phenotype: Phenotype) -> RiskAssessment {
    if phenotype == Phenotype::NormalMetabolizer {
        return RiskAssessment {
            risk_label: RiskLabel::Safe,
            severity: Severity::None,
            confidence_score: NORMAL_CONFIDENCE,
        };
    }

    let (risk_label, severity) = match drug.class {
        DrugClass::Prodrug => prodrug_risk(phenotype),
        DrugClass::ActiveDrug => active_drug_risk(phenotype),
        DrugClass::MetabolicShunt => metabolic_shunt_risk(phenotype),
    };

    RiskAssessment {
        risk_label,
        severity,
        confidence_score: ALTERED_CONFIDENCE,
    }
}

/// Prodrugs need activation: no activity means no effect, excess activity
/// means excess active metabolite.
fn prodrug_risk(phenotype: Phenotype) -> (RiskLabel, Severity) {
    match phenotype {
        Phenotype::PoorMetabolizer => (RiskLabel::Ineffective, Severity::Moderate),
        Phenotype::RapidMetabolizer | Phenotype::UltraRapidMetabolizer => {
            (RiskLabel::Toxic, Severity::High)
        }
        Phenotype::IntermediateMetabolizer => (RiskLabel::AdjustDosage, Severity::Low),
        Phenotype::NormalMetabolizer => (RiskLabel::Safe, Severity::None),
        Phenotype::Unknown => (RiskLabel::Unknown, Severity::Low),
    }
}

/// Active drugs are cleared by the gene product; low activity accumulates drug.
fn active_drug_risk(phenotype: Phenotype) -> (RiskLabel, Severity) {
    match phenotype {
        Phenotype::PoorMetabolizer => (RiskLabel::Toxic, Severity::High),
        Phenotype::IntermediateMetabolizer => (RiskLabel::AdjustDosage, Severity::Moderate),
        Phenotype::NormalMetabolizer => (RiskLabel::Safe, Severity::None),
        Phenotype::RapidMetabolizer
        | Phenotype::UltraRapidMetabolizer
        | Phenotype::Unknown => (RiskLabel::Unknown, Severity::Low),
    }
}

/// The gene product detoxifies the drug. An unknown genotype cannot rule out
/// a missing protective allele, so it is treated like a poor metabolizer.
fn metabolic_shunt_risk(phenotype: Phenotype) -> (RiskLabel, Severity) {
    match phenotype {
        Phenotype::PoorMetabolizer | Phenotype::Unknown => (RiskLabel::Toxic, Severity::Critical),
        Phenotype::IntermediateMetabolizer => (RiskLabel::AdjustDosage, Severity::Moderate),
        Phenotype::NormalMetabolizer => (RiskLabel::Safe, Severity::None),
        Phenotype::RapidMetabolizer | Phenotype::UltraRapidMetabolizer => {
            (RiskLabel::Unknown, Severity::Low)
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
