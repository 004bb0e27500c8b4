//! Metabolizer phenotypes and per-drug gene profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::variant::VariantRecord;

/// CPIC-style metabolizer status, serialized with its standard abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phenotype {
    #[serde(rename = "PM")]
    PoorMetabolizer,
    #[serde(rename = "IM")]
    IntermediateMetabolizer,
    #[serde(rename = "NM")]
    NormalMetabolizer,
    #[serde(rename = "RM")]
    RapidMetabolizer,
    #[serde(rename = "URM")]
    UltraRapidMetabolizer,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Phenotype {
    /// The abbreviation used on the wire (`PM`, `IM`, …).
    pub fn code(self) -> &'static str {
        match self {
            Phenotype::PoorMetabolizer => "PM",
            Phenotype::IntermediateMetabolizer => "IM",
            Phenotype::NormalMetabolizer => "NM",
            Phenotype::RapidMetabolizer => "RM",
            Phenotype::UltraRapidMetabolizer => "URM",
            Phenotype::Unknown => "Unknown",
        }
    }

    /// Long human-readable form, used in generated explanations.
    pub fn description(self) -> &'static str {
        match self {
            Phenotype::PoorMetabolizer => "poor metabolizer",
            Phenotype::IntermediateMetabolizer => "intermediate metabolizer",
            Phenotype::NormalMetabolizer => "normal metabolizer",
            Phenotype::RapidMetabolizer => "rapid metabolizer",
            Phenotype::UltraRapidMetabolizer => "ultra-rapid metabolizer",
            Phenotype::Unknown => "undetermined metabolizer status",
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The evaluation context for one drug: its primary gene and what was
/// inferred about that gene from the patient's variants.
///
/// Built fresh for every (variant set, drug) pair, even when two drugs share
/// a gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneProfile {
    pub primary_gene: String,
    /// Star-allele pair, e.g. `*1/*4`.
    pub diplotype: String,
    pub phenotype: Phenotype,
    /// Variants restricted to `primary_gene`, in file order.
    pub detected_variants: Vec<VariantRecord>,
}
