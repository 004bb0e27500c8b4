//! Detected variant records and genotype classification.

use serde::{Deserialize, Serialize};

/// One detected genomic variant in a gene of interest.
///
/// Created by the parser, one per qualifying data line, and never modified
/// afterwards. Records only outlive a run by being embedded in a `Report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// dbSNP identifier, or `pos_<position>` when the file carried `.`.
    pub rsid: String,
    pub gene: String,
    pub position: u64,
    #[serde(rename = "ref")]
    pub ref_allele: String,
    #[serde(rename = "alt")]
    pub alt_allele: String,
    /// Star allele from the knowledge base, or the wild-type marker.
    pub star_allele: String,
    pub clinical_significance: String,
    /// Raw genotype token from the sample column (e.g. `0/1`).
    pub genotype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chromosome: Option<String>,
}

impl VariantRecord {
    /// Classify this record's raw genotype call.
    pub fn zygosity(&self) -> Zygosity {
        Zygosity::from_call(&self.genotype)
    }
}

/// Zygosity of a diploid genotype call, phased or unphased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zygosity {
    HomozygousReference,
    Heterozygous,
    HomozygousAlternate,
    /// Missing, multi-allelic or otherwise unrecognized calls.
    Other,
}

impl Zygosity {
    /// Classify a raw call token such as `0/1` or `1|1`.
    ///
    /// Only biallelic `0`/`1` calls are recognized; everything else is `Other`.
    pub fn from_call(call: &str) -> Self {
        match call.trim() {
            "0/0" | "0|0" => Zygosity::HomozygousReference,
            "0/1" | "1/0" | "0|1" | "1|0" => Zygosity::Heterozygous,
            "1/1" | "1|1" => Zygosity::HomozygousAlternate,
            _ => Zygosity::Other,
        }
    }

    /// True for calls carrying at least one alternate allele.
    pub fn is_non_reference(self) -> bool {
        matches!(self, Zygosity::Heterozygous | Zygosity::HomozygousAlternate)
    }
}
