//! VCF parsing restricted to the genes of interest.
//!
//! The parser is a pure transformation from raw text to `ParsedVcf`: it does
//! no I/O, and the only reference data it consults is the knowledge base
//! (for rsID → gene resolution and star-allele annotation).
//!
//! Line handling, in order:
//!
//! 1. `##…` lines are metadata and skipped, wherever they appear.
//! 2. The `#CHROM` header starts the data section; its 10th column, when
//!    present, is the subject id.
//! 3. Every later non-empty line counts towards `lines_scanned`, whether or
//!    not it produces a record.
//! 4. A data line becomes a `VariantRecord` only if it has at least 8 columns,
//!    an integer position, and a gene inside the gene set.

use tracing::{debug, warn};

use pgx_contracts::{
    error::{PgxError, PgxResult},
    variant::VariantRecord,
};
use pgx_knowledge::KnowledgeBase;

/// Prefix of the mandatory file-format declaration.
pub const FORMAT_DECLARATION: &str = "##fileformat=VCF";

/// Prefix of the column-header line.
pub const HEADER_SENTINEL: &str = "#CHROM";

/// Subject id used when the header has no sample column.
pub const DEFAULT_SUBJECT_ID: &str = "UNKNOWN_SUBJECT";

/// Genotype assumed when a data line has no sample column.
pub const DEFAULT_GENOTYPE: &str = "0/0";

const MIN_DATA_COLUMNS: usize = 8;
const SAMPLE_COLUMN: usize = 9;

/// Default clinical significance for variants the knowledge base does not know.
const UNANNOTATED_SIGNIFICANCE: &str = "unknown";

/// The result of parsing one variant file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedVcf {
    pub subject_id: String,
    /// Records in genes of interest, in file order.
    pub variants: Vec<VariantRecord>,
    /// Non-empty lines seen after the header, retained or not.
    pub lines_scanned: usize,
}

impl ParsedVcf {
    /// The records for `gene`, in file order.
    pub fn variants_for_gene(&self, gene: &str) -> Vec<VariantRecord> {
        self.variants
            .iter()
            .filter(|v| v.gene == gene)
            .cloned()
            .collect()
    }
}

/// Parse `raw` into a subject id and the variants in genes of interest.
///
/// # Errors
///
/// Returns `PgxError::Format` if no line carries the `##fileformat=VCF`
/// declaration. Malformed data lines are skipped, never fatal.
pub fn parse(knowledge: &KnowledgeBase, raw: &str) -> PgxResult<ParsedVcf> {
    if !raw
        .lines()
        .any(|line| line.trim_start().starts_with(FORMAT_DECLARATION))
    {
        return Err(PgxError::Format {
            reason: format!("missing '{}' declaration line", FORMAT_DECLARATION),
        });
    }

    let mut subject_id = DEFAULT_SUBJECT_ID.to_string();
    let mut header_seen = false;
    let mut lines_scanned = 0usize;
    let mut variants = Vec::new();

    for line in raw.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with("##") {
            continue;
        }

        if line.starts_with(HEADER_SENTINEL) {
            header_seen = true;
            if let Some(sample) = line.split('\t').nth(SAMPLE_COLUMN) {
                let sample = sample.trim();
                if !sample.is_empty() {
                    subject_id = sample.to_string();
                }
            }
            continue;
        }

        if !header_seen {
            continue;
        }

        lines_scanned += 1;

        if let Some(record) = parse_data_line(knowledge, line) {
            variants.push(record);
        }
    }

    if !header_seen {
        warn!("variant file has no '{}' header; no data lines were read", HEADER_SENTINEL);
    }

    debug!(
        subject_id = %subject_id,
        lines_scanned,
        retained = variants.len(),
        "variant file parsed"
    );

    Ok(ParsedVcf {
        subject_id,
        variants,
        lines_scanned,
    })
}

/// Turn one tab-delimited data line into a record, or `None` if it is
/// malformed or outside the genes of interest.
fn parse_data_line(knowledge: &KnowledgeBase, line: &str) -> Option<VariantRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_DATA_COLUMNS {
        debug!(columns = fields.len(), "skipping data line with too few columns");
        return None;
    }

    let position: u64 = match fields[1].trim().parse() {
        Ok(p) => p,
        Err(_) => {
            debug!(position = fields[1], "skipping data line with non-integer position");
            return None;
        }
    };

    let raw_id = fields[2].trim();
    let annotation = knowledge.variant(raw_id);

    let gene = match annotation {
        Some(a) => a.gene.clone(),
        None => info_gene(fields[7])?,
    };
    if !knowledge.is_gene_of_interest(&gene) {
        return None;
    }

    let rsid = if raw_id == "." || raw_id.is_empty() {
        format!("pos_{}", position)
    } else {
        raw_id.to_string()
    };

    let genotype = fields
        .get(SAMPLE_COLUMN)
        .and_then(|sample| sample.split(':').next())
        .map(str::trim)
        .filter(|gt| !gt.is_empty())
        .unwrap_or(DEFAULT_GENOTYPE)
        .to_string();

    let chromosome = Some(fields[0].trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let (star_allele, clinical_significance) = match annotation {
        Some(a) => (a.star_allele.clone(), a.clinical_significance.clone()),
        None => (
            knowledge.wild_type_allele().to_string(),
            UNANNOTATED_SIGNIFICANCE.to_string(),
        ),
    };

    Some(VariantRecord {
        rsid,
        gene,
        position,
        ref_allele: fields[3].trim().to_string(),
        alt_allele: fields[4].trim().to_string(),
        star_allele,
        clinical_significance,
        genotype,
        chromosome,
    })
}

/// Extract the `GENE=` key from a semicolon-delimited INFO field.
fn info_gene(info: &str) -> Option<String> {
    info.split(';')
        .find_map(|entry| entry.trim().strip_prefix("GENE="))
        .map(|gene| gene.trim().to_uppercase())
        .filter(|gene| !gene.is_empty())
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pgx_contracts::error::PgxError;
    use pgx_knowledge::KnowledgeBase;

    use super::{parse, DEFAULT_GENOTYPE, DEFAULT_SUBJECT_ID};

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    /// Build a VCF with a single-sample header and the given data lines.
    fn vcf(lines: &[&str]) -> String {
        let mut text = String::from(
            "##fileformat=VCFv4.2\n##source=test\n\
             #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPATIENT_042\n",
        );
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    #[test]
    fn missing_format_declaration_is_format_error() {
        let text = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                    22\t42130692\trs3892097\tG\tA\t.\tPASS\tGENE=CYP2D6\n";
        match parse(&kb(), text) {
            Err(PgxError::Format { reason }) => assert!(reason.contains("##fileformat")),
            other => panic!("expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn subject_id_comes_from_header() {
        let parsed = parse(&kb(), &vcf(&[])).unwrap();
        assert_eq!(parsed.subject_id, "PATIENT_042");
        assert_eq!(parsed.lines_scanned, 0);
        assert!(parsed.variants.is_empty());
    }

    #[test]
    fn header_without_sample_uses_placeholder() {
        let text = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";
        let parsed = parse(&kb(), text).unwrap();
        assert_eq!(parsed.subject_id, DEFAULT_SUBJECT_ID);
    }

    #[test]
    fn known_rsid_is_annotated_from_knowledge_base() {
        let parsed = parse(
            &kb(),
            &vcf(&["22\t42130692\trs3892097\tG\tA\t50\tPASS\t.\tGT\t1/1"]),
        )
        .unwrap();

        assert_eq!(parsed.variants.len(), 1);
        let v = &parsed.variants[0];
        assert_eq!(v.rsid, "rs3892097");
        assert_eq!(v.gene, "CYP2D6");
        assert_eq!(v.position, 42130692);
        assert_eq!(v.ref_allele, "G");
        assert_eq!(v.alt_allele, "A");
        assert_eq!(v.star_allele, "*4");
        assert_eq!(v.clinical_significance, "No function");
        assert_eq!(v.genotype, "1/1");
        assert_eq!(v.chromosome.as_deref(), Some("22"));
    }

    #[test]
    fn gene_falls_back_to_info_field() {
        let parsed = parse(
            &kb(),
            &vcf(&["10\t94761900\trs99999999\tC\tT\t.\tPASS\tDP=30;GENE=CYP2C19;AF=0.5\tGT:DP\t0/1:30"]),
        )
        .unwrap();

        let v = &parsed.variants[0];
        assert_eq!(v.gene, "CYP2C19");
        assert_eq!(v.star_allele, "*1");
        assert_eq!(v.clinical_significance, "unknown");
        assert_eq!(v.genotype, "0/1");
    }

    #[test]
    fn lines_outside_gene_set_are_counted_but_discarded() {
        let parsed = parse(
            &kb(),
            &vcf(&[
                "17\t43044295\trs80357906\tA\tG\t.\tPASS\tGENE=BRCA1\tGT\t0/1",
                "1\t100\trs1\tA\tG\t.\tPASS\t.\tGT\t0/1",
                "22\t42130692\trs3892097\tG\tA\t.\tPASS\t.\tGT\t0/1",
            ]),
        )
        .unwrap();

        assert_eq!(parsed.lines_scanned, 3);
        assert_eq!(parsed.variants.len(), 1);
    }

    #[test]
    fn short_lines_are_counted_but_discarded() {
        let parsed = parse(&kb(), &vcf(&["22\t42130692\trs3892097\tG\tA\t."])).unwrap();
        assert_eq!(parsed.lines_scanned, 1);
        assert!(parsed.variants.is_empty());
    }

    #[test]
    fn eight_column_line_defaults_to_reference_genotype() {
        let parsed = parse(
            &kb(),
            &vcf(&["22\t42130692\trs3892097\tG\tA\t.\tPASS\tGENE=CYP2D6"]),
        )
        .unwrap();

        assert_eq!(parsed.variants.len(), 1);
        assert_eq!(parsed.variants[0].genotype, DEFAULT_GENOTYPE);
    }

    #[test]
    fn dot_id_is_synthesized_from_position() {
        let parsed = parse(
            &kb(),
            &vcf(&["16\t31096368\t.\tC\tT\t.\tPASS\tGENE=CYP2C9\tGT\t0/1"]),
        )
        .unwrap();
        assert_eq!(parsed.variants[0].rsid, "pos_31096368");
    }

    #[test]
    fn non_integer_position_is_discarded() {
        let parsed = parse(
            &kb(),
            &vcf(&["22\tabc\trs3892097\tG\tA\t.\tPASS\t.\tGT\t1/1"]),
        )
        .unwrap();
        assert_eq!(parsed.lines_scanned, 1);
        assert!(parsed.variants.is_empty());
    }

    #[test]
    fn lines_before_header_are_not_counted() {
        let text = "##fileformat=VCFv4.2\n\
                    22\t42130692\trs3892097\tG\tA\t.\tPASS\t.\tGT\t1/1\n\
                    #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\n\
                    \n\
                    10\t94761900\trs4244285\tG\tA\t.\tPASS\t.\tGT\t0/1\n";
        let parsed = parse(&kb(), text).unwrap();
        assert_eq!(parsed.lines_scanned, 1);
        assert_eq!(parsed.variants.len(), 1);
        assert_eq!(parsed.variants[0].rsid, "rs4244285");
    }

    #[test]
    fn genotype_takes_first_format_subfield() {
        let parsed = parse(
            &kb(),
            &vcf(&["6\t18130918\trs1142345\tT\tC\t.\tPASS\t.\tGT:AD:DP\t1|1:0,30:30"]),
        )
        .unwrap();
        assert_eq!(parsed.variants[0].genotype, "1|1");
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let text = "##fileformat=VCFv4.2\r\n\
                    #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\r\n\
                    6\t18130918\trs1142345\tT\tC\t.\tPASS\t.\tGT\t0/1\r\n";
        let parsed = parse(&kb(), text).unwrap();
        assert_eq!(parsed.subject_id, "S1");
        assert_eq!(parsed.variants[0].genotype, "0/1");
    }

    #[test]
    fn variants_for_gene_filters_in_file_order() {
        let parsed = parse(
            &kb(),
            &vcf(&[
                "22\t42126611\trs1065852\tG\tA\t.\tPASS\t.\tGT\t0/1",
                "10\t94761900\trs4244285\tG\tA\t.\tPASS\t.\tGT\t0/1",
                "22\t42130692\trs3892097\tG\tA\t.\tPASS\t.\tGT\t1/1",
            ]),
        )
        .unwrap();

        let cyp2d6 = parsed.variants_for_gene("CYP2D6");
        assert_eq!(cyp2d6.len(), 2);
        assert_eq!(cyp2d6[0].rsid, "rs1065852");
        assert_eq!(cyp2d6[1].rsid, "rs3892097");
        assert!(parsed.variants_for_gene("TPMT").is_empty());
    }
}
