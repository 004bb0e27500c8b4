//! Fictional variant files for the reference scenarios.
//!
//! All data in this module is hardcoded and fictional. Positions are
//! GRCh38 coordinates of the named rsIDs; the subjects do not exist.

/// Standard VCF 4.2 metadata lines.
const METADATA: &str = "##fileformat=VCFv4.2\n\
                        ##source=pgx-ref-mock\n\
                        ##reference=GRCh38\n\
                        ##INFO=<ID=GENE,Number=1,Type=String,Description=\"Gene symbol\">\n\
                        ##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n";

const COLUMNS: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT";

// ── Data lines ───────────────────────────────────────────────────────────────

/// CYP2D6*4, homozygous alternate.
pub const CYP2D6_STAR4_HOM: &str = "22\t42128945\trs3892097\tC\tT\t99\tPASS\tGENE=CYP2D6\tGT\t1/1";

/// CYP2C19*17 increased-function marker, homozygous alternate.
pub const CYP2C19_STAR17_HOM: &str = "10\t94761900\trs12248560\tC\tT\t99\tPASS\tGENE=CYP2C19\tGT\t1/1";

/// CYP2C9*3, heterozygous.
pub const CYP2C9_STAR3_HET: &str = "10\t94981296\trs1057910\tA\tC\t99\tPASS\tGENE=CYP2C9\tGT:DP\t0/1:41";

/// TPMT*3C, homozygous alternate.
pub const TPMT_STAR3C_HOM: &str = "6\t18130687\trs1142345\tT\tC\t99\tPASS\tGENE=TPMT\tGT\t1/1";

/// An off-panel variant that the parser must count but discard.
pub const BRCA1_OFF_PANEL: &str = "17\t43045712\trs80357906\tA\tG\t99\tPASS\tGENE=BRCA1\tGT\t0/1";

// ── Documents ────────────────────────────────────────────────────────────────

/// A single-sample VCF for `subject` holding `lines`.
pub fn vcf_document(subject: &str, lines: &[&str]) -> String {
    let mut text = format!("{METADATA}{COLUMNS}\t{subject}\n");
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// The same document without the `##fileformat` declaration.
pub fn undeclared_document(subject: &str, lines: &[&str]) -> String {
    vcf_document(subject, lines)
        .lines()
        .filter(|line| !line.starts_with("##fileformat"))
        .map(|line| format!("{line}\n"))
        .collect()
}
