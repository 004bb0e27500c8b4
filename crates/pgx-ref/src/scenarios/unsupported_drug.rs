//! Scenario C: Unsupported drug names are ignored
//!
//! The request names WARFARIN and a drug the knowledge base has never heard
//! of. The unknown name is dropped without error and exactly one report, for
//! warfarin, comes back. An off-panel BRCA1 line is scanned but discarded.

use pgx_contracts::{error::PgxResult, report::Report};
use pgx_history::InMemoryHistoryStore;

use crate::{
    mock_data::{vcf_document, BRCA1_OFF_PANEL, CYP2C9_STAR3_HET},
    scenarios::{print_history, print_report, run_reference},
};

const SUBJECT: &str = "SUBJ-C-003";
const DRUGS: &str = "WARFARIN, UNKNOWNDRUG";

pub fn evaluate() -> PgxResult<Vec<Report>> {
    run().map(|(reports, _)| reports)
}

fn run() -> PgxResult<(Vec<Report>, InMemoryHistoryStore)> {
    run_reference(&vcf_document(SUBJECT, &[BRCA1_OFF_PANEL, CYP2C9_STAR3_HET]), DRUGS)
}

pub fn run_scenario() -> PgxResult<()> {
    println!("=== Scenario C: Unsupported drug names ===");
    println!();
    println!("  Input:  rs80357906 (BRCA1, off panel) 0/1, rs1057910 (CYP2C9*3) 0/1");
    println!("  Drugs:  {}", DRUGS);
    println!();

    let (reports, history) = run()?;
    println!("  Reports returned:       {} (UNKNOWNDRUG ignored)", reports.len());
    println!();
    for report in &reports {
        print_report(report);
    }
    print_history(&history);

    println!();
    println!("  Scenario C complete.");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use pgx_contracts::{profile::Phenotype, risk::RiskLabel};

    use super::evaluate;

    #[test]
    fn only_warfarin_is_reported() {
        let reports = evaluate().unwrap();
        assert_eq!(reports.len(), 1);
        let r = &reports[0];
        assert_eq!(r.drug, "WARFARIN");
        assert_eq!(r.pharmacogenomic_profile.phenotype, Phenotype::IntermediateMetabolizer);
        assert_eq!(r.risk_assessment.risk_label, RiskLabel::AdjustDosage);
        assert_eq!(r.quality_metrics.variants_analyzed, 2);
        assert_eq!(r.quality_metrics.pharmacogenomic_variants_found, 1);
    }
}
