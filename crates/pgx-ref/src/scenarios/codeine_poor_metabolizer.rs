//! Scenario A: Codeine in a CYP2D6 poor metabolizer
//!
//! A homozygous CYP2D6*4 patient cannot convert codeine to morphine:
//!   1. Parser annotates rs3892097 as CYP2D6*4 with genotype 1/1
//!   2. Inferencer: homozygous no-function allele → PM, *4/*4
//!   3. Classifier: prodrug + PM → Ineffective / moderate
//!   4. Resolver: CODEINE/PM override → "Avoid Codeine"
//!   5. Report passes the EHR schema and is recorded in history

use pgx_contracts::{error::PgxResult, report::Report};
use pgx_history::InMemoryHistoryStore;

use crate::{
    mock_data::{vcf_document, CYP2D6_STAR4_HOM},
    scenarios::{print_history, print_report, run_reference},
};

/// Run the pipeline for this scenario and return its reports.
pub fn evaluate() -> PgxResult<Vec<Report>> {
    run().map(|(reports, _)| reports)
}

fn run() -> PgxResult<(Vec<Report>, InMemoryHistoryStore)> {
    run_reference(&vcf_document("SUBJ-A-001", &[CYP2D6_STAR4_HOM]), "CODEINE")
}

pub fn run_scenario() -> PgxResult<()> {
    println!("=== Scenario A: Codeine, CYP2D6 poor metabolizer ===");
    println!();
    println!("  Input:  rs3892097 (CYP2D6*4) genotype 1/1");
    println!("  Drugs:  CODEINE");
    println!();

    let (reports, history) = run()?;
    for report in &reports {
        print_report(report);
    }
    print_history(&history);

    println!();
    println!("  Scenario A complete.");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use pgx_contracts::{
        profile::Phenotype,
        risk::{RiskLabel, Severity},
    };

    use super::{evaluate, run_scenario};

    #[test]
    fn codeine_is_ineffective_for_star4_homozygote() {
        let reports = evaluate().unwrap();
        assert_eq!(reports.len(), 1);
        let r = &reports[0];
        assert_eq!(r.patient_id, "SUBJ-A-001");
        assert_eq!(r.pharmacogenomic_profile.phenotype, Phenotype::PoorMetabolizer);
        assert_eq!(r.pharmacogenomic_profile.diplotype, "*4/*4");
        assert_eq!(r.risk_assessment.risk_label, RiskLabel::Ineffective);
        assert_eq!(r.risk_assessment.severity, Severity::Moderate);
    }

    #[test]
    fn scenario_runs() {
        run_scenario().unwrap();
    }
}
