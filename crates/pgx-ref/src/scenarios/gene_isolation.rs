//! Scenario B: Gene isolation
//!
//! The same CYP2D6*4 homozygote also carries CYP2C19*17 (the
//! increased-function marker) homozygously. Codeine is evaluated on CYP2D6
//! only, so the marker must not turn the patient into an ultra-rapid
//! metabolizer for codeine. Clopidogrel, evaluated on CYP2C19 in the same
//! run, does see it.

use pgx_contracts::{error::PgxResult, report::Report};
use pgx_history::InMemoryHistoryStore;

use crate::{
    mock_data::{vcf_document, CYP2C19_STAR17_HOM, CYP2D6_STAR4_HOM},
    scenarios::{print_history, print_report, run_reference},
};

const SUBJECT: &str = "SUBJ-B-002";
const DRUGS: &str = "CODEINE, CLOPIDOGREL";

pub fn evaluate() -> PgxResult<Vec<Report>> {
    run().map(|(reports, _)| reports)
}

fn run() -> PgxResult<(Vec<Report>, InMemoryHistoryStore)> {
    run_reference(&vcf_document(SUBJECT, &[CYP2D6_STAR4_HOM, CYP2C19_STAR17_HOM]), DRUGS)
}

pub fn run_scenario() -> PgxResult<()> {
    println!("=== Scenario B: Gene isolation ===");
    println!();
    println!("  Input:  rs3892097 (CYP2D6*4) 1/1, rs12248560 (CYP2C19*17) 1/1");
    println!("  Drugs:  {}", DRUGS);
    println!();

    let (reports, history) = run()?;
    for report in &reports {
        print_report(report);
    }
    print_history(&history);

    println!();
    println!("  Scenario B complete.");
    println!();
    Ok(())
}
