//! Scenario E: Azathioprine in a TPMT poor metabolizer
//!
//! TPMT inactivates thiopurines, so a patient without TPMT activity
//! accumulates toxic metabolites:
//!   1. Parser annotates rs1142345 as TPMT*3C with genotype 1/1
//!   2. Inferencer: PM, *3C/*3C
//!   3. Classifier: metabolic shunt + PM → Toxic / critical
//!   4. Resolver: AZATHIOPRINE/PM override → "Reduce Dose / Alternative"
//!
//! The report is also printed as the JSON handed to EHR ingestion.

use pgx_contracts::{
    error::{PgxError, PgxResult},
    report::Report,
};
use pgx_history::InMemoryHistoryStore;

use crate::{
    mock_data::{vcf_document, TPMT_STAR3C_HOM},
    scenarios::{print_history, print_report, run_reference},
};

const SUBJECT: &str = "SUBJ-E-005";

pub fn evaluate() -> PgxResult<Vec<Report>> {
    run().map(|(reports, _)| reports)
}

fn run() -> PgxResult<(Vec<Report>, InMemoryHistoryStore)> {
    run_reference(&vcf_document(SUBJECT, &[TPMT_STAR3C_HOM]), "AZATHIOPRINE")
}

pub fn run_scenario() -> PgxResult<()> {
    println!("=== Scenario E: Azathioprine, TPMT poor metabolizer ===");
    println!();
    println!("  Input:  rs1142345 (TPMT*3C) genotype 1/1");
    println!("  Drugs:  AZATHIOPRINE");
    println!();

    let (reports, history) = run()?;
    for report in &reports {
        print_report(report);
        let json = serde_json::to_string_pretty(report).map_err(|e| PgxError::ConfigError {
            reason: format!("report could not be serialized: {e}"),
        })?;
        println!("{json}");
        println!();
    }
    print_history(&history);

    println!();
    println!("  Scenario E complete.");
    println!();
    Ok(())
}
