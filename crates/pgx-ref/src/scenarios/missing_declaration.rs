//! Scenario D: Missing file-format declaration
//!
//! A file without `##fileformat=VCF` is rejected with a format error before
//! any drug is evaluated, and nothing reaches the history.

use pgx_contracts::{
    error::{PgxError, PgxResult},
    report::Report,
};

use crate::{
    mock_data::{undeclared_document, CYP2D6_STAR4_HOM},
    scenarios::run_reference,
};

const SUBJECT: &str = "SUBJ-D-004";

pub fn evaluate() -> PgxResult<Vec<Report>> {
    run_reference(&undeclared_document(SUBJECT, &[CYP2D6_STAR4_HOM]), "CODEINE")
        .map(|(reports, _)| reports)
}

/// Succeeds when the pipeline rejects the file; any other outcome is
/// returned as an error.
pub fn run_scenario() -> PgxResult<()> {
    println!("=== Scenario D: Missing file-format declaration ===");
    println!();
    println!("  Input:  rs3892097 (CYP2D6*4) 1/1, no ##fileformat line");
    println!("  Drugs:  CODEINE");
    println!();

    match evaluate() {
        Err(PgxError::Format { reason }) => {
            println!("  Rejected:               {}", reason);
            println!("  History:                nothing recorded");
        }
        Err(other) => return Err(other),
        Ok(reports) => {
            return Err(PgxError::Format {
                reason: format!(
                    "undeclared file was accepted and produced {} report(s)",
                    reports.len()
                ),
            });
        }
    }

    println!();
    println!("  Scenario D complete.");
    println!();
    Ok(())
}
