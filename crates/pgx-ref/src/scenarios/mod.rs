//! Reference scenarios.
//!
//! Each scenario wires real components (built-in knowledge base, templated
//! rationale, EHR schema verifier, in-memory history) around one fictional
//! variant file and prints what the pipeline decided.

pub mod codeine_poor_metabolizer;
pub mod gene_isolation;
pub mod missing_declaration;
pub mod thiopurine_toxicity;
pub mod unsupported_drug;

use pgx_contracts::{error::PgxResult, report::Report};
use pgx_core::{Pipeline, TemplateRationale};
use pgx_history::InMemoryHistoryStore;
use pgx_knowledge::KnowledgeBase;
use pgx_verify::SchemaVerifier;

/// Reports retained by a scenario's history.
const SCENARIO_HISTORY_CAPACITY: usize = 10;

/// Run every scenario in order, stopping at the first error.
pub fn run_all() -> PgxResult<()> {
    codeine_poor_metabolizer::run_scenario()?;
    gene_isolation::run_scenario()?;
    unsupported_drug::run_scenario()?;
    missing_declaration::run_scenario()?;
    thiopurine_toxicity::run_scenario()?;
    Ok(())
}

/// Run `raw` through a fresh reference pipeline, returning the reports and
/// the history they were recorded into.
///
/// The store is cloned into the pipeline; both handles share entries.
pub(crate) fn run_reference(
    raw: &str,
    drugs: &str,
) -> PgxResult<(Vec<Report>, InMemoryHistoryStore)> {
    let history = InMemoryHistoryStore::new(SCENARIO_HISTORY_CAPACITY);
    let pipeline = Pipeline::new(
        KnowledgeBase::builtin()?,
        Box::new(TemplateRationale::new()),
        Box::new(history.clone()),
    )
    .with_verifier(Box::new(SchemaVerifier::ehr()));

    let reports = pipeline.run(raw, drugs)?;
    Ok((reports, history))
}

pub(crate) fn print_report(report: &Report) {
    let profile = &report.pharmacogenomic_profile;
    let risk = &report.risk_assessment;
    let rec = &report.clinical_recommendation;

    println!("  Drug:                   {}", report.drug);
    println!("  Patient:                {}", report.patient_id);
    println!("  Gene / diplotype:       {} {}", profile.primary_gene, profile.diplotype);
    println!("  Phenotype:              {} ({})", profile.phenotype, profile.phenotype.description());
    println!(
        "  Risk:                   {} / {} (confidence {:.2})",
        risk.risk_label, risk.severity, risk.confidence_score
    );
    println!("  Action:                 {}", rec.action);
    println!("  Guideline:              {} (evidence {})", rec.cpic_guideline, rec.evidence_level);
    println!();
}

pub(crate) fn print_history(history: &InMemoryHistoryStore) {
    println!(
        "  History:                {} report(s), integrity {}",
        history.len(),
        if history.verify_integrity() { "VERIFIED" } else { "FAILED" }
    );
}
