//! PGX risk pipeline CLI
//!
//! Usage:
//!   pgx analyze --vcf patient.vcf --drugs "CODEINE, WARFARIN"
//!   pgx analyze --vcf patient.vcf --drugs CODEINE --history history.json
//!   pgx history --history history.json --limit 5
//!   pgx scenarios

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pgx_contracts::{
    error::{PgxError, PgxResult},
    history::{HistoryEntry, HistoryStats},
    report::Report,
};
use pgx_core::{traits::HistoryStore, Pipeline, TemplateRationale};
use pgx_history::{InMemoryHistoryStore, JsonFileHistoryStore, DEFAULT_CAPACITY};
use pgx_knowledge::KnowledgeBase;
use pgx_verify::SchemaVerifier;

// ── CLI definition ───────────────────────────────────────────────────────────

/// Pharmacogenomic risk assessment from a patient VCF file.
#[derive(Parser)]
#[command(
    name = "pgx",
    about = "Pharmacogenomic drug risk assessment",
    long_about = "Parses a single-sample VCF, infers metabolizer phenotypes for the\n\
                  requested drugs' genes and prints one JSON report per drug."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assess drug risk for the patient in a VCF file.
    Analyze {
        /// Path to the VCF file.
        #[arg(long)]
        vcf: PathBuf,
        /// Comma-separated drug names, e.g. "CODEINE, WARFARIN".
        #[arg(long)]
        drugs: String,
        /// Alternative knowledge base TOML (defaults to the built-in one).
        #[arg(long)]
        knowledge: Option<PathBuf>,
        /// JSON history file to append the reports to.
        #[arg(long)]
        history: Option<PathBuf>,
        /// Reports retained in the history.
        #[arg(long, default_value_t = DEFAULT_CAPACITY)]
        capacity: usize,
        /// Print compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
    /// Show recent history entries and aggregate statistics.
    History {
        /// JSON history file to read.
        #[arg(long)]
        history: PathBuf,
        /// Number of entries to show.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Run the reference scenarios on fictional data.
    Scenarios,
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Analyze { vcf, drugs, knowledge, history, capacity, compact } => {
            analyze(&vcf, &drugs, knowledge, history, capacity, compact)
        }
        Command::History { history, limit } => show_history(history, limit),
        Command::Scenarios => pgx_ref::scenarios::run_all(),
    };

    if let Err(e) = result {
        eprintln!("pgx error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

fn analyze(
    vcf: &Path,
    drugs: &str,
    knowledge: Option<PathBuf>,
    history: Option<PathBuf>,
    capacity: usize,
    compact: bool,
) -> PgxResult<()> {
    let knowledge = match knowledge {
        Some(path) => KnowledgeBase::from_file(&path)?,
        None => KnowledgeBase::builtin()?,
    };

    let store: Box<dyn HistoryStore> = match history {
        Some(path) => Box::new(JsonFileHistoryStore::open(path, capacity)?),
        None => Box::new(InMemoryHistoryStore::new(capacity)),
    };

    let raw = read_variant_file(vcf)?;

    let pipeline = Pipeline::new(knowledge, Box::new(TemplateRationale::new()), store)
        .with_verifier(Box::new(SchemaVerifier::ehr()));

    let reports: Vec<Report> = pipeline.run(&raw, drugs)?;
    println!("{}", to_json(&reports, compact)?);
    Ok(())
}

fn read_variant_file(path: &Path) -> PgxResult<String> {
    let raw = fs::read_to_string(path).map_err(|e| PgxError::Io {
        reason: format!("'{}': {}", path.display(), e),
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "variant file read");
    Ok(raw)
}

#[derive(Serialize)]
struct HistoryView {
    stats: HistoryStats,
    recent: Vec<HistoryEntry>,
}

fn show_history(path: PathBuf, limit: usize) -> PgxResult<()> {
    let store = JsonFileHistoryStore::open(path, usize::MAX)?;
    let view = HistoryView {
        stats: store.stats()?,
        recent: store.recent(limit)?,
    };
    println!("{}", to_json(&view, false)?);
    Ok(())
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> PgxResult<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.map_err(|e| PgxError::ConfigError {
        reason: format!("output could not be serialized: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pgx_contracts::error::PgxError;

    use super::read_variant_file;

    #[test]
    fn unreadable_variant_file_is_io_error() {
        match read_variant_file(Path::new("/nonexistent/patient.vcf")) {
            Err(PgxError::Io { reason }) => assert!(reason.contains("patient.vcf")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
