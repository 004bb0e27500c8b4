//! JSON-file implementation of `HistoryStore`.
//!
//! The whole history is one JSON array, newest first. Every batch rewrites
//! the file through a sibling temp file and a rename, and the in-memory copy
//! is only updated once the write has succeeded.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use tracing::{debug, info, warn};

use pgx_contracts::{
    error::{PgxError, PgxResult},
    history::{HistoryEntry, HistoryStats},
    report::{Report, RunId},
};
use pgx_core::traits::HistoryStore;

use crate::{fingerprint::verify_entries, log::HistoryLog};

/// A bounded history persisted to a JSON file.
pub struct JsonFileHistoryStore {
    path: PathBuf,
    state: Mutex<HistoryLog>,
}

impl JsonFileHistoryStore {
    /// Open the history at `path`, creating nothing until the first write.
    ///
    /// A missing or empty file is an empty history. Entries beyond
    /// `capacity` are dropped on load.
    ///
    /// # Errors
    ///
    /// Returns `PgxError::ConfigError` if the file exists but cannot be read
    /// or is not a JSON array of history entries.
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> PgxResult<Self> {
        let path = path.into();
        let entries = load(&path)?;

        if !verify_entries(&entries) {
            warn!(path = %path.display(), "history file contains entries whose fingerprint does not match");
        }
        debug!(path = %path.display(), entries = entries.len(), capacity, "history file opened");

        Ok(Self {
            path,
            state: Mutex::new(HistoryLog::with_entries(entries, capacity)),
        })
    }

    fn lock(&self) -> PgxResult<MutexGuard<'_, HistoryLog>> {
        self.state.lock().map_err(|e| PgxError::HistoryWriteFailed {
            reason: format!("history state lock poisoned: {}", e),
        })
    }

    fn persist(&self, entries: &[HistoryEntry]) -> PgxResult<()> {
        let write_failed = |e: &dyn std::fmt::Display| PgxError::HistoryWriteFailed {
            reason: format!("failed to write history '{}': {}", self.path.display(), e),
        };

        let json = serde_json::to_vec_pretty(entries).map_err(|e| write_failed(&e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_failed(&e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| write_failed(&e))?;
        fs::rename(&tmp, &self.path).map_err(|e| write_failed(&e))?;
        Ok(())
    }
}

fn load(path: &Path) -> PgxResult<Vec<HistoryEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| PgxError::ConfigError {
        reason: format!("failed to read history '{}': {}", path.display(), e),
    })?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).map_err(|e| PgxError::ConfigError {
        reason: format!("history '{}' is not a valid history file: {}", path.display(), e),
    })
}

impl HistoryStore for JsonFileHistoryStore {
    fn record_run(&self, run_id: &RunId, reports: &[Report]) -> PgxResult<()> {
        let mut state = self.lock()?;
        let (next, evicted) = state.with_batch(run_id, reports)?;

        self.persist(&next.entries)?;
        *state = next;

        info!(
            run_id = %run_id.0,
            reports = reports.len(),
            retained = state.entries.len(),
            evicted,
            path = %self.path.display(),
            "run recorded in history file"
        );
        Ok(())
    }

    fn recent(&self, limit: usize) -> PgxResult<Vec<HistoryEntry>> {
        Ok(self.lock()?.recent(limit))
    }

    fn stats(&self) -> PgxResult<HistoryStats> {
        Ok(self.lock()?.stats())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;

    use pgx_contracts::{error::PgxError, report::RunId, risk::RiskLabel};
    use pgx_core::traits::HistoryStore;

    use crate::test_support::make_report;

    use super::JsonFileHistoryStore;

    #[test]
    fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonFileHistoryStore::open(&path, 10).unwrap();

        assert!(store.recent(10).unwrap().is_empty());
        assert_eq!(store.stats().unwrap().total_reports, 0);
        assert!(!path.exists());
    }

    #[test]
    fn first_write_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let store = JsonFileHistoryStore::open(&path, 10).unwrap();

        store.record_run(&RunId::new(), &[make_report("CODEINE", RiskLabel::Safe)]).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let run_id = RunId::new();
        {
            let store = JsonFileHistoryStore::open(&path, 10).unwrap();
            store
                .record_run(&run_id, &[make_report("CODEINE", RiskLabel::Safe), make_report("WARFARIN", RiskLabel::Toxic)])
                .unwrap();
        }

        let reopened = JsonFileHistoryStore::open(&path, 10).unwrap();
        let recent = reopened.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].report.drug, "CODEINE");
        assert_eq!(recent[1].report.drug, "WARFARIN");
        assert_eq!(recent[0].run_id, run_id);
        assert!(crate::verify_entries(&recent));
    }

    #[test]
    fn capacity_applies_on_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        {
            let store = JsonFileHistoryStore::open(&path, 10).unwrap();
            for drug in ["A", "B", "C", "D"] {
                store.record_run(&RunId::new(), &[make_report(drug, RiskLabel::Safe)]).unwrap();
            }
        }

        let reopened = JsonFileHistoryStore::open(&path, 2).unwrap();
        let drugs: Vec<String> = reopened.recent(10).unwrap().into_iter().map(|e| e.report.drug).collect();
        assert_eq!(drugs, vec!["D", "C"]);
    }

    #[test]
    fn corrupt_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        match JsonFileHistoryStore::open(&path, 10) {
            Err(PgxError::ConfigError { reason }) => assert!(reason.contains("history")),
            Err(other) => panic!("expected ConfigError, got {:?}", other),
            Ok(_) => panic!("expected ConfigError, got a store"),
        }
    }

    #[test]
    fn failed_write_leaves_history_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("history.json");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let store = JsonFileHistoryStore {
            path: path.clone(),
            state: std::sync::Mutex::new(crate::log::HistoryLog::new(10)),
        };

        match store.record_run(&RunId::new(), &[make_report("CODEINE", RiskLabel::Safe)]) {
            Err(PgxError::HistoryWriteFailed { .. }) => {}
            other => panic!("expected HistoryWriteFailed, got {:?}", other),
        }
        assert!(store.recent(10).unwrap().is_empty());
    }
}
