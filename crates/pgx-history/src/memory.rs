//! In-memory implementation of `HistoryStore`.
//!
//! `InMemoryHistoryStore` keeps its entries in a `Vec` protected by a
//! `Mutex`. Clones share the same entries, so a caller can keep a handle
//! after boxing one into a `Pipeline`.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use pgx_contracts::{
    error::{PgxError, PgxResult},
    history::{HistoryEntry, HistoryStats},
    report::{Report, RunId},
};
use pgx_core::traits::HistoryStore;

use crate::{fingerprint::verify_entries, log::HistoryLog};

/// A bounded, most-recent-first history held in memory.
#[derive(Clone)]
pub struct InMemoryHistoryStore {
    pub(crate) state: Arc<Mutex<HistoryLog>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store that retains at most `capacity` reports.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(HistoryLog::new(capacity))),
        }
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that no retained report was modified after it was stored.
    pub fn verify_integrity(&self) -> bool {
        match self.state.lock() {
            Ok(state) => verify_entries(&state.entries),
            Err(_) => false,
        }
    }

    fn lock(&self) -> PgxResult<std::sync::MutexGuard<'_, HistoryLog>> {
        self.state.lock().map_err(|e| PgxError::HistoryWriteFailed {
            reason: format!("history state lock poisoned: {}", e),
        })
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn record_run(&self, run_id: &RunId, reports: &[Report]) -> PgxResult<()> {
        let mut state = self.lock()?;
        let (next, evicted) = state.with_batch(run_id, reports)?;
        *state = next;

        if evicted > 0 {
            debug!(evicted, capacity = state.capacity, "history capacity reached, oldest entries dropped");
        }
        info!(
            run_id = %run_id.0,
            reports = reports.len(),
            retained = state.entries.len(),
            "run recorded in history"
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
