//! # pgx-history
//!
//! Bounded, most-recent-first history of completed reports.
//!
//! ## Overview
//!
//! Each report a run produces is wrapped in a `HistoryEntry` carrying the
//! run id, the time it was stored and a SHA-256 fingerprint of its content.
//! The fingerprint ignores timestamps, so re-running identical input yields
//! identical fingerprints, and editing a stored report is caught by
//! `verify_entries`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pgx_history::InMemoryHistoryStore;
//! use pgx_core::traits::HistoryStore;
//!
//! let store = InMemoryHistoryStore::new(50);
//! store.record_run(&run_id, &reports)?;
//! let latest = store.recent(10)?;
//! ```

pub mod file;
pub mod fingerprint;
mod log;
pub mod memory;

#[cfg(test)]
mod test_support;

pub use file::JsonFileHistoryStore;
pub use fingerprint::{fingerprint_report, verify_entries};
pub use memory::InMemoryHistoryStore;

/// Retained reports when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 50;
