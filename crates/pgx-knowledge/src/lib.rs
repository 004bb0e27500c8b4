//! # pgx-knowledge
//!
//! A TOML-declared pharmacogenomic knowledge base: genes of interest,
//! drug → gene mapping with pharmacological class, curated rsID annotations
//! and the recommendation tables.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use pgx_knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::builtin()?;
//! let codeine = kb.drug("CODEINE").unwrap();
//! assert_eq!(codeine.gene, "CYP2D6");
//! ```
//!
//! The knowledge base is loaded once and shared read-only; nothing in the
//! workspace mutates it after construction.

pub mod base;
pub mod config;

pub use base::KnowledgeBase;
pub use config::{DrugClass, DrugEntry, KnowledgeConfig, VariantAnnotation};

// ── Tests ─────────────────────────────────────────────────────────────────────
