//! # pgx-core
//!
//! The pharmacogenomic inference pipeline.
//!
//! This crate provides:
//! - The variant parser, phenotype inferencer, risk classifier and
//!   recommendation resolver, as plain functions over a `KnowledgeBase`
//! - The three collaborator traits (`RationaleGenerator`, `ReportVerifier`,
//!   `HistoryStore`)
//! - The `Pipeline` that wires them together per requested drug
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pgx_core::{Pipeline, TemplateRationale};
//! use pgx_knowledge::KnowledgeBase;
//!
//! let pipeline = Pipeline::new(KnowledgeBase::builtin()?, Box::new(TemplateRationale::new()), history);
//! let reports = pipeline.run(&vcf_text, "CODEINE, WARFARIN")?;
//! ```

pub mod inference;
pub mod parser;
pub mod pipeline;
pub mod rationale;
pub mod recommend;
pub mod risk;
pub mod traits;

pub use parser::ParsedVcf;
pub use pipeline::Pipeline;
pub use rationale::TemplateRationale;
