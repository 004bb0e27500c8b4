//! # pgx-verify
//!
//! Report verification for the PGX pipeline.
//!
//! This crate provides [`engine::SchemaVerifier`], which implements
//! [`pgx_core::traits::ReportVerifier`]. It validates serialized reports in
//! two phases:
//!
//! 1. **Structural**: JSON Schema validation via the `jsonschema` crate.
//! 2. **Semantic**: rules (`RequiredField`, `AllowedValues`, `NumberRange`,
//!    `Custom`) evaluated against the payload.
//!
//! [`schema::ehr_report_schema`] is the schema EHR ingestion expects.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use pgx_verify::SchemaVerifier;
//!
//! let pipeline = pipeline.with_verifier(Box::new(SchemaVerifier::ehr()));
//! ```

pub mod engine;
pub mod schema;

pub use engine::SchemaVerifier;
pub use schema::ehr_report_schema;
