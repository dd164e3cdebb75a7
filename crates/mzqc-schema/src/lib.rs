//! # mzqc-schema
//!
//! JSON Schema generation and structural validation for mzQC documents.
//!
//! This crate provides:
//! - `SchemaRegistry`: JSON Schemas generated from the `mzqc-core` entities,
//!   with the document schema tightened to the format's structural invariants
//! - `SchemaRegistry::check_document`: the schema half of a validation report
//!   (`"success"` or the first violation with its instance path)
//!
//! An externally published document schema can replace the generated one with
//! [`SchemaRegistry::with_document_schema`].

mod error;
mod registry;
mod tighten;

pub use error::SchemaError;
pub use registry::{DOCUMENT, SchemaOutcome, SchemaRegistry};
