//! # mzqc-semantic
//!
//! Semantic validation of decoded mzQC files against the ontologies they
//! reference.
//!
//! This crate provides:
//! - The [`OntologyGateway`] and [`Ontology`] interfaces, with in-memory
//!   implementations
//! - [`IssueAccumulator`]: categorised issues with an abort threshold
//! - [`SemanticCheck`]: label, ontology load, term, metric and input file checks
//! - [`document_collected_issues`]: the self-documenting issue catalogue
//! - [`repair::fill_missing_descriptions`]: description repair from ontologies

pub mod accumulator;
pub mod check;
pub mod error;
pub mod issues;
pub mod ontology;
pub mod repair;
mod semantic_check;

pub use accumulator::IssueAccumulator;
pub use error::{GatewayError, ThresholdExceeded};
pub use issues::{Category, IssueKind, SemanticIssue, Severity};
pub use ontology::{MemoryGateway, MemoryOntology, Ontology, OntologyGateway, Term, Vocabularies};
pub use semantic_check::{SemanticCheck, ValidationOptions, document_collected_issues};
