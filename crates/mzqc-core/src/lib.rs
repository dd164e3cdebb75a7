//! # mzqc-core
//!
//! Object graph, structural type decoder, and canonical encoder for mzQC
//! quality-report documents.
//!
//! This crate provides the foundational types shared across all mzQC crates:
//! - Entity structs for every document object (file, runs/sets, metadata, CV terms)
//! - A schema table of field-name sets used to infer entity variants from
//!   untagged JSON objects
//! - The two-pass decoder (bottom-up inference, top-down rectification)
//! - The canonical encoder and a structured pretty-printer for metric tables
//! - Decode and encode error types

pub mod decode;
pub mod encode;
pub mod entities;
pub mod errors;
pub mod summary;
pub mod timestamp;

pub use decode::{Decoded, Decoder, Entity, EntityKind, SchemaTable};
pub use encode::{Layout, Readability};
pub use entities::{
    AnalysisSoftware, BaseQuality, ControlledVocabulary, CvParameter, File, InputFile,
    MetadataParameters, MetricValue, MzqcDocument, QualityMetric, QualityRole, RunQuality, SetQuality,
    Unit,
};
pub use errors::{DecodeError, EncodeError};
pub use summary::FileSummary;
