//! Entity structs for every object of an mzQC document.
//!
//! Entities serialise to their canonical JSON form: camelCase field names in
//! declaration order, empty optional strings and empty optional lists omitted.
//! Decoding does not go through serde; see [`crate::decode`].

mod cv_param;
mod file;
mod input_file;
mod quality;
mod vocabulary;

pub use cv_param::{AnalysisSoftware, CvParameter, CvTerm, MetricValue, QualityMetric, Unit};
pub use file::{FORMAT_VERSION, File, MzqcDocument};
pub use input_file::{InputFile, MetadataParameters};
pub use quality::{BaseQuality, QualityRole, RunQuality, SetQuality};
pub use vocabulary::ControlledVocabulary;
