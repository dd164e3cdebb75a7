//! Canonical encoder: the inverse of the structural decoder.
//!
//! Field order follows declaration order; empty optional strings and empty
//! run/set lists are omitted, required fields never are.

mod pretty;

use serde::{Serialize, Serializer};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

pub use pretty::{Doc, Layout};

use crate::decode::{Entity, ROOT_KEY};
use crate::errors::EncodeError;

/// Output style of [`to_string`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Readability {
    /// A single line.
    #[default]
    Compact,
    /// Two-space indentation with metric values laid out by shape.
    Tables,
    /// Plain four-space indentation.
    Indented,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    #[serde(rename = "mzQC")]
    mzqc: &'a T,
}

/// Encode `entity` as JSON text.
///
/// With `complete`, the output is wrapped in the `{"mzQC": …}` root object.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialisation fails.
pub fn to_string<T>(entity: &T, readability: Readability, complete: bool) -> Result<String, EncodeError>
where
    T: Serialize + Layout,
{
    match readability {
        Readability::Compact if complete => Ok(serde_json::to_string(&Envelope { mzqc: entity })?),
        Readability::Compact => Ok(serde_json::to_string(entity)?),
        Readability::Tables => {
            let doc = entity.layout()?;
            let doc = if complete {
                Doc::Object(vec![(ROOT_KEY.to_string(), doc)])
            } else {
                doc
            };
            doc.render()
        }
        Readability::Indented if complete => indented(&Envelope { mzqc: entity }),
        Readability::Indented => indented(entity),
    }
}

/// The canonical JSON value of `entity`.
///
/// # Errors
///
/// Returns [`EncodeError`] if serialisation fails.
pub fn to_value<T: Serialize>(entity: &T) -> Result<Value, EncodeError> {
    Ok(serde_json::to_value(entity)?)
}

fn indented<T: Serialize>(entity: &T) -> Result<String, EncodeError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    entity.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ControlledVocabulary(cv) => cv.serialize(serializer),
            Self::CvParameter(param) => param.serialize(serializer),
            Self::AnalysisSoftware(software) => software.serialize(serializer),
            Self::InputFile(input) => input.serialize(serializer),
            Self::MetadataParameters(metadata) => metadata.serialize(serializer),
            Self::QualityMetric(metric) => metric.serialize(serializer),
            Self::Quality(quality) => quality.serialize(serializer),
            Self::File(file) => file.serialize(serializer),
        }
    }
}

impl Layout for Entity {
    fn layout(&self) -> Result<Doc, EncodeError> {
        match self {
            Self::ControlledVocabulary(cv) => cv.layout(),
            Self::CvParameter(param) => param.layout(),
            Self::AnalysisSoftware(software) => software.layout(),
            Self::InputFile(input) => input.layout(),
            Self::MetadataParameters(metadata) => metadata.layout(),
            Self::QualityMetric(metric) => metric.layout(),
            Self::Quality(quality) => quality.layout(),
            Self::File(file) => file.layout(),
        }
    }
}
