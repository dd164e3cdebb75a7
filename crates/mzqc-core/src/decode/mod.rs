//! Structural type decoder.
//!
//! mzQC documents carry no type tags. Decoding runs in two passes:
//!
//! 1. **Inference** ([`Node::infer`]): innermost objects first, each object's
//!    key set is matched against the [`SchemaTable`] and annotated with the
//!    most specific generic variant.
//! 2. **Rectification** ([`Structural::resolve`]): starting from the root,
//!    every parent constructs its children as the exact variant its field
//!    expects, overriding ambiguous inferences (a metric and a plain CV
//!    parameter share one key set).
//!
//! A document that does not resolve is returned as untyped JSON, never as a
//! partially constructed entity.

mod node;
mod resolve;
mod schema_table;

use std::fmt;

use serde_json::Value;

pub use node::Node;
pub use resolve::{Fields, ResolveError, Structural};
pub use schema_table::SchemaTable;

use crate::entities::{
    AnalysisSoftware, BaseQuality, ControlledVocabulary, CvParameter, File, InputFile,
    MetadataParameters, QualityMetric,
};
use crate::errors::DecodeError;

/// Key wrapping the file in a complete document.
pub const ROOT_KEY: &str = "mzQC";

/// The entity variants known to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    ControlledVocabulary,
    CvParameter,
    AnalysisSoftware,
    InputFile,
    MetadataParameters,
    QualityMetric,
    BaseQuality,
    File,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ControlledVocabulary => "ControlledVocabulary",
            Self::CvParameter => "CvParameter",
            Self::AnalysisSoftware => "AnalysisSoftware",
            Self::InputFile => "InputFile",
            Self::MetadataParameters => "MetadataParameters",
            Self::QualityMetric => "QualityMetric",
            Self::BaseQuality => "BaseQuality",
            Self::File => "MzQcFile",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded entity of any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    ControlledVocabulary(ControlledVocabulary),
    CvParameter(CvParameter),
    AnalysisSoftware(AnalysisSoftware),
    InputFile(InputFile),
    MetadataParameters(MetadataParameters),
    QualityMetric(QualityMetric),
    Quality(BaseQuality),
    File(File),
}

impl Entity {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::ControlledVocabulary(_) => EntityKind::ControlledVocabulary,
            Self::CvParameter(_) => EntityKind::CvParameter,
            Self::AnalysisSoftware(_) => EntityKind::AnalysisSoftware,
            Self::InputFile(_) => EntityKind::InputFile,
            Self::MetadataParameters(_) => EntityKind::MetadataParameters,
            Self::QualityMetric(_) => EntityKind::QualityMetric,
            Self::Quality(_) => EntityKind::BaseQuality,
            Self::File(_) => EntityKind::File,
        }
    }

    fn resolve(kind: EntityKind, node: &Node) -> Result<Self, ResolveError> {
        Ok(match kind {
            EntityKind::ControlledVocabulary => {
                Self::ControlledVocabulary(ControlledVocabulary::resolve(node)?)
            }
            EntityKind::CvParameter => Self::CvParameter(CvParameter::resolve(node)?),
            EntityKind::AnalysisSoftware => Self::AnalysisSoftware(AnalysisSoftware::resolve(node)?),
            EntityKind::InputFile => Self::InputFile(InputFile::resolve(node)?),
            EntityKind::MetadataParameters => {
                Self::MetadataParameters(MetadataParameters::resolve(node)?)
            }
            EntityKind::QualityMetric => Self::QualityMetric(QualityMetric::resolve(node)?),
            EntityKind::BaseQuality => Self::Quality(BaseQuality::resolve(node)?),
            EntityKind::File => Self::File(File::resolve(node)?),
        })
    }
}

/// Outcome of a decode: a typed entity, or the input retained as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Entity(Entity),
    Untyped(Value),
}

impl Decoded {
    /// The decoded file, if the document resolved into one.
    #[must_use]
    pub const fn as_file(&self) -> Option<&File> {
        match self {
            Self::Entity(Entity::File(file)) => Some(file),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_file(self) -> Option<File> {
        match self {
            Self::Entity(Entity::File(file)) => Some(file),
            _ => None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Entity(entity) => Some(entity.kind()),
            Self::Untyped(_) => None,
        }
    }
}

/// Decoder context owning the schema table.
#[derive(Debug, Clone)]
pub struct Decoder {
    table: SchemaTable,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// A decoder over [`SchemaTable::standard`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(SchemaTable::standard())
    }

    #[must_use]
    pub const fn with_table(table: SchemaTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub const fn table(&self) -> &SchemaTable {
        &self.table
    }

    /// Decode JSON text into the variant inferred for its root.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for unparseable text and
    /// [`DecodeError::Timestamp`] for malformed timestamps.
    pub fn decode(&self, text: &str) -> Result<Decoded, DecodeError> {
        self.decode_value(serde_json::from_str(text)?)
    }

    /// Decode an already parsed JSON value. See [`Decoder::decode`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Timestamp`] for malformed timestamps.
    pub fn decode_value(&self, value: Value) -> Result<Decoded, DecodeError> {
        let node = Node::infer(unwrap_root(value), &self.table)?;
        let Some(kind) = node.kind() else {
            tracing::debug!("document root matches no known entity shape");
            return Ok(Decoded::Untyped(node.to_value()));
        };
        match Entity::resolve(kind, &node) {
            Ok(entity) => Ok(Decoded::Entity(entity)),
            Err(ResolveError::Shape(reason)) => {
                tracing::debug!(%kind, %reason, "document did not resolve; keeping untyped JSON");
                Ok(Decoded::Untyped(node.to_value()))
            }
            Err(ResolveError::Fatal(error)) => Err(error),
        }
    }

    /// Decode JSON text as the caller-named variant `T`.
    ///
    /// Returns `Ok(None)` when the root does not fit `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::decode`].
    pub fn decode_as<T: Structural>(&self, text: &str) -> Result<Option<T>, DecodeError> {
        let value: Value = serde_json::from_str(text)?;
        let node = Node::infer(unwrap_root(value), &self.table)?;
        match T::resolve(&node) {
            Ok(entity) => Ok(Some(entity)),
            Err(ResolveError::Shape(reason)) => {
                tracing::debug!(expected = %T::KIND, %reason, "root does not fit requested variant");
                Ok(None)
            }
            Err(ResolveError::Fatal(error)) => Err(error),
        }
    }
}

fn unwrap_root(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key(ROOT_KEY) => {
            map.remove(ROOT_KEY).unwrap_or(Value::Null)
        }
        other => other,
    }
}
