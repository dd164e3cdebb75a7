//! Top-down rectification: constructing typed entities from inferred nodes.
//!
//! Every parent names the exact variant expected in each of its child slots
//! (`qualityMetrics` holds [`QualityMetric`], `fileProperties` holds plain
//! [`CvParameter`], …) and constructs children as that variant, whatever the
//! bottom-up inference guessed from the child's key set.

use chrono::NaiveDateTime;

use super::EntityKind;
use super::node::Node;
use crate::entities::{
    AnalysisSoftware, BaseQuality, ControlledVocabulary, CvParameter, FORMAT_VERSION, File,
    InputFile, MetadataParameters, MetricValue, QualityMetric, Unit,
};
use crate::errors::DecodeError;
use crate::timestamp;

/// Why a node could not be constructed as the requested variant.
#[derive(Debug)]
pub enum ResolveError {
    /// The node's shape does not fit; the caller falls back to untyped JSON.
    Shape(String),
    /// Malformed content that aborts the whole decode.
    Fatal(DecodeError),
}

impl From<DecodeError> for ResolveError {
    fn from(error: DecodeError) -> Self {
        Self::Fatal(error)
    }
}

/// An entity that can be constructed field by field from an inferred node.
pub trait Structural: Sized {
    const KIND: EntityKind;
    /// Every field name of the entity's default-valued shape.
    const FIELDS: &'static [&'static str];

    /// Construct from the node's members; absent members take defaults.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Shape`] when a member has the wrong JSON type,
    /// [`ResolveError::Fatal`] for malformed timestamps.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError>;

    /// Construct `Self` from `node`, overriding the inferred variant.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Shape`] if `node` is not an object or carries a key
    /// this variant does not declare.
    fn resolve(node: &Node) -> Result<Self, ResolveError> {
        let Node::Object { kind, members } = node else {
            return Err(ResolveError::Shape(format!(
                "expected an object for {}",
                Self::KIND
            )));
        };
        if let Some(inferred) = kind.filter(|inferred| *inferred != Self::KIND) {
            tracing::trace!(%inferred, expected = %Self::KIND, "rectifying node");
        }
        let fields = Fields::new(Self::KIND, Self::FIELDS, members)?;
        Self::from_fields(&fields)
    }
}

/// Read access to an object's members during construction.
pub struct Fields<'a> {
    kind: EntityKind,
    members: &'a [(String, Node)],
}

impl<'a> Fields<'a> {
    fn new(
        kind: EntityKind,
        declared: &[&str],
        members: &'a [(String, Node)],
    ) -> Result<Self, ResolveError> {
        if let Some((key, _)) = members.iter().find(|(key, _)| !declared.contains(&key.as_str())) {
            return Err(ResolveError::Shape(format!("{kind} has no field '{key}'")));
        }
        Ok(Self { kind, members })
    }

    /// The member named `key`; `null` counts as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Node> {
        self.members
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
            .filter(|node| !node.is_null())
    }

    fn mismatch(&self, key: &str, expected: &str) -> ResolveError {
        ResolveError::Shape(format!(
            "field '{key}' of {} must be {expected}",
            self.kind
        ))
    }

    /// A string member, empty when absent.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Shape`] if the member is not a string.
    pub fn string(&self, key: &str) -> Result<String, ResolveError> {
        self.string_or(key, "")
    }

    /// A string member, `default` when absent.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Shape`] if the member is not a string.
    pub fn string_or(&self, key: &str, default: &str) -> Result<String, ResolveError> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(Node::Scalar(serde_json::Value::String(s))) => Ok(s.clone()),
            Some(_) => Err(self.mismatch(key, "a string")),
        }
    }

    /// A timestamp member, `default()` when absent.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Fatal`] if the string is malformed,
    /// [`ResolveError::Shape`] if the member is not a string.
    pub fn timestamp(
        &self,
        key: &str,
        default: impl FnOnce() -> NaiveDateTime,
    ) -> Result<NaiveDateTime, ResolveError> {
        match self.get(key) {
            None => Ok(default()),
            Some(Node::Scalar(serde_json::Value::String(raw))) => Ok(timestamp::parse(key, raw)?),
            Some(Node::Timestamp { at, .. }) => Ok(*at),
            Some(_) => Err(self.mismatch(key, "an ISO-8601 string")),
        }
    }

    /// A single-slot child constructed as `T`, defaulted when absent.
    ///
    /// # Errors
    ///
    /// Propagates the child's [`ResolveError`].
    pub fn entity<T: Structural + Default>(&self, key: &str) -> Result<T, ResolveError> {
        self.get(key).map_or_else(|| Ok(T::default()), T::resolve)
    }

    /// A list of children, each constructed as `T`; empty when absent.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Shape`] if the member is not an array, or any child's
    /// error.
    pub fn list<T: Structural>(&self, key: &str) -> Result<Vec<T>, ResolveError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Node::Array(items)) => items.iter().map(T::resolve).collect(),
            Some(_) => Err(self.mismatch(key, "an array")),
        }
    }

    /// The raw JSON of a value member.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<MetricValue> {
        self.get(key).map(|node| MetricValue(node.to_value()))
    }

    /// A unit member. Not typed by field: the bottom-up inference must have
    /// recognised the node (or every list item) as a CV parameter.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Shape`] for anything else.
    pub fn unit(&self, key: &str) -> Result<Option<Unit>, ResolveError> {
        let is_term = |node: &Node| node.kind() == Some(EntityKind::CvParameter);
        match self.get(key) {
            None => Ok(None),
            Some(node) if is_term(node) => {
                Ok(Some(Unit::Term(Box::new(CvParameter::resolve(node)?))))
            }
            Some(Node::Array(items)) if items.iter().all(is_term) => items
                .iter()
                .map(CvParameter::resolve)
                .collect::<Result<Vec<_>, _>>()
                .map(|terms| Some(Unit::Terms(terms))),
            Some(_) => Err(self.mismatch(key, "a CV term or a list of CV terms")),
        }
    }
}

impl Structural for ControlledVocabulary {
    const KIND: EntityKind = EntityKind::ControlledVocabulary;
    const FIELDS: &'static [&'static str] = &["name", "uri", "version"];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            name: fields.string("name")?,
            uri: fields.string("uri")?,
            version: fields.string("version")?,
        })
    }
}

impl Structural for CvParameter {
    const KIND: EntityKind = EntityKind::CvParameter;
    const FIELDS: &'static [&'static str] = &["accession", "name", "description", "value", "unit"];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            accession: fields.string("accession")?,
            name: fields.string("name")?,
            description: fields.string("description")?,
            value: fields.value("value"),
            unit: fields.unit("unit")?,
        })
    }
}

impl Structural for AnalysisSoftware {
    const KIND: EntityKind = EntityKind::AnalysisSoftware;
    const FIELDS: &'static [&'static str] = &[
        "accession",
        "name",
        "description",
        "value",
        "unit",
        "version",
        "uri",
    ];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            term: CvParameter::from_fields(fields)?,
            version: fields.string("version")?,
            uri: fields.string("uri")?,
        })
    }
}

impl Structural for QualityMetric {
    const KIND: EntityKind = EntityKind::QualityMetric;
    const FIELDS: &'static [&'static str] = CvParameter::FIELDS;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError> {
        CvParameter::from_fields(fields).map(Self::new)
    }
}

impl Structural for InputFile {
    const KIND: EntityKind = EntityKind::InputFile;
    const FIELDS: &'static [&'static str] = &["location", "name", "fileFormat", "fileProperties"];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            location: fields.string("location")?,
            name: fields.string("name")?,
            file_format: fields.entity::<CvParameter>("fileFormat")?,
            file_properties: fields.list::<CvParameter>("fileProperties")?,
        })
    }
}

impl Structural for MetadataParameters {
    const KIND: EntityKind = EntityKind::MetadataParameters;
    const FIELDS: &'static [&'static str] = &["label", "inputFiles", "analysisSoftware"];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            label: fields.string("label")?,
            input_files: fields.list::<InputFile>("inputFiles")?,
            analysis_software: fields.list::<AnalysisSoftware>("analysisSoftware")?,
        })
    }
}

impl Structural for BaseQuality {
    const KIND: EntityKind = EntityKind::BaseQuality;
    const FIELDS: &'static [&'static str] = &["metadata", "qualityMetrics"];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            metadata: fields.entity::<MetadataParameters>("metadata")?,
            quality_metrics: fields.list::<QualityMetric>("qualityMetrics")?,
        })
    }
}

impl Structural for File {
    const KIND: EntityKind = EntityKind::File;
    const FIELDS: &'static [&'static str] = &[
        "creationDate",
        "version",
        "contactName",
        "contactAddress",
        "description",
        "runQualities",
        "setQualities",
        "controlledVocabularies",
    ];

    fn from_fields(fields: &Fields<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            creation_date: fields.timestamp("creationDate", timestamp::now)?,
            version: fields.string_or("version", FORMAT_VERSION)?,
            contact_name: fields.string("contactName")?,
            contact_address: fields.string("contactAddress")?,
            description: fields.string("description")?,
            run_qualities: fields.list::<BaseQuality>("runQualities")?,
            set_qualities: fields.list::<BaseQuality>("setQualities")?,
            controlled_vocabularies: fields.list::<ControlledVocabulary>("controlledVocabularies")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::SchemaTable;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn infer(value: serde_json::Value) -> Node {
        Node::infer(value, &SchemaTable::standard()).unwrap()
    }

    #[test]
    fn absent_fields_take_defaults() {
        let software = AnalysisSoftware::resolve(&infer(json!({"accession": "MS:1003162"}))).unwrap();
        assert_eq!(software.term.accession, "MS:1003162");
        assert!(software.version.is_empty());
        assert!(software.term.value.is_none());
    }

    #[test]
    fn undeclared_key_is_a_shape_mismatch() {
        let node = infer(json!({"accession": "MS:1003162", "name": "x", "version": "1", "uri": "u"}));
        assert!(matches!(
            CvParameter::resolve(&node),
            Err(ResolveError::Shape(message)) if message.contains("version")
        ));
    }

    #[test]
    fn wrong_member_type_is_a_shape_mismatch() {
        let node = infer(json!({"accession": 7, "name": "x"}));
        assert!(matches!(CvParameter::resolve(&node), Err(ResolveError::Shape(_))));
    }

    #[test]
    fn unit_accepts_single_term_and_term_lists() {
        let single = CvParameter::resolve(&infer(json!({
            "accession": "MS:4000053", "name": "d", "value": 1,
            "unit": {"accession": "UO:0000010", "name": "second"}
        })))
        .unwrap();
        assert_eq!(single.unit_terms().len(), 1);

        let list = CvParameter::resolve(&infer(json!({
            "accession": "MS:4000053", "name": "d", "value": 1,
            "unit": [{"accession": "UO:0000010", "name": "second"}, {"accession": "UO:0000031", "name": "minute"}]
        })))
        .unwrap();
        assert_eq!(list.unit_terms().len(), 2);
    }

    #[test]
    fn unit_that_is_not_a_term_is_rejected() {
        let node = infer(json!({"accession": "MS:4000053", "name": "d", "unit": "seconds"}));
        assert!(matches!(CvParameter::resolve(&node), Err(ResolveError::Shape(_))));
    }

    #[test]
    fn null_members_count_as_absent() {
        let param = CvParameter::resolve(&infer(json!({
            "accession": "MS:4000053", "name": "d", "value": null, "description": null
        })))
        .unwrap();
        assert_eq!(param, CvParameter::new("MS:4000053", "d"));
    }
}
