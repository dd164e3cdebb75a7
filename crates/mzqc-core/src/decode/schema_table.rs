//! Field-name-set registry used for bottom-up variant inference.

use std::collections::BTreeSet;

use super::EntityKind;
use super::resolve::Structural;
use crate::entities::{
    AnalysisSoftware, BaseQuality, ControlledVocabulary, CvParameter, File, InputFile,
    MetadataParameters, QualityMetric,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Shape {
    kind: EntityKind,
    fields: BTreeSet<&'static str>,
}

/// Maps the full field-name set of every known entity to its variant.
///
/// Built once and handed to the [`Decoder`](super::Decoder). Registration
/// order matters: a field-name set already present keeps its earlier variant,
/// and among equally scoring candidates the earlier registration wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaTable {
    shapes: Vec<Shape>,
}

impl SchemaTable {
    /// A table with no registered shapes.
    #[must_use]
    pub const fn empty() -> Self {
        Self { shapes: Vec::new() }
    }

    /// The table of every mzQC entity, generic shapes first.
    ///
    /// `QualityMetric` shares its field set with `CvParameter` and is
    /// therefore only reachable through rectification.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register::<ControlledVocabulary>();
        table.register::<CvParameter>();
        table.register::<AnalysisSoftware>();
        table.register::<InputFile>();
        table.register::<MetadataParameters>();
        table.register::<QualityMetric>();
        table.register::<BaseQuality>();
        table.register::<File>();
        table
    }

    /// Register the shape of `T`. Returns `false` if its field set was
    /// already claimed by another variant.
    pub fn register<T: Structural>(&mut self) -> bool {
        self.register_shape(T::KIND, T::FIELDS)
    }

    /// Register a field-name set for `kind`.
    pub fn register_shape(&mut self, kind: EntityKind, fields: &[&'static str]) -> bool {
        let fields: BTreeSet<&'static str> = fields.iter().copied().collect();
        if let Some(existing) = self.shapes.iter().find(|shape| shape.fields == fields) {
            tracing::debug!(
                %kind,
                existing = %existing.kind,
                "field set already registered; keeping the earlier variant"
            );
            return false;
        }
        self.shapes.push(Shape { kind, fields });
        true
    }

    /// Infer the variant for an object with the given keys.
    ///
    /// Only shapes whose field set is a superset of `keys` are candidates;
    /// the candidate with the strictly highest overlap wins. An empty key set
    /// never matches.
    #[must_use]
    pub fn infer<'k, I>(&self, keys: I) -> Option<EntityKind>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let keys: BTreeSet<&str> = keys.into_iter().collect();
        let mut best: Option<EntityKind> = None;
        let mut best_score = 0usize;
        for shape in &self.shapes {
            if !keys.iter().all(|key| shape.fields.contains(*key)) {
                continue;
            }
            let score = keys
                .iter()
                .filter(|key| shape.fields.contains(**key))
                .count();
            if score > best_score {
                best = Some(shape.kind);
                best_score = score;
            }
        }
        best
    }

    /// Registered variants in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.shapes.iter().map(|shape| shape.kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn metric_shape_collapses_into_cv_parameter() {
        let table = SchemaTable::standard();
        assert_eq!(table.len(), 7);
        assert!(!table.kinds().any(|k| k == EntityKind::QualityMetric));
    }

    #[rstest]
    #[case(&["accession", "name", "value"], Some(EntityKind::CvParameter))]
    #[case(&["accession", "name", "version", "uri"], Some(EntityKind::AnalysisSoftware))]
    #[case(&["name", "uri"], Some(EntityKind::ControlledVocabulary))]
    #[case(&["location", "name", "fileFormat"], Some(EntityKind::InputFile))]
    #[case(&["label", "inputFiles", "analysisSoftware"], Some(EntityKind::MetadataParameters))]
    #[case(&["metadata", "qualityMetrics"], Some(EntityKind::BaseQuality))]
    #[case(&["creationDate", "version", "controlledVocabularies"], Some(EntityKind::File))]
    #[case(&["accession", "columns"], None)]
    #[case(&[], None)]
    fn infers_first_superset(#[case] keys: &[&str], #[case] expected: Option<EntityKind>) {
        let table = SchemaTable::standard();
        assert_eq!(table.infer(keys.iter().copied()), expected);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut table = SchemaTable::empty();
        assert!(table.register::<CvParameter>());
        assert!(!table.register::<QualityMetric>());
        assert_eq!(table.len(), 1);
    }
}
