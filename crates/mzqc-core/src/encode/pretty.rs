//! Structured pretty-printer for metric tables.
//!
//! Every entity lays itself out as a [`Doc`] tree starting from its canonical
//! serde form, replacing entity-valued fields with its children's layouts. The
//! value slot of a CV parameter is the only place where layout differs from a
//! plain indented dump: table columns go one per line with their arrays
//! inline, vectors and matrices stay on one line.

use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;

use crate::entities::{
    AnalysisSoftware, BaseQuality, ControlledVocabulary, CvParameter, File, InputFile,
    MetadataParameters, MetricValue, MzqcDocument, QualityMetric,
};
use crate::errors::EncodeError;

const INDENT: usize = 2;

/// A layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Doc {
    /// Nested values broken over lines.
    Plain(Value),
    /// Written on a single line whatever its depth.
    Inline(Value),
    List(Vec<Doc>),
    Object(Vec<(String, Doc)>),
}

impl Doc {
    /// Render with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if a scalar cannot be serialised.
    pub fn render(&self) -> Result<String, EncodeError> {
        let mut out = String::new();
        self.write(&mut out, 0)?;
        Ok(out)
    }

    fn write(&self, out: &mut String, depth: usize) -> Result<(), EncodeError> {
        match self {
            Self::Inline(value) => out.push_str(&serde_json::to_string(value)?),
            Self::Plain(Value::Array(items)) if !items.is_empty() => {
                let items = items.iter().cloned().map(Self::Plain).collect();
                Self::List(items).write(out, depth)?;
            }
            Self::Plain(Value::Object(map)) if !map.is_empty() => {
                let members = map
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::Plain(value.clone())))
                    .collect();
                Self::Object(members).write(out, depth)?;
            }
            Self::Plain(value) => out.push_str(&serde_json::to_string(value)?),
            Self::List(items) if items.is_empty() => out.push_str("[]"),
            Self::List(items) => {
                out.push('[');
                for (index, item) in items.iter().enumerate() {
                    separate(out, index, depth + 1)?;
                    item.write(out, depth + 1)?;
                }
                close(out, depth, ']')?;
            }
            Self::Object(members) if members.is_empty() => out.push_str("{}"),
            Self::Object(members) => {
                out.push('{');
                for (index, (key, member)) in members.iter().enumerate() {
                    separate(out, index, depth + 1)?;
                    write!(out, "{}: ", serde_json::to_string(key)?)?;
                    member.write(out, depth + 1)?;
                }
                close(out, depth, '}')?;
            }
        }
        Ok(())
    }
}

fn separate(out: &mut String, index: usize, depth: usize) -> Result<(), EncodeError> {
    if index > 0 {
        out.push(',');
    }
    write!(out, "\n{:width$}", "", width = depth * INDENT)?;
    Ok(())
}

fn close(out: &mut String, depth: usize, bracket: char) -> Result<(), EncodeError> {
    write!(out, "\n{:width$}{bracket}", "", width = depth * INDENT)?;
    Ok(())
}

/// Entities that know how their fields are laid out.
pub trait Layout {
    /// # Errors
    ///
    /// Returns [`EncodeError`] if serialisation fails.
    fn layout(&self) -> Result<Doc, EncodeError>;
}

/// The canonical serde form of `entity` with `overrides` substituted for the
/// named members. Overrides for members omitted by serde are dropped.
fn object_with<T: Serialize>(
    entity: &T,
    mut overrides: Vec<(&str, Doc)>,
) -> Result<Doc, EncodeError> {
    let Value::Object(map) = serde_json::to_value(entity)? else {
        return Ok(Doc::Plain(serde_json::to_value(entity)?));
    };
    Ok(Doc::Object(
        map.into_iter()
            .map(|(key, value)| {
                let doc = overrides
                    .iter()
                    .position(|(name, _)| *name == key)
                    .map_or(Doc::Plain(value), |at| overrides.swap_remove(at).1);
                (key, doc)
            })
            .collect(),
    ))
}

fn list<T: Layout>(items: &[T]) -> Result<Doc, EncodeError> {
    items
        .iter()
        .map(Layout::layout)
        .collect::<Result<Vec<_>, _>>()
        .map(Doc::List)
}

fn metric_value(value: &MetricValue) -> Doc {
    match value.as_json() {
        Value::Object(columns) => Doc::Object(
            columns
                .iter()
                .map(|(name, column)| (name.clone(), Doc::Inline(column.clone())))
                .collect(),
        ),
        array @ Value::Array(_) => Doc::Inline(array.clone()),
        scalar => Doc::Plain(scalar.clone()),
    }
}

fn parameter_overrides(term: &CvParameter) -> Vec<(&'static str, Doc)> {
    term.value
        .as_ref()
        .map(|value| ("value", metric_value(value)))
        .into_iter()
        .collect()
}

impl Layout for CvParameter {
    fn layout(&self) -> Result<Doc, EncodeError> {
        object_with(self, parameter_overrides(self))
    }
}

impl Layout for QualityMetric {
    fn layout(&self) -> Result<Doc, EncodeError> {
        self.term.layout()
    }
}

impl Layout for AnalysisSoftware {
    fn layout(&self) -> Result<Doc, EncodeError> {
        object_with(self, parameter_overrides(&self.term))
    }
}

impl Layout for ControlledVocabulary {
    fn layout(&self) -> Result<Doc, EncodeError> {
        Ok(Doc::Plain(serde_json::to_value(self)?))
    }
}

impl Layout for InputFile {
    fn layout(&self) -> Result<Doc, EncodeError> {
        object_with(
            self,
            vec![
                ("fileFormat", self.file_format.layout()?),
                ("fileProperties", list(&self.file_properties)?),
            ],
        )
    }
}

impl Layout for MetadataParameters {
    fn layout(&self) -> Result<Doc, EncodeError> {
        object_with(
            self,
            vec![
                ("inputFiles", list(&self.input_files)?),
                ("analysisSoftware", list(&self.analysis_software)?),
            ],
        )
    }
}

impl Layout for BaseQuality {
    fn layout(&self) -> Result<Doc, EncodeError> {
        object_with(
            self,
            vec![
                ("metadata", self.metadata.layout()?),
                ("qualityMetrics", list(&self.quality_metrics)?),
            ],
        )
    }
}

impl Layout for File {
    fn layout(&self) -> Result<Doc, EncodeError> {
        object_with(
            self,
            vec![
                ("runQualities", list(&self.run_qualities)?),
                ("setQualities", list(&self.set_qualities)?),
                ("controlledVocabularies", list(&self.controlled_vocabularies)?),
            ],
        )
    }
}

impl Layout for MzqcDocument {
    fn layout(&self) -> Result<Doc, EncodeError> {
        Ok(Doc::Object(vec![(
            crate::decode::ROOT_KEY.to_string(),
            self.mzqc.layout()?,
        )]))
    }
}

impl Layout for Value {
    fn layout(&self) -> Result<Doc, EncodeError> {
        Ok(Doc::Plain(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn table_columns_are_one_per_line() {
        let metric = CvParameter::new("MS:4000063", "MS2 known precursor charges fractions")
            .with_value(json!({"MS:1000041": [1, 2, 3], "UO:0000191": [0.1, 0.8, 0.1]}));
        let rendered = metric.layout().unwrap().render().unwrap();
        assert_eq!(
            rendered,
            r#"{
  "accession": "MS:4000063",
  "name": "MS2 known precursor charges fractions",
  "value": {
    "MS:1000041": [1,2,3],
    "UO:0000191": [0.1,0.8,0.1]
  }
}"#
        );
    }

    #[test]
    fn vectors_stay_inline_and_units_nest() {
        let metric = CvParameter::new("MS:4000053", "duration")
            .with_value(json!([[1, 2], [3, 4]]))
            .with_unit(CvParameter::new("UO:0000010", "second"));
        let rendered = metric.layout().unwrap().render().unwrap();
        assert_eq!(
            rendered,
            r#"{
  "accession": "MS:4000053",
  "name": "duration",
  "value": [[1,2],[3,4]],
  "unit": {
    "accession": "UO:0000010",
    "name": "second"
  }
}"#
        );
    }

    #[test]
    fn empty_containers_render_closed() {
        assert_eq!(Doc::List(Vec::new()).render().unwrap(), "[]");
        assert_eq!(Doc::Plain(json!({})).render().unwrap(), "{}");
    }
}
