use std::path::Path;

use schemars::JsonSchema;
use serde::Serialize;

use super::cv_param::{AnalysisSoftware, CvParameter};

/// A file the metrics of a run or set were computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InputFile {
    /// URI of the file.
    pub location: String,
    pub name: String,
    pub file_format: CvParameter,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_properties: Vec<CvParameter>,
}

impl InputFile {
    #[must_use]
    pub fn new(
        location: impl Into<String>,
        name: impl Into<String>,
        file_format: CvParameter,
    ) -> Self {
        Self {
            location: location.into(),
            name: name.into(),
            file_format,
            file_properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: CvParameter) -> Self {
        self.file_properties.push(property);
        self
    }

    /// The `name`, stripped of its last extension.
    #[must_use]
    pub fn name_stem(&self) -> String {
        stem(&self.name)
    }

    /// The last segment of `location`, stripped of its last extension.
    #[must_use]
    pub fn location_stem(&self) -> String {
        let basename = self
            .location
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.location);
        stem(basename)
    }
}

fn stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned())
}

/// Provenance of a run or set: its inputs and the software that processed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetadataParameters {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub input_files: Vec<InputFile>,
    pub analysis_software: Vec<AnalysisSoftware>,
}

impl MetadataParameters {
    #[must_use]
    pub fn new(input_files: Vec<InputFile>, analysis_software: Vec<AnalysisSoftware>) -> Self {
        Self {
            label: String::new(),
            input_files,
            analysis_software,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
