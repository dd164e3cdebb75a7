//! Ontology anchors and conventions used by the semantic checks.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_metric_root() -> String {
    "MS:4000002".to_string()
}

fn default_table_root() -> String {
    "MS:4000005".to_string()
}

fn default_id_metric_root() -> String {
    "MS:4000008".to_string()
}

fn default_id_file_extensions() -> Vec<String> {
    [
        ".mzid",
        ".mzid.gz",
        ".mzidentml",
        ".idxml",
        ".pepxml",
        ".pep.xml",
        ".mztab",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_has_column() -> String {
    "has_column".to_string()
}

fn default_has_optional_column() -> String {
    "has_optional_column".to_string()
}

fn default_trusted_uri_prefixes() -> Vec<String> {
    vec!["http".to_string(), "file://".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OntologyConfig {
    /// Root of the quality-metric subtree (`QC metric`).
    #[serde(default = "default_metric_root")]
    pub metric_root: String,

    /// Root of the table-valued metric subtree.
    #[serde(default = "default_table_root")]
    pub table_root: String,

    /// Root of the identification-based metric subtree.
    #[serde(default = "default_id_metric_root")]
    pub id_metric_root: String,

    /// Suffixes of identification result files, matched case-insensitively.
    #[serde(default = "default_id_file_extensions")]
    pub id_file_extensions: Vec<String>,

    /// Relationship naming the required columns of a table metric.
    #[serde(default = "default_has_column")]
    pub has_column_relationship: String,

    /// Relationship naming the optional columns of a table metric.
    #[serde(default = "default_has_optional_column")]
    pub has_optional_column_relationship: String,

    /// Vocabulary URIs must start with one of these to be loaded.
    #[serde(default = "default_trusted_uri_prefixes")]
    pub trusted_uri_prefixes: Vec<String>,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            metric_root: default_metric_root(),
            table_root: default_table_root(),
            id_metric_root: default_id_metric_root(),
            id_file_extensions: default_id_file_extensions(),
            has_column_relationship: default_has_column(),
            has_optional_column_relationship: default_has_optional_column(),
            trusted_uri_prefixes: default_trusted_uri_prefixes(),
        }
    }
}

impl OntologyConfig {
    /// Whether `file_name` ends in an identification file extension.
    #[must_use]
    pub fn is_identification_file(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.id_file_extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()))
    }

    /// Reject empty anchors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let anchors = [
            ("ontology.metric_root", &self.metric_root),
            ("ontology.table_root", &self.table_root),
            ("ontology.id_metric_root", &self.id_metric_root),
            ("ontology.has_column_relationship", &self.has_column_relationship),
            (
                "ontology.has_optional_column_relationship",
                &self.has_optional_column_relationship,
            ),
        ];
        if let Some((field, _)) = anchors.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: (*field).to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
