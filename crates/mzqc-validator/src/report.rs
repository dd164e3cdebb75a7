//! The response object of a validation run.

use std::collections::BTreeMap;

use mzqc_semantic::Category;
use serde::Serialize;
use serde_json::Value;

use crate::error::ValidatorError;

pub const UNDETECTABLE: &str = "No mzQC structure detectable.";

/// Outcome of [`Validator::validate_text`](crate::Validator::validate_text).
///
/// Semantic and schema results are independent: both are present whenever
/// the input decoded into a file, whatever either of them found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationReport {
    /// The input did not decode into an mzQC file; nothing was checked.
    Undetectable { general: &'static str },
    Checked(Findings),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Findings {
    /// Exported semantic issues, keyed by category name at the top level of
    /// the response; a truncated run adds its `general` message here.
    #[serde(flatten)]
    pub semantic: BTreeMap<Category, Vec<String>>,

    /// Vocabularies dropped for an untrusted URI.
    #[serde(rename = "ontology validation", skip_serializing_if = "Vec::is_empty")]
    pub ontology: Vec<String>,

    /// `"success"` or the first schema violation.
    #[serde(rename = "schema validation")]
    pub schema: String,
}

impl ValidationReport {
    #[must_use]
    pub const fn undetectable() -> Self {
        Self::Undetectable {
            general: UNDETECTABLE,
        }
    }

    #[must_use]
    pub const fn findings(&self) -> Option<&Findings> {
        match self {
            Self::Undetectable { .. } => None,
            Self::Checked(findings) => Some(findings),
        }
    }

    /// A decoded file with no semantic issue, no dropped vocabulary and a
    /// passing schema check.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings().is_some_and(|findings| {
            findings.ontology.is_empty()
                && findings.schema == "success"
                && findings.semantic.values().all(Vec::is_empty)
        })
    }

    /// # Errors
    ///
    /// Returns [`ValidatorError::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<Value, ValidatorError> {
        Ok(serde_json::to_value(self)?)
    }
}
