//! Central schema registry for all mzQC entities.
//!
//! The `SchemaRegistry` builds JSON Schemas from mzqc-core types at
//! construction time using [`schemars::schema_for!`] and validates with
//! `jsonschema`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use mzqc_core::entities::{
    AnalysisSoftware, BaseQuality, ControlledVocabulary, CvParameter, File, InputFile,
    MetadataParameters, MzqcDocument, QualityMetric,
};
use schemars::schema_for;
use serde_json::Value;

use crate::error::SchemaError;
use crate::tighten::tighten;

/// Name of the complete-document schema.
pub const DOCUMENT: &str = "document";

const NOT_JSON: &str = "Given text is not a JSON document.";

/// Result of checking a document against the document schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOutcome {
    Success,
    /// First line of the first violation, followed by its bracketed instance
    /// path, e.g. `"x" is not of type "integer" @ [mzQC][version]`.
    Violation(String),
    NotJson,
}

impl SchemaOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The report string.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Violation(message) => message,
            Self::NotJson => NOT_JSON,
        }
    }
}

impl fmt::Display for SchemaOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Central store of all JSON Schemas for mzQC entities.
///
/// The document schema is compiled once, when the registry is built or the
/// schema is replaced; a compilation failure is reported by
/// [`check_document`](Self::check_document).
#[derive(Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Value>,
    document: Result<Arc<jsonschema::Validator>, String>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a registry containing the document schema and every entity
    /// schema. Only the document schema is tightened.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        let mut document = schema_for!(MzqcDocument).to_value();
        tighten(&mut document);
        schemas.insert(DOCUMENT, document);

        register!(schemas, "file", File);
        register!(schemas, "controlled_vocabulary", ControlledVocabulary);
        register!(schemas, "cv_parameter", CvParameter);
        register!(schemas, "analysis_software", AnalysisSoftware);
        register!(schemas, "quality_metric", QualityMetric);
        register!(schemas, "input_file", InputFile);
        register!(schemas, "metadata_parameters", MetadataParameters);
        register!(schemas, "base_quality", BaseQuality);

        let document = compile(&schemas[DOCUMENT]);
        Self { schemas, document }
    }

    /// Replace the document schema, e.g. with the published mzQC schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compilation`] if `schema` is not a valid JSON
    /// Schema.
    pub fn with_document_schema(mut self, schema: Value) -> Result<Self, SchemaError> {
        let validator = compile(&schema).map_err(SchemaError::Compilation)?;
        self.document = Ok(validator);
        self.schemas.insert(DOCUMENT, schema);
        Ok(self)
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let validator = self.validator(name)?;
        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema: name.to_string(),
                errors,
            })
        }
    }

    /// Check JSON text against the document schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compilation`] if the document schema does not
    /// compile.
    pub fn check_document(&self, text: &str) -> Result<SchemaOutcome, SchemaError> {
        let Ok(instance) = serde_json::from_str::<Value>(text) else {
            return Ok(SchemaOutcome::NotJson);
        };
        let validator = self.document.as_ref().map_err(|e| SchemaError::Compilation(e.clone()))?;
        let outcome = validator.iter_errors(&instance).next().map_or(
            SchemaOutcome::Success,
            |error| {
                let message = error.to_string();
                let first_line = message.lines().next().unwrap_or_default();
                let path = bracketed(&error.instance_path.to_string());
                SchemaOutcome::Violation(format!("{first_line} @ {path}"))
            },
        );
        if let SchemaOutcome::Violation(message) = &outcome {
            tracing::debug!(%message, "document failed schema validation");
        }
        Ok(outcome)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    fn validator(&self, name: &str) -> Result<jsonschema::Validator, SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;
        jsonschema::validator_for(schema).map_err(|e| SchemaError::Compilation(format!("{e}")))
    }
}

fn compile(schema: &Value) -> Result<Arc<jsonschema::Validator>, String> {
    jsonschema::validator_for(schema)
        .map(Arc::new)
        .map_err(|e| format!("{e}"))
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("schemas", &self.list())
            .field("document_compiled", &self.document.is_ok())
            .finish()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// `/mzQC/runQualities/0` -> `[mzQC][runQualities][0]`.
fn bracketed(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| format!("[{}]", segment.replace("~1", "/").replace("~0", "~")))
        .collect()
}
