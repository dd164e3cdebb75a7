use mzqc_config::MzqcConfig;
use mzqc_core::encode::{self, Readability};
use mzqc_core::{Decoder, File};
use mzqc_schema::SchemaRegistry;
use mzqc_semantic::{OntologyGateway, SemanticCheck, ValidationOptions, document_collected_issues};

use crate::error::ValidatorError;
use crate::report::{Findings, ValidationReport};

const SEMANTIC_PREAMBLE: &str = "Semantic findings are reported under one key per check \
category, each holding the issues found on the decoded mzQC file. A 'general' key carries \
run-level messages. The issues are the following:";

const SCHEMA_PREAMBLE: &str = "The value to the 'schema validation' key is the result of the \
JSON Schema validation of the re-encoded file: 'success', or the first violation followed by \
its location in the document.";

const ONTOLOGY_PREAMBLE: &str = "The value to the 'ontology validation' key, when present, lists \
the controlled vocabularies ignored because their URI is not trusted.";

/// Decode, filter, and run semantic and schema validation over mzQC text.
pub struct Validator<G> {
    config: MzqcConfig,
    decoder: Decoder,
    schemas: SchemaRegistry,
    semantic: SemanticCheck<G>,
}

impl<G: OntologyGateway> Validator<G> {
    #[must_use]
    pub fn new(gateway: G, config: MzqcConfig) -> Self {
        let semantic = SemanticCheck::new(gateway, config.ontology.clone());
        Self {
            config,
            decoder: Decoder::new(),
            schemas: SchemaRegistry::new(),
            semantic,
        }
    }

    /// Check documents against `schemas` instead of the generated ones.
    #[must_use]
    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &MzqcConfig {
        &self.config
    }

    /// Validate JSON text. Input that is not JSON or does not decode into a
    /// file yields [`ValidationReport::undetectable`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError`] if the file cannot be re-encoded or the
    /// document schema does not compile; findings about the document itself
    /// are never errors.
    pub fn validate_text(&mut self, text: &str) -> Result<ValidationReport, ValidatorError> {
        let decoded = match self.decoder.decode(text) {
            Ok(decoded) => decoded,
            Err(error) => {
                tracing::debug!(%error, "input did not decode");
                return Ok(ValidationReport::undetectable());
            }
        };
        let kind = decoded.kind();
        match decoded.into_file() {
            Some(file) => self.validate_file(file),
            None => {
                tracing::debug!(?kind, "decoded input is not an mzQC file");
                Ok(ValidationReport::undetectable())
            }
        }
    }

    /// Validate a decoded file; vocabularies with untrusted URIs are removed
    /// before the semantic checks and the schema check.
    ///
    /// # Errors
    ///
    /// See [`Validator::validate_text`].
    pub fn validate_file(&mut self, mut file: File) -> Result<ValidationReport, ValidatorError> {
        let trusted = &self.config.ontology.trusted_uri_prefixes;
        let ontology: Vec<String> = file
            .retain_vocabularies(|cv| cv.has_uri_prefix(trusted.as_slice()))
            .into_iter()
            .map(|cv| {
                tracing::warn!(name = %cv.name, uri = %cv.uri, "untrusted vocabulary removed");
                format!("invalid ontology URI for {}", cv.name)
            })
            .collect();

        let options = ValidationOptions::from(&self.config.validation);
        if let Err(error) = self.semantic.validate(&file, &options) {
            tracing::info!(%error, "semantic validation aborted");
        }
        let semantic = self.semantic.issues().export();

        let encoded = encode::to_string(&file, Readability::Compact, true)?;
        let schema = self.schemas.check_document(&encoded)?.message().to_string();

        Ok(ValidationReport::Checked(Findings {
            semantic,
            ontology,
            schema,
        }))
    }
}

/// Human-readable description of the report, listing every semantic issue
/// the validator can raise.
#[must_use]
pub fn documentation() -> String {
    let mut lines = vec![SEMANTIC_PREAMBLE.to_string()];
    for (category, issues) in document_collected_issues().export() {
        lines.push(format!("* '{category}':"));
        lines.extend(issues.into_iter().map(|issue| format!("    {issue}")));
    }
    lines.extend([
        String::new(),
        ONTOLOGY_PREAMBLE.to_string(),
        String::new(),
        SCHEMA_PREAMBLE.to_string(),
    ]);
    lines.join("\n")
}
