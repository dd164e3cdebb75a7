use schemars::JsonSchema;
use serde::Serialize;

/// Reference to an ontology the document's CV terms are drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ControlledVocabulary {
    /// Unique key within the file.
    pub name: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl ControlledVocabulary {
    #[must_use]
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            version: String::new(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Whether the URI starts with any of the given prefixes.
    #[must_use]
    pub fn has_uri_prefix<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        prefixes
            .iter()
            .any(|prefix| self.uri.starts_with(prefix.as_ref()))
    }
}
