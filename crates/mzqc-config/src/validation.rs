//! Semantic validation run settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Abort threshold on the total number of issues; `0` means unlimited.
    #[serde(default)]
    pub max_errors: usize,

    /// Resolve ontology URIs to local files instead of fetching them.
    #[serde(default)]
    pub load_local: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unlimited_and_remote() {
        let config = ValidationConfig::default();
        assert_eq!(config.max_errors, 0);
        assert!(!config.load_local);
    }
}
