//! # mzqc-config
//!
//! Layered configuration loading for the mzQC toolkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MZQC_*` prefix, `__` as separator)
//! 2. Project-level `.mzqc/config.toml`
//! 3. User-level `~/.config/mzqc/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MZQC_VALIDATION__MAX_ERRORS` -> `validation.max_errors`,
//! `MZQC_ONTOLOGY__TABLE_ROOT` -> `ontology.table_root`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use mzqc_config::MzqcConfig;
//!
//! let config = MzqcConfig::load_with_dotenv().expect("config");
//! if config.validation.max_errors > 0 {
//!     println!("aborting after {} issues", config.validation.max_errors);
//! }
//! ```

mod error;
mod ontology;
mod validation;

pub use error::ConfigError;
pub use ontology::OntologyConfig;
pub use validation::ValidationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MzqcConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub ontology: OntologyConfig,
}

impl MzqcConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`MzqcConfig::load_with_dotenv`] for `.env`
    /// file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or the ontology
    /// section is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`MzqcConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary provider chain.
    ///
    /// # Errors
    ///
    /// See [`MzqcConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.ontology.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".mzqc/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("MZQC_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mzqc").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = MzqcConfig::default();
        assert_eq!(config.validation.max_errors, 0);
        assert_eq!(config.ontology.metric_root, "MS:4000002");
    }

    #[test]
    fn figment_builds_without_files() {
        let config = MzqcConfig::from_figment(&Figment::from(Serialized::defaults(
            MzqcConfig::default(),
        )))
        .expect("should extract defaults");
        assert_eq!(config, MzqcConfig::default());
    }
}
