//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use mzqc_config::{ConfigError, MzqcConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[validation]
max_errors = 25
load_local = true

[ontology]
table_root = "MS:4000099"
id_file_extensions = [".mzid"]
"#,
        )?;

        let config: MzqcConfig = Figment::from(Serialized::defaults(MzqcConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.validation.max_errors, 25);
        assert!(config.validation.load_local);
        assert_eq!(config.ontology.table_root, "MS:4000099");
        assert_eq!(config.ontology.id_file_extensions, vec![".mzid".to_string()]);
        assert_eq!(config.ontology.metric_root, "MS:4000002");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".mzqc")?;
        jail.create_file(".mzqc/config.toml", "[validation]\nmax_errors = 3\n")?;

        let config = MzqcConfig::load().expect("config loads");
        assert_eq!(config.validation.max_errors, 3);
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[validation]\nmax_errors = 3\n")?;
        jail.set_env("MZQC_VALIDATION__MAX_ERRORS", "7");
        jail.set_env("MZQC_ONTOLOGY__METRIC_ROOT", "MS:4000001");

        let config: MzqcConfig = Figment::from(Serialized::defaults(MzqcConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("MZQC_").split("__"))
            .extract()?;

        assert_eq!(config.validation.max_errors, 7);
        assert_eq!(config.ontology.metric_root, "MS:4000001");
        Ok(())
    });
}

#[test]
fn empty_anchor_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".mzqc")?;
        jail.create_file(".mzqc/config.toml", "[ontology]\nmetric_root = \"\"\n")?;

        let err = MzqcConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "ontology.metric_root"));
        Ok(())
    });
}
