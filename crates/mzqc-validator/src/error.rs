use mzqc_config::ConfigError;
use mzqc_core::EncodeError;
use mzqc_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("re-encoding for schema validation failed: {0}")]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("report serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}
