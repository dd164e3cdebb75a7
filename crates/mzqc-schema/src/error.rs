use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no schema registered as '{0}'")]
    NotFound(String),

    /// Every violation of `schema`, in validator order.
    #[error("instance violates the '{schema}' schema: {}", errors.join("; "))]
    ValidationFailed { schema: String, errors: Vec<String> },

    #[error("schema does not compile: {0}")]
    Compilation(String),
}
