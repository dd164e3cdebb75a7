//! Decode and encode error types.
//!
//! Structural mismatches are deliberately absent here: a JSON object that does
//! not resolve into an entity is returned as an untyped fallback, never as an
//! error. Only malformed input aborts a decode.

use thiserror::Error;

/// Fatal errors raised while decoding an mzQC document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input text is not JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A timestamp field holds a string that is not an accepted ISO-8601 form.
    #[error(
        "the {field} of the file is not an ISO-8601 timestamp including time to the second: {value}"
    )]
    Timestamp { field: String, value: String },
}

/// Errors raised while encoding the object graph.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Serialisation of an entity failed.
    #[error("serialisation failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing into the output buffer failed.
    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    /// The serialiser produced bytes that are not UTF-8.
    #[error("encoded output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
