//! Semantic validation error types.

use thiserror::Error;

/// Abort signal raised once the issue total passes the configured maximum.
///
/// The accumulator that raised it keeps every issue added so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("maximum number of errors incurred ({max_errors} < {total})")]
pub struct ThresholdExceeded {
    pub max_errors: usize,
    pub total: usize,
}

/// Failure of an ontology gateway to provide a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The ontology could not be fetched or read.
    #[error("could not retrieve {uri}: {reason}")]
    Retrieve { uri: String, reason: String },

    /// The ontology was retrieved but could not be parsed.
    #[error("could not parse {uri}: {reason}")]
    Parse { uri: String, reason: String },
}
