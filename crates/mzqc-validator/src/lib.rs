//! # mzqc-validator
//!
//! One-call validation of mzQC text: decoding, removal of untrusted
//! vocabularies, semantic validation and schema validation, reported together.
//!
//! ```no_run
//! use mzqc_config::MzqcConfig;
//! use mzqc_semantic::MemoryGateway;
//! use mzqc_validator::Validator;
//!
//! let mut validator = Validator::new(MemoryGateway::new(), MzqcConfig::load()?);
//! let report = validator.validate_text(r#"{"mzQC": {}}"#)?;
//! println!("{}", report.to_json()?);
//! # Ok::<(), mzqc_validator::ValidatorError>(())
//! ```

mod error;
mod report;
mod validator;

pub use error::ValidatorError;
pub use report::{Findings, UNDETECTABLE, ValidationReport};
pub use validator::{Validator, documentation};
