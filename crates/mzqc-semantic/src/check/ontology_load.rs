//! Loading the file's controlled vocabularies through the gateway.

use mzqc_core::File;

use crate::accumulator::IssueAccumulator;
use crate::error::ThresholdExceeded;
use crate::issues::IssueKind;
use crate::ontology::{OntologyGateway, Vocabularies};

pub const KINDS: &[IssueKind] = &[IssueKind::OntologyLoadFailure];

/// Load every vocabulary; each failure becomes one issue and loading
/// continues with the next vocabulary.
///
/// # Errors
///
/// Propagates [`ThresholdExceeded`] from the accumulator.
pub fn load(
    file: &File,
    gateway: &dyn OntologyGateway,
    load_local: bool,
    issues: &mut IssueAccumulator,
    document_mode: bool,
) -> Result<Vocabularies, ThresholdExceeded> {
    let mut vocabularies = Vocabularies::new();
    if document_mode {
        super::document(KINDS, issues)?;
        return Ok(vocabularies);
    }
    for cv in &file.controlled_vocabularies {
        match gateway.load(&cv.uri, load_local) {
            Ok(ontology) => {
                tracing::debug!(name = %cv.name, uri = %cv.uri, "ontology loaded");
                vocabularies.insert(cv.name.clone(), ontology);
            }
            Err(error) => {
                tracing::warn!(name = %cv.name, uri = %cv.uri, %error, "ontology load failed");
                issues.add(IssueKind::OntologyLoadFailure.issue(format!(
                    "Error loading the following ontology referenced in file: {} ({error})",
                    cv.name
                )))?;
            }
        }
    }
    Ok(vocabularies)
}
