//! Every CV term must resolve to exactly one ontology entry and agree with it.

use mzqc_core::File;
use mzqc_core::entities::CvParameter;

use crate::accumulator::IssueAccumulator;
use crate::error::ThresholdExceeded;
use crate::issues::{IssueKind, SemanticIssue};
use crate::ontology::{Term, Vocabularies};

pub const KINDS: &[IssueKind] = &[
    IssueKind::UnknownTerm,
    IssueKind::AmbiguousTerm,
    IssueKind::MissingDefinition,
    IssueKind::DefinitionMismatch,
    IssueKind::NameMismatch,
];

/// # Errors
///
/// Propagates [`ThresholdExceeded`] from the accumulator.
pub fn check(
    file: &File,
    vocabularies: &Vocabularies,
    issues: &mut IssueAccumulator,
    document_mode: bool,
) -> Result<(), ThresholdExceeded> {
    if document_mode {
        return super::document(KINDS, issues);
    }
    for term in file.cv_terms() {
        let param = term.base();
        match vocabularies.lookup(&param.accession).as_slice() {
            [] => issues.add(IssueKind::UnknownTerm.issue(format!(
                "Term used not found in any ontology: accession = {} ; name = {}",
                param.accession, param.name
            )))?,
            [entry] => {
                for issue in compare(param, entry) {
                    issues.add(issue)?;
                }
            }
            entries => {
                let occurrences = entries
                    .iter()
                    .map(|entry| format!("{} '{}'", entry.id, entry.name))
                    .collect::<Vec<_>>()
                    .join(",");
                issues.add(IssueKind::AmbiguousTerm.issue(format!(
                    "Ambiguous term error: occurrences = {occurrences}"
                )))?;
            }
        }
    }
    Ok(())
}

fn compare(param: &CvParameter, entry: &Term) -> Vec<SemanticIssue> {
    let mut found = Vec::new();
    if param.description.is_empty() {
        found.push(IssueKind::MissingDefinition.issue(format!(
            "CV term used without accompanying term definition: accession = {}",
            param.accession
        )));
    } else if param.description != entry.definition {
        found.push(IssueKind::DefinitionMismatch.issue(format!(
            "CV term used with definition different from ontology: accession = {}",
            param.accession
        )));
    }
    if param.name != entry.name {
        found.push(IssueKind::NameMismatch.issue(format!(
            "CV term used with differing name from ontology: accession = {} ; name = {} ; ontology name = {}",
            param.accession, param.name, entry.name
        )));
    }
    found
}
