//! Input files must be named after their location and not repeat.

use std::collections::BTreeSet;

use mzqc_core::File;

use crate::accumulator::IssueAccumulator;
use crate::error::ThresholdExceeded;
use crate::issues::IssueKind;

pub const KINDS: &[IssueKind] = &[
    IssueKind::InconsistentFileName,
    IssueKind::DuplicateFileLocations,
    IssueKind::DuplicateFileSets,
];

/// # Errors
///
/// Propagates [`ThresholdExceeded`] from the accumulator.
pub fn check(
    file: &File,
    issues: &mut IssueAccumulator,
    document_mode: bool,
) -> Result<(), ThresholdExceeded> {
    if document_mode {
        return super::document(KINDS, issues);
    }
    let mut seen_sets: Vec<BTreeSet<&str>> = Vec::new();
    for (role, quality) in file.qualities() {
        let inputs = &quality.metadata.input_files;
        for input in inputs {
            let (name, location) = (input.name_stem(), input.location_stem());
            if name != location {
                issues.add(IssueKind::InconsistentFileName.issue(format!(
                    "Inconsistent file name and location: {name}/{location}"
                )))?;
            }
        }

        let locations: BTreeSet<&str> = inputs.iter().map(|input| input.location.as_str()).collect();
        let listed = || locations.iter().copied().collect::<Vec<_>>().join(",");
        if inputs.len() != locations.len() {
            issues.add(IssueKind::DuplicateFileLocations.issue(format!(
                "Duplicate inputFile locations within a metadata object: label = {} ; locations = {}",
                super::describe(role, quality),
                listed()
            )))?;
        }
        if locations.is_empty() {
            continue;
        }
        if seen_sets.contains(&locations) {
            issues.add(IssueKind::DuplicateFileSets.issue(format!(
                "Duplicate input file set across runs/sets: label = {} ; locations = {}",
                super::describe(role, quality),
                listed()
            )))?;
        } else {
            seen_sets.push(locations);
        }
    }
    Ok(())
}
