//! Metadata labels must be unique across runs and sets.

use std::collections::BTreeSet;

use mzqc_core::File;

use crate::accumulator::IssueAccumulator;
use crate::error::ThresholdExceeded;
use crate::issues::IssueKind;

pub const KINDS: &[IssueKind] = &[IssueKind::DuplicateLabel];

/// One issue per repeated non-empty label.
///
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
    let mut seen = BTreeSet::new();
    for (_, quality) in file.qualities() {
        let label = quality.metadata.label.as_str();
        if !label.is_empty() && !seen.insert(label) {
            issues.add(IssueKind::DuplicateLabel.issue(format!(
                "Run/SetQuality label {label} is not unique in file!"
            )))?;
        }
    }
    Ok(())
}
