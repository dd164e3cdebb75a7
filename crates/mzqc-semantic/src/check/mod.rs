//! The individual semantic checks.
//!
//! Each check writes into its own category and, in document mode, ignores the
//! file and emits one placeholder issue per kind listed in its `KINDS`. The
//! real path raises only kinds from the same list.

pub mod input_files;
pub mod labels;
pub mod metrics;
pub mod ontology_load;
pub mod terms;

use mzqc_core::{BaseQuality, QualityRole};

use crate::accumulator::IssueAccumulator;
use crate::error::ThresholdExceeded;
use crate::issues::IssueKind;

fn document(kinds: &[IssueKind], issues: &mut IssueAccumulator) -> Result<(), ThresholdExceeded> {
    for kind in kinds {
        issues.add(kind.placeholder())?;
    }
    Ok(())
}

/// The label of a quality entry, or its role when unlabelled.
fn describe(role: QualityRole, quality: &BaseQuality) -> &str {
    if quality.metadata.label.is_empty() {
        role.as_str()
    } else {
        &quality.metadata.label
    }
}
