//! Short overview of a decoded file.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::entities::File;
use crate::timestamp;

/// Counts describing the content of a [`File`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// Distinct metric names across all runs and sets.
    pub metric_names: usize,
    pub runs: usize,
    pub sets: usize,
    #[serde(serialize_with = "timestamp::serialize")]
    pub creation_date: NaiveDateTime,
}

impl File {
    #[must_use]
    pub fn summary(&self) -> FileSummary {
        let names: BTreeSet<&str> = self
            .qualities()
            .flat_map(|(_, quality)| quality.quality_metrics.iter())
            .map(|metric| metric.term.name.as_str())
            .collect();
        FileSummary {
            metric_names: names.len(),
            runs: self.run_qualities.len(),
            sets: self.set_qualities.len(),
            creation_date: self.creation_date,
        }
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} metric names", self.metric_names)?;
        writeln!(f, "{} runs", self.runs)?;
        writeln!(f, "{} sets", self.sets)?;
        write!(f, "created {}", timestamp::format(&self.creation_date))
    }
}
