use schemars::JsonSchema;
use serde::Serialize;

use super::cv_param::QualityMetric;
use super::input_file::MetadataParameters;

/// Metrics for one run or one set of runs, with their provenance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseQuality {
    pub metadata: MetadataParameters,
    pub quality_metrics: Vec<QualityMetric>,
}

impl BaseQuality {
    #[must_use]
    pub const fn new(metadata: MetadataParameters, quality_metrics: Vec<QualityMetric>) -> Self {
        Self {
            metadata,
            quality_metrics,
        }
    }
}

/// A quality entry in the file's `runQualities` list.
pub type RunQuality = BaseQuality;

/// A quality entry in the file's `setQualities` list.
pub type SetQuality = BaseQuality;

/// Which list of the file a quality entry occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityRole {
    Run,
    Set,
}

impl QualityRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => "runQuality",
            Self::Set => "setQuality",
        }
    }
}
