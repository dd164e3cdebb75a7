use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::Serialize;

use super::cv_param::{CvParameter, CvTerm, Unit};
use super::quality::{QualityRole, RunQuality, SetQuality};
use super::vocabulary::ControlledVocabulary;
use crate::entities::BaseQuality;
use crate::timestamp;

/// Current version of the mzQC format written by this crate.
pub const FORMAT_VERSION: &str = "1.0.0";

/// Root of an mzQC document.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(serialize_with = "timestamp::serialize")]
    #[schemars(with = "String")]
    pub creation_date: NaiveDateTime,
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contact_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contact_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_qualities: Vec<RunQuality>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_qualities: Vec<SetQuality>,
    pub controlled_vocabularies: Vec<ControlledVocabulary>,
}

impl Default for File {
    fn default() -> Self {
        Self {
            creation_date: timestamp::now(),
            version: FORMAT_VERSION.to_string(),
            contact_name: String::new(),
            contact_address: String::new(),
            description: String::new(),
            run_qualities: Vec::new(),
            set_qualities: Vec::new(),
            controlled_vocabularies: Vec::new(),
        }
    }
}

impl File {
    /// All run and set qualities, runs first, each tagged with its role.
    pub fn qualities(&self) -> impl Iterator<Item = (QualityRole, &BaseQuality)> {
        self.run_qualities
            .iter()
            .map(|q| (QualityRole::Run, q))
            .chain(self.set_qualities.iter().map(|q| (QualityRole::Set, q)))
    }

    /// Remove every vocabulary rejected by `keep`, returning the removed entries.
    ///
    /// This is the only mutation expected after decoding: callers drop
    /// vocabularies with untrusted URIs before validation.
    pub fn retain_vocabularies<F>(&mut self, mut keep: F) -> Vec<ControlledVocabulary>
    where
        F: FnMut(&ControlledVocabulary) -> bool,
    {
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.controlled_vocabularies)
            .into_iter()
            .partition(|cv| keep(cv));
        self.controlled_vocabularies = kept;
        removed
    }

    /// Every CV-parameter-shaped node reachable from the file, depth-first.
    ///
    /// Order per quality: input file formats and properties, analysis
    /// software, then quality metrics. Unit terms follow the term they annotate.
    #[must_use]
    pub fn cv_terms(&self) -> Vec<CvTerm<'_>> {
        let mut terms = Vec::new();
        for (_, quality) in self.qualities() {
            for input in &quality.metadata.input_files {
                push_with_units(&mut terms, CvTerm::Parameter(&input.file_format));
                for property in &input.file_properties {
                    push_with_units(&mut terms, CvTerm::Parameter(property));
                }
            }
            for software in &quality.metadata.analysis_software {
                push_with_units(&mut terms, CvTerm::Software(software));
            }
            for metric in &quality.quality_metrics {
                push_with_units(&mut terms, CvTerm::Metric(metric));
            }
        }
        terms
    }

    /// Visit every CV parameter mutably, in the order of [`File::cv_terms`].
    pub fn visit_cv_parameters_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut CvParameter),
    {
        for quality in self
            .run_qualities
            .iter_mut()
            .chain(self.set_qualities.iter_mut())
        {
            for input in &mut quality.metadata.input_files {
                visit_with_units(&mut input.file_format, &mut visit);
                for property in &mut input.file_properties {
                    visit_with_units(property, &mut visit);
                }
            }
            for software in &mut quality.metadata.analysis_software {
                visit_with_units(&mut software.term, &mut visit);
            }
            for metric in &mut quality.quality_metrics {
                visit_with_units(&mut metric.term, &mut visit);
            }
        }
    }
}

fn push_with_units<'a>(terms: &mut Vec<CvTerm<'a>>, term: CvTerm<'a>) {
    terms.push(term);
    for unit in term.base().unit_terms() {
        push_with_units(terms, CvTerm::Parameter(unit));
    }
}

fn visit_with_units<F>(param: &mut CvParameter, visit: &mut F)
where
    F: FnMut(&mut CvParameter),
{
    visit(param);
    match &mut param.unit {
        None => {}
        Some(Unit::Term(term)) => visit_with_units(term, visit),
        Some(Unit::Terms(terms)) => {
            for term in terms {
                visit_with_units(term, visit);
            }
        }
    }
}

/// The `{"mzQC": …}` envelope every document is wrapped in.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct MzqcDocument {
    #[serde(rename = "mzQC")]
    pub mzqc: File,
}

impl MzqcDocument {
    #[must_use]
    pub const fn new(mzqc: File) -> Self {
        Self { mzqc }
    }
}
