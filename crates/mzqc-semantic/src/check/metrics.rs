//! Quality metrics must be metric terms, unique per run/set, and carry values
//! of the shape their term prescribes.

use std::collections::BTreeSet;

use mzqc_config::OntologyConfig;
use mzqc_core::entities::{BaseQuality, QualityMetric};
use mzqc_core::{File, QualityRole};
use serde_json::Value;

use crate::accumulator::IssueAccumulator;
use crate::error::ThresholdExceeded;
use crate::issues::{IssueKind, SemanticIssue};
use crate::ontology::Vocabularies;

pub const KINDS: &[IssueKind] = &[
    IssueKind::MissingIdentificationFile,
    IssueKind::DuplicateMetric,
    IssueKind::NonMetricTerm,
    IssueKind::TableWithoutTable,
    IssueKind::NonColumnValues,
    IssueKind::DifferingColumnLengths,
    IssueKind::MissingRequiredColumns,
    IssueKind::UndeclaredColumns,
    IssueKind::MetricWithoutUnit,
];

/// Subtrees of the loaded vocabularies the metric checks consult.
struct MetricTerms {
    metrics: BTreeSet<String>,
    tables: BTreeSet<String>,
    identification: BTreeSet<String>,
}

impl MetricTerms {
    fn collect(vocabularies: &Vocabularies, config: &OntologyConfig) -> Self {
        Self {
            metrics: vocabularies.subclasses_of(&config.metric_root),
            tables: vocabularies.subclasses_of(&config.table_root),
            identification: vocabularies.subclasses_of(&config.id_metric_root),
        }
    }
}

/// # Errors
///
/// Propagates [`ThresholdExceeded`] from the accumulator.
pub fn check(
    file: &File,
    vocabularies: &Vocabularies,
    config: &OntologyConfig,
    issues: &mut IssueAccumulator,
    document_mode: bool,
) -> Result<(), ThresholdExceeded> {
    if document_mode {
        return super::document(KINDS, issues);
    }
    let terms = MetricTerms::collect(vocabularies, config);
    tracing::debug!(
        metrics = terms.metrics.len(),
        tables = terms.tables.len(),
        identification = terms.identification.len(),
        "metric subtrees collected"
    );
    for (role, quality) in file.qualities() {
        check_quality(role, quality, &terms, vocabularies, config, issues)?;
    }
    Ok(())
}

fn check_quality(
    role: QualityRole,
    quality: &BaseQuality,
    terms: &MetricTerms,
    vocabularies: &Vocabularies,
    config: &OntologyConfig,
    issues: &mut IssueAccumulator,
) -> Result<(), ThresholdExceeded> {
    let id_metric = quality
        .quality_metrics
        .iter()
        .find(|metric| terms.identification.contains(metric.accession()));
    if let Some(metric) = id_metric {
        let has_id_file = quality.metadata.input_files.iter().any(|input| {
            config.is_identification_file(&input.name)
                || config.is_identification_file(&input.location)
        });
        if !has_id_file {
            issues.add(IssueKind::MissingIdentificationFile.issue(format!(
                "Identification metric used without identification input file: accession = {} ; label = {}",
                metric.accession(),
                super::describe(role, quality)
            )))?;
        }
    }

    let mut seen = BTreeSet::new();
    for metric in &quality.quality_metrics {
        let accession = metric.accession();
        if !seen.insert(accession) {
            issues.add(IssueKind::DuplicateMetric.issue(format!(
                "Duplicate quality metric in a run/set: accession = {accession}"
            )))?;
        }
        if !terms.metrics.contains(accession) {
            issues.add(IssueKind::NonMetricTerm.issue(format!(
                "Non-metric CV term used in metric context: accession = {accession}"
            )))?;
        }
        if terms.tables.contains(accession) {
            if let Some(issue) = table_shape(metric, vocabularies, config) {
                issues.add(issue)?;
            }
        } else if metric.term.unit.is_none() {
            issues.add(IssueKind::MetricWithoutUnit.issue(format!(
                "Metric CV term used without unit: accession = {accession}"
            )))?;
        }
    }
    Ok(())
}

/// The first violated table constraint, in order of precedence.
fn table_shape(
    metric: &QualityMetric,
    vocabularies: &Vocabularies,
    config: &OntologyConfig,
) -> Option<SemanticIssue> {
    let accession = metric.accession();
    let Some(columns) = metric.term.value.as_ref().and_then(|value| value.as_table()) else {
        return Some(IssueKind::TableWithoutTable.issue(format!(
            "Table metric CV term used without being a table: accession = {accession}"
        )));
    };

    if !columns.values().all(Value::is_array) {
        return Some(IssueKind::NonColumnValues.issue(format!(
            "Table metric CV term used with non-column elements: accession = {accession}"
        )));
    }

    let lengths: BTreeSet<usize> = columns
        .values()
        .filter_map(Value::as_array)
        .map(Vec::len)
        .collect();
    if lengths.len() != 1 {
        return Some(IssueKind::DifferingColumnLengths.issue(format!(
            "Table metric CV term used with differing column lengths: accession = {accession}"
        )));
    }

    let declared = |relationship: &str| -> BTreeSet<String> {
        vocabularies
            .relationship_values(accession, relationship)
            .into_iter()
            .map(|term| term.id)
            .collect()
    };
    let required = declared(&config.has_column_relationship);
    let optional = declared(&config.has_optional_column_relationship);
    let present: BTreeSet<&str> = columns.keys().map(String::as_str).collect();

    let missing: Vec<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|column| !present.contains(column))
        .collect();
    if !missing.is_empty() {
        return Some(IssueKind::MissingRequiredColumns.issue(format!(
            "Table metric CV term used missing required column(s): accession = {accession} ; column(s) = {}",
            missing.join(",")
        )));
    }

    let undeclared: Vec<&str> = present
        .iter()
        .copied()
        .filter(|column| !required.contains(*column) && !optional.contains(*column))
        .collect();
    if !undeclared.is_empty() {
        return Some(IssueKind::UndeclaredColumns.issue(format!(
            "Table metric CV term used with extra (undefined) columns: accession = {accession} ; column(s) = {}",
            undeclared.join(",")
        )));
    }
    None
}
