//! Semantic issues and the closed catalogue of issue kinds.

use std::fmt;

use serde::{Serialize, Serializer};

/// Seriousness of an issue, `1` (advisory) to `9` (unusable content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    /// `None` outside `1..=9`.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN && level <= Self::MAX {
            Some(Self(level))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of issue categories, in the order their checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    General,
    LabelUniqueness,
    OntologyLoad,
    OntologyTerms,
    MetricUse,
    InputFiles,
}

impl Category {
    /// Categories written by the semantic checks; `General` is reserved for
    /// run-level messages.
    pub const CHECKED: [Self; 5] = [
        Self::LabelUniqueness,
        Self::OntologyLoad,
        Self::OntologyTerms,
        Self::MetricUse,
        Self::InputFiles,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::LabelUniqueness => "label uniqueness",
            Self::OntologyLoad => "ontology load errors",
            Self::OntologyTerms => "ontology term errors",
            Self::MetricUse => "metric use",
            Self::InputFiles => "input files",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Every issue the validator can raise.
///
/// Real checks and the documentation mode both construct issues through this
/// enum, so names, severities and categories cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueKind {
    IncompatibleObject,
    DuplicateLabel,
    OntologyLoadFailure,
    UnknownTerm,
    AmbiguousTerm,
    MissingDefinition,
    DefinitionMismatch,
    NameMismatch,
    MissingIdentificationFile,
    DuplicateMetric,
    NonMetricTerm,
    TableWithoutTable,
    NonColumnValues,
    DifferingColumnLengths,
    MissingRequiredColumns,
    UndeclaredColumns,
    MetricWithoutUnit,
    InconsistentFileName,
    DuplicateFileLocations,
    DuplicateFileSets,
}

impl IssueKind {
    pub const ALL: [Self; 20] = [
        Self::IncompatibleObject,
        Self::DuplicateLabel,
        Self::OntologyLoadFailure,
        Self::UnknownTerm,
        Self::AmbiguousTerm,
        Self::MissingDefinition,
        Self::DefinitionMismatch,
        Self::NameMismatch,
        Self::MissingIdentificationFile,
        Self::DuplicateMetric,
        Self::NonMetricTerm,
        Self::TableWithoutTable,
        Self::NonColumnValues,
        Self::DifferingColumnLengths,
        Self::MissingRequiredColumns,
        Self::UndeclaredColumns,
        Self::MetricWithoutUnit,
        Self::InconsistentFileName,
        Self::DuplicateFileLocations,
        Self::DuplicateFileSets,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IncompatibleObject => "Incompatible object",
            Self::DuplicateLabel => "Duplicate labels",
            Self::OntologyLoadFailure => "Ontology load error",
            Self::UnknownTerm => "Unknown CVTerm",
            Self::AmbiguousTerm => "Ambiguous CVTerms",
            Self::MissingDefinition => "Missing CVTerm definition",
            Self::DefinitionMismatch => "CVTerm definition mismatch",
            Self::NameMismatch => "CVTerm name mismatch",
            Self::MissingIdentificationFile => "Missing identification file",
            Self::DuplicateMetric => "Duplicate metric",
            Self::NonMetricTerm => "Non-metric term used as metric",
            Self::TableWithoutTable => "Table metric without table value",
            Self::NonColumnValues => "Table with non-column values",
            Self::DifferingColumnLengths => "Differing column lengths",
            Self::MissingRequiredColumns => "Missing required columns",
            Self::UndeclaredColumns => "Undeclared table columns",
            Self::MetricWithoutUnit => "Metric without unit",
            Self::InconsistentFileName => "Inconsistent file name",
            Self::DuplicateFileLocations => "Duplicate input file locations",
            Self::DuplicateFileSets => "Duplicate input file sets",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        Severity(match self {
            Self::MetricWithoutUnit => 3,
            Self::MissingDefinition | Self::InconsistentFileName => 4,
            Self::OntologyLoadFailure
            | Self::DefinitionMismatch
            | Self::NonMetricTerm
            | Self::UndeclaredColumns
            | Self::DuplicateFileSets => 5,
            Self::DuplicateLabel
            | Self::AmbiguousTerm
            | Self::NameMismatch
            | Self::MissingIdentificationFile
            | Self::DuplicateMetric
            | Self::TableWithoutTable
            | Self::NonColumnValues
            | Self::DuplicateFileLocations => 6,
            Self::UnknownTerm => 7,
            Self::MissingRequiredColumns => 8,
            Self::IncompatibleObject | Self::DifferingColumnLengths => 9,
        })
    }

    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::IncompatibleObject => Category::General,
            Self::DuplicateLabel => Category::LabelUniqueness,
            Self::OntologyLoadFailure => Category::OntologyLoad,
            Self::UnknownTerm
            | Self::AmbiguousTerm
            | Self::MissingDefinition
            | Self::DefinitionMismatch
            | Self::NameMismatch => Category::OntologyTerms,
            Self::MissingIdentificationFile
            | Self::DuplicateMetric
            | Self::NonMetricTerm
            | Self::TableWithoutTable
            | Self::NonColumnValues
            | Self::DifferingColumnLengths
            | Self::MissingRequiredColumns
            | Self::UndeclaredColumns
            | Self::MetricWithoutUnit => Category::MetricUse,
            Self::InconsistentFileName | Self::DuplicateFileLocations | Self::DuplicateFileSets => {
                Category::InputFiles
            }
        }
    }

    /// Message template with `{…}` placeholders, as used by the documentation
    /// mode.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::IncompatibleObject => "Incompatible object given to validation: {type}",
            Self::DuplicateLabel => "Run/SetQuality label {label} is not unique in file!",
            Self::OntologyLoadFailure => {
                "Error loading the following ontology referenced in file: {name} ({error})"
            }
            Self::UnknownTerm => "Term used not found in any ontology: accession = {accession} ; name = {name}",
            Self::AmbiguousTerm => "Ambiguous term error: occurrences = {occurrences}",
            Self::MissingDefinition => {
                "CV term used without accompanying term definition: accession = {accession}"
            }
            Self::DefinitionMismatch => {
                "CV term used with definition different from ontology: accession = {accession}"
            }
            Self::NameMismatch => {
                "CV term used with differing name from ontology: accession = {accession} ; name = {name} ; ontology name = {ontology name}"
            }
            Self::MissingIdentificationFile => {
                "Identification metric used without identification input file: accession = {accession} ; label = {label}"
            }
            Self::DuplicateMetric => "Duplicate quality metric in a run/set: accession = {accession}",
            Self::NonMetricTerm => "Non-metric CV term used in metric context: accession = {accession}",
            Self::TableWithoutTable => {
                "Table metric CV term used without being a table: accession = {accession}"
            }
            Self::NonColumnValues => {
                "Table metric CV term used with non-column elements: accession = {accession}"
            }
            Self::DifferingColumnLengths => {
                "Table metric CV term used with differing column lengths: accession = {accession}"
            }
            Self::MissingRequiredColumns => {
                "Table metric CV term used missing required column(s): accession = {accession} ; column(s) = {columns}"
            }
            Self::UndeclaredColumns => {
                "Table metric CV term used with extra (undefined) columns: accession = {accession} ; column(s) = {columns}"
            }
            Self::MetricWithoutUnit => "Metric CV term used without unit: accession = {accession}",
            Self::InconsistentFileName => {
                "Inconsistent file name and location: {name}/{location stem}"
            }
            Self::DuplicateFileLocations => {
                "Duplicate inputFile locations within a metadata object: label = {label} ; locations = {locations}"
            }
            Self::DuplicateFileSets => {
                "Duplicate input file set across runs/sets: label = {label} ; locations = {locations}"
            }
        }
    }

    /// An issue of this kind carrying `message`.
    #[must_use]
    pub fn issue(self, message: impl Into<String>) -> SemanticIssue {
        SemanticIssue {
            category: self.category(),
            name: self.name(),
            severity: self.severity(),
            message: message.into(),
        }
    }

    /// The documentation-mode issue of this kind.
    #[must_use]
    pub fn placeholder(self) -> SemanticIssue {
        self.issue(self.template())
    }
}

/// One finding of semantic validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticIssue {
    pub category: Category,
    /// Stable identifier of the issue kind.
    pub name: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for SemanticIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of severity {} and message: {}",
            self.name, self.severity, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::BTreeSet;

    #[test]
    fn names_are_unique() {
        let names: BTreeSet<&str> = IssueKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), IssueKind::ALL.len());
    }

    #[test]
    fn severities_are_in_range() {
        for kind in IssueKind::ALL {
            assert!(Severity::new(kind.severity().level()).is_some(), "{kind:?}");
        }
    }

    #[rstest]
    #[case(0, None)]
    #[case(1, Some(1))]
    #[case(9, Some(9))]
    #[case(10, None)]
    fn severity_bounds(#[case] level: u8, #[case] expected: Option<u8>) {
        assert_eq!(Severity::new(level).map(Severity::level), expected);
    }

    #[test]
    fn issue_renders_export_form() {
        let issue = IssueKind::DuplicateMetric.issue("Duplicate quality metric in a run/set: accession = MS:4000053");
        assert_eq!(
            issue.to_string(),
            "Duplicate metric of severity 6 and message: Duplicate quality metric in a run/set: accession = MS:4000053"
        );
        assert_eq!(issue.category, Category::MetricUse);
    }
}
