//! Categorised issue collection with a bounded total.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ThresholdExceeded;
use crate::issues::{Category, SemanticIssue};

/// Issues grouped by category, each group in insertion order.
///
/// With a non-zero `max_errors`, every [`add`](Self::add) that brings the
/// total past the maximum still stores the issue, flags the accumulator as
/// exceeded, and returns [`ThresholdExceeded`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueAccumulator {
    max_errors: usize,
    issues: BTreeMap<Category, Vec<SemanticIssue>>,
    exceeded: bool,
}

impl IssueAccumulator {
    /// `max_errors = 0` disables the threshold.
    #[must_use]
    pub const fn new(max_errors: usize) -> Self {
        Self {
            max_errors,
            issues: BTreeMap::new(),
            exceeded: false,
        }
    }

    /// Append `issue` to its category.
    ///
    /// The category is part of the issue: every [`SemanticIssue`] carries the
    /// category of its [`IssueKind`](crate::IssueKind), so `add(category,
    /// issue)` reduces to `add(issue)` and an issue cannot be filed under a
    /// category its kind does not belong to.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdExceeded`] after inserting when the total exceeds
    /// a non-zero maximum.
    pub fn add(&mut self, issue: SemanticIssue) -> Result<(), ThresholdExceeded> {
        self.issues.entry(issue.category).or_default().push(issue);
        let total = self.total();
        if self.max_errors > 0 && total > self.max_errors {
            if !self.exceeded {
                tracing::warn!(max_errors = self.max_errors, total, "issue threshold exceeded");
            }
            self.exceeded = true;
            return Err(ThresholdExceeded {
                max_errors: self.max_errors,
                total,
            });
        }
        Ok(())
    }

    /// Make `category` appear in exports even when it holds no issues.
    pub fn ensure(&mut self, category: Category) {
        self.issues.entry(category).or_default();
    }

    /// Drop every issue and category and reset the exceeded flag.
    pub fn clear(&mut self) {
        self.issues.clear();
        self.exceeded = false;
    }

    #[must_use]
    pub const fn max_errors(&self) -> usize {
        self.max_errors
    }

    pub fn set_max_errors(&mut self, max_errors: usize) {
        self.max_errors = max_errors;
    }

    /// Whether the run was cut short by the threshold.
    #[must_use]
    pub const fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Issues of one category, in insertion order.
    #[must_use]
    pub fn get(&self, category: Category) -> &[SemanticIssue] {
        self.issues.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories present, in check order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.issues.keys().copied()
    }

    /// Every issue, grouped by category.
    pub fn iter(&self) -> impl Iterator<Item = &SemanticIssue> {
        self.issues.values().flatten()
    }

    /// Distinct issue names present.
    #[must_use]
    pub fn names(&self) -> BTreeSet<&'static str> {
        self.iter().map(|issue| issue.name).collect()
    }

    /// Render every issue as `"{name} of severity {severity} and message:
    /// {message}"`, grouped by category. A truncated run additionally reports
    /// the threshold under [`Category::General`].
    #[must_use]
    pub fn export(&self) -> BTreeMap<Category, Vec<String>> {
        let mut export: BTreeMap<Category, Vec<String>> = self
            .issues
            .iter()
            .map(|(category, issues)| {
                (*category, issues.iter().map(ToString::to_string).collect())
            })
            .collect();
        if self.exceeded {
            export.entry(Category::General).or_default().push(format!(
                "Maximum number of errors incurred ({} < {}), please revise and re-validate.",
                self.max_errors,
                self.total()
            ));
        }
        export
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::IssueKind;
    use pretty_assertions::assert_eq;

    fn duplicate(accession: &str) -> SemanticIssue {
        IssueKind::DuplicateMetric.issue(format!("accession = {accession}"))
    }

    #[test]
    fn unlimited_never_aborts() {
        let mut acc = IssueAccumulator::new(0);
        for i in 0..50 {
            acc.add(duplicate(&i.to_string())).unwrap();
        }
        assert_eq!(acc.total(), 50);
        assert!(!acc.is_exceeded());
    }

    #[test]
    fn exceeding_stores_issue_and_signals() {
        let mut acc = IssueAccumulator::new(2);
        acc.add(duplicate("a")).unwrap();
        acc.add(duplicate("b")).unwrap();
        let err = acc.add(duplicate("c")).unwrap_err();
        assert_eq!(err, ThresholdExceeded { max_errors: 2, total: 3 });
        assert_eq!(acc.total(), 3);
        assert!(acc.is_exceeded());

        assert!(acc.add(duplicate("d")).is_err());
        assert_eq!(acc.get(Category::MetricUse).len(), 4);
    }

    #[test]
    fn export_groups_and_reports_truncation() {
        let mut acc = IssueAccumulator::new(1);
        acc.ensure(Category::InputFiles);
        acc.add(duplicate("a")).unwrap();
        acc.add(IssueKind::DuplicateLabel.issue("label x")).unwrap_err();

        let export = acc.export();
        assert_eq!(
            export.keys().copied().collect::<Vec<_>>(),
            vec![
                Category::General,
                Category::LabelUniqueness,
                Category::MetricUse,
                Category::InputFiles
            ]
        );
        assert_eq!(
            export[&Category::MetricUse],
            vec!["Duplicate metric of severity 6 and message: accession = a".to_string()]
        );
        assert_eq!(
            export[&Category::General],
            vec!["Maximum number of errors incurred (1 < 2), please revise and re-validate.".to_string()]
        );
        assert!(export[&Category::InputFiles].is_empty());
    }

    #[test]
    fn issues_land_in_their_kind_category() {
        let mut acc = IssueAccumulator::new(0);
        acc.add(IssueKind::DuplicateLabel.issue("label x")).unwrap();
        acc.add(IssueKind::InconsistentFileName.issue("a/b")).unwrap();
        assert_eq!(acc.get(Category::LabelUniqueness).len(), 1);
        assert_eq!(acc.get(Category::InputFiles).len(), 1);
        assert!(acc.get(Category::MetricUse).is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut acc = IssueAccumulator::new(1);
        acc.add(duplicate("a")).unwrap();
        acc.add(duplicate("b")).unwrap_err();
        acc.clear();
        assert!(acc.is_empty());
        assert!(!acc.is_exceeded());
        assert_eq!(acc.categories().count(), 0);
    }
}
