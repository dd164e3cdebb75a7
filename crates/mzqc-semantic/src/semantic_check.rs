//! Running all checks over a file.

use mzqc_config::{OntologyConfig, ValidationConfig};
use mzqc_core::{Decoded, File};

use crate::accumulator::IssueAccumulator;
use crate::check::{input_files, labels, metrics, ontology_load, terms};
use crate::error::ThresholdExceeded;
use crate::issues::{Category, IssueKind};
use crate::ontology::{MemoryGateway, OntologyGateway, Vocabularies};

/// Per-run settings of [`SemanticCheck::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Abort threshold; `0` means unlimited.
    pub max_errors: usize,
    /// Resolve vocabularies from local files.
    pub load_local: bool,
    /// Add to the issues of earlier runs instead of starting afresh.
    pub keep_previous: bool,
}

impl From<&ValidationConfig> for ValidationOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            max_errors: config.max_errors,
            load_local: config.load_local,
            keep_previous: false,
        }
    }
}

/// Semantic validator owning its gateway and issue accumulator.
pub struct SemanticCheck<G> {
    gateway: G,
    ontology: OntologyConfig,
    issues: IssueAccumulator,
}

impl<G: OntologyGateway> SemanticCheck<G> {
    #[must_use]
    pub fn new(gateway: G, ontology: OntologyConfig) -> Self {
        Self {
            gateway,
            ontology,
            issues: IssueAccumulator::default(),
        }
    }

    /// Issues of the latest run, complete or truncated.
    #[must_use]
    pub const fn issues(&self) -> &IssueAccumulator {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> IssueAccumulator {
        self.issues
    }

    /// Run every check over `file`, in order: label uniqueness, ontology
    /// loading, term use, metric use, input files.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdExceeded`] when the issue total passes
    /// `options.max_errors`; [`issues`](Self::issues) then holds the partial
    /// result.
    pub fn validate(&mut self, file: &File, options: &ValidationOptions) -> Result<(), ThresholdExceeded> {
        self.prepare(options);
        for category in Category::CHECKED {
            self.issues.ensure(category);
        }
        let outcome = run_checks(
            file,
            &self.gateway,
            &self.ontology,
            options.load_local,
            &mut self.issues,
            false,
        );
        tracing::info!(
            total = self.issues.total(),
            labels = self.issues.get(Category::LabelUniqueness).len(),
            ontology_load = self.issues.get(Category::OntologyLoad).len(),
            terms = self.issues.get(Category::OntologyTerms).len(),
            metrics = self.issues.get(Category::MetricUse).len(),
            input_files = self.issues.get(Category::InputFiles).len(),
            aborted = outcome.is_err(),
            "semantic validation finished"
        );
        outcome
    }

    /// Validate a decoder result; anything but a file yields a single
    /// [`IssueKind::IncompatibleObject`] issue and no checks run.
    ///
    /// # Errors
    ///
    /// See [`SemanticCheck::validate`].
    pub fn validate_decoded(
        &mut self,
        decoded: &Decoded,
        options: &ValidationOptions,
    ) -> Result<(), ThresholdExceeded> {
        if let Some(file) = decoded.as_file() {
            return self.validate(file, options);
        }
        self.prepare(options);
        let found = decoded
            .kind()
            .map_or_else(|| "untyped JSON".to_string(), |kind| kind.to_string());
        self.issues.add(IssueKind::IncompatibleObject.issue(format!(
            "Incompatible object given to validation: {found}"
        )))
    }

    /// Load the file's vocabularies without recording load failures.
    #[must_use]
    pub fn vocabularies(&self, file: &File, load_local: bool) -> Vocabularies {
        let mut discarded = IssueAccumulator::new(0);
        ontology_load::load(file, &self.gateway, load_local, &mut discarded, false)
            .unwrap_or_default()
    }

    fn prepare(&mut self, options: &ValidationOptions) {
        if !options.keep_previous {
            self.issues.clear();
        }
        self.issues.set_max_errors(options.max_errors);
    }
}

/// The catalogue of every issue the validator can raise, produced by running
/// all checks in document mode over an empty file.
#[must_use]
pub fn document_collected_issues() -> IssueAccumulator {
    let mut issues = IssueAccumulator::new(0);
    let empty = File::default();
    let collected = issues
        .add(IssueKind::IncompatibleObject.placeholder())
        .and_then(|()| {
            run_checks(
                &empty,
                &MemoryGateway::new(),
                &OntologyConfig::default(),
                false,
                &mut issues,
                true,
            )
        });
    if let Err(error) = collected {
        tracing::warn!(%error, "documentation run was truncated");
    }
    issues
}

fn run_checks(
    file: &File,
    gateway: &dyn OntologyGateway,
    ontology: &OntologyConfig,
    load_local: bool,
    issues: &mut IssueAccumulator,
    document_mode: bool,
) -> Result<(), ThresholdExceeded> {
    labels::check(file, issues, document_mode)?;
    let vocabularies = ontology_load::load(file, gateway, load_local, issues, document_mode)?;
    terms::check(file, &vocabularies, issues, document_mode)?;
    metrics::check(file, &vocabularies, ontology, issues, document_mode)?;
    input_files::check(file, issues, document_mode)
}
