mod common;

use std::collections::BTreeSet;

use common::*;
use mzqc_core::entities::*;
use mzqc_semantic::check::{input_files, labels, metrics, ontology_load, terms};
use mzqc_semantic::{
    Category, IssueAccumulator, IssueKind, MemoryGateway, SemanticCheck, ValidationOptions,
    document_collected_issues,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// A file tripping most checks at once.
fn faulty_file() -> File {
    let mut file = clean_file();
    file.run_qualities[1].metadata.label = "run01".into();
    file.run_qualities[0].metadata.input_files[0].name = "elsewhere.mzML".into();
    file.run_qualities[0].metadata.analysis_software[0].term.description = String::new();
    file.run_qualities[0].quality_metrics[1] = charge_table(json!({"MS:1000041": [1]}));
    file.run_qualities[1].quality_metrics.push(duration(1.0));
    file.run_qualities[1].quality_metrics[0].term.unit = None;
    file.set_qualities.push(quality("set01", vec![mzml("run02"), mzml("run02")], vec![]));
    file.controlled_vocabularies.push(ControlledVocabulary::new("Missing", "https://example.org/gone.obo"));
    file
}

fn kind_names(kinds: &[IssueKind]) -> BTreeSet<&'static str> {
    kinds.iter().map(|kind| kind.name()).collect()
}

#[test]
fn catalogue_is_deterministic() {
    assert_eq!(document_collected_issues(), document_collected_issues());
}

#[test]
fn catalogue_lists_every_kind_once() {
    let catalogue = document_collected_issues();

    assert_eq!(catalogue.total(), IssueKind::ALL.len());
    assert_eq!(catalogue.names(), kind_names(&IssueKind::ALL));
    assert!(!catalogue.is_exceeded());
}

#[test]
fn catalogue_entries_carry_templates() {
    let catalogue = document_collected_issues();
    let unknown = &catalogue.get(Category::OntologyTerms)[0];

    assert_eq!(unknown.name, "Unknown CVTerm");
    assert_eq!(unknown.severity.level(), 7);
    assert_eq!(
        unknown.message,
        "Term used not found in any ontology: accession = {accession} ; name = {name}"
    );
    assert_eq!(
        catalogue.get(Category::General)[0].message,
        "Incompatible object given to validation: {type}"
    );
}

#[test]
fn catalogue_covers_a_real_run() {
    let mut checker = checker();
    checker
        .validate(&faulty_file(), &ValidationOptions::default())
        .unwrap();
    let real = checker.issues();

    assert!(real.total() >= 8, "{:?}", real.export());
    let catalogue = document_collected_issues();
    assert!(
        real.names().is_subset(&catalogue.names()),
        "{:?}",
        real.names().difference(&catalogue.names()).collect::<Vec<_>>()
    );
    for category in real.categories() {
        let listed: BTreeSet<_> = catalogue.get(category).iter().map(|issue| issue.name).collect();
        for issue in real.get(category) {
            assert!(listed.contains(issue.name), "{} not documented under {category}", issue.name);
        }
    }
}

#[test]
fn each_check_stays_within_its_kinds() {
    let file = faulty_file();
    let config = mzqc_config::OntologyConfig::default();
    let gateway = gateway();

    let mut found = IssueAccumulator::new(0);
    labels::check(&file, &mut found, false).unwrap();
    assert!(found.names().is_subset(&kind_names(labels::KINDS)));
    assert!(!found.is_empty());

    let mut found = IssueAccumulator::new(0);
    let vocabularies = ontology_load::load(&file, &gateway, false, &mut found, false).unwrap();
    assert!(found.names().is_subset(&kind_names(ontology_load::KINDS)));
    assert!(!found.is_empty());

    let mut found = IssueAccumulator::new(0);
    terms::check(&file, &vocabularies, &mut found, false).unwrap();
    assert!(found.names().is_subset(&kind_names(terms::KINDS)));
    assert!(!found.is_empty());

    let mut found = IssueAccumulator::new(0);
    metrics::check(&file, &vocabularies, &config, &mut found, false).unwrap();
    assert!(found.names().is_subset(&kind_names(metrics::KINDS)));
    assert!(!found.is_empty());

    let mut found = IssueAccumulator::new(0);
    input_files::check(&file, &mut found, false).unwrap();
    assert!(found.names().is_subset(&kind_names(input_files::KINDS)));
    assert!(!found.is_empty());
}

#[test]
fn document_mode_ignores_the_file() {
    let mut found = IssueAccumulator::new(0);
    metrics::check(
        &faulty_file(),
        &mzqc_semantic::Vocabularies::new(),
        &mzqc_config::OntologyConfig::default(),
        &mut found,
        true,
    )
    .unwrap();

    assert_eq!(found.total(), metrics::KINDS.len());
    assert_eq!(found.names(), kind_names(metrics::KINDS));
}

#[test]
fn vocabularies_skip_failed_loads() {
    let checker = SemanticCheck::new(
        MemoryGateway::new().with_ontology(MS_URI, psi_ms()),
        mzqc_config::OntologyConfig::default(),
    );

    let vocabularies = checker.vocabularies(&clean_file(), false);

    assert_eq!(vocabularies.names().collect::<Vec<_>>(), vec![
        "Proteomics Standards Initiative Mass Spectrometry Ontology"
    ]);
}
