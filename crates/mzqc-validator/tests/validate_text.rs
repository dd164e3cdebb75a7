//! End-to-end validation of mzQC text.

use mzqc_config::{MzqcConfig, ValidationConfig};
use mzqc_core::encode::{self, Readability};
use mzqc_core::entities::*;
use mzqc_core::timestamp;
use mzqc_semantic::{Category, IssueKind, MemoryGateway, MemoryOntology, Term};
use mzqc_validator::{ValidationReport, Validator, documentation};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

const MS_URI: &str = "https://example.org/psi-ms.obo";

fn definition(accession: &str) -> String {
    format!("Definition of {accession}.")
}

fn param(accession: &str, name: &str) -> CvParameter {
    CvParameter::new(accession, name).with_description(definition(accession))
}

fn gateway() -> MemoryGateway {
    let term = |accession: &str, name: &str| Term::new(accession, name, definition(accession));
    let ontology = MemoryOntology::new()
        .with_term(term("MS:4000002", "QC metric"))
        .with_term(term("MS:4000005", "table"))
        .with_term(term("MS:4000008", "ID based metric"))
        .with_term(term("MS:4000053", "chromatography duration"))
        .with_term(term("MS:4000059", "number of MS1 spectra"))
        .with_term(term("MS:1000584", "mzML format"))
        .with_term(term("MS:1003162", "PTX-QC"))
        .with_term(term("UO:0000010", "second"))
        .with_term(term("UO:0000189", "count unit"))
        .with_is_a("MS:4000005", "MS:4000002")
        .with_is_a("MS:4000008", "MS:4000002")
        .with_is_a("MS:4000053", "MS:4000002")
        .with_is_a("MS:4000059", "MS:4000002");
    MemoryGateway::new().with_ontology(MS_URI, ontology)
}

fn file() -> File {
    let metadata = MetadataParameters::new(
        vec![InputFile::new(
            "file:///data/run01.mzML",
            "run01.mzML",
            param("MS:1000584", "mzML format"),
        )],
        vec![AnalysisSoftware::new(
            param("MS:1003162", "PTX-QC"),
            "1.0.3",
            "https://github.com/cbielow/PTXQC/",
        )],
    )
    .with_label("run01");
    File {
        creation_date: timestamp::parse("creationDate", "2020-12-01T11:56:34").unwrap(),
        run_qualities: vec![BaseQuality::new(
            metadata,
            vec![
                QualityMetric::new(
                    param("MS:4000053", "chromatography duration")
                        .with_value(4321.5)
                        .with_unit(param("UO:0000010", "second")),
                ),
                QualityMetric::new(
                    param("MS:4000059", "number of MS1 spectra")
                        .with_value(13405)
                        .with_unit(param("UO:0000189", "count unit")),
                ),
            ],
        )],
        controlled_vocabularies: vec![ControlledVocabulary::new(
            "Proteomics Standards Initiative Mass Spectrometry Ontology",
            MS_URI,
        )],
        ..File::default()
    }
}

fn text(file: &File) -> String {
    encode::to_string(file, Readability::Tables, true).unwrap()
}

fn validator() -> Validator<MemoryGateway> {
    Validator::new(gateway(), MzqcConfig::default())
}

#[rstest]
#[case::not_json("this is not JSON")]
#[case::bare_parameter(r#"{"accession": "MS:4000053", "name": "chromatography duration"}"#)]
#[case::unknown_shape(r#"{"hello": "world"}"#)]
#[case::bad_timestamp(r#"{"mzQC": {"creationDate": "yesterday", "version": "1.0.0", "controlledVocabularies": []}}"#)]
fn non_file_input_is_undetectable(#[case] input: &str) {
    let report = validator().validate_text(input).unwrap();

    assert_eq!(report, ValidationReport::undetectable());
    assert_eq!(
        report.to_json().unwrap(),
        json!({"general": "No mzQC structure detectable."})
    );
}

#[test]
fn clean_file_passes_both_modes() {
    let report = validator().validate_text(&text(&file())).unwrap();

    assert!(report.is_clean(), "{:?}", report.to_json());
    assert_eq!(
        report.to_json().unwrap(),
        json!({
            "label uniqueness": [],
            "ontology load errors": [],
            "ontology term errors": [],
            "metric use": [],
            "input files": [],
            "schema validation": "success"
        })
    );
}

#[test]
fn untrusted_vocabulary_is_dropped_before_checking() {
    let mut doc = file();
    doc.controlled_vocabularies.push(ControlledVocabulary::new(
        "Private Ontology",
        "ftp://example.org/private.obo",
    ));

    let report = validator().validate_text(&text(&doc)).unwrap();
    let findings = report.findings().unwrap();

    assert_eq!(findings.ontology, vec!["invalid ontology URI for Private Ontology".to_string()]);
    assert!(findings.semantic[&Category::OntologyLoad].is_empty());
    assert_eq!(findings.schema, "success");
}

#[test]
fn schema_and_semantic_results_are_independent() {
    let mut doc = file();
    doc.run_qualities[0].quality_metrics[0].term.accession = "MS:40053".into();

    let report = validator().validate_text(&text(&doc)).unwrap();
    let findings = report.findings().unwrap();

    assert!(
        findings
            .schema
            .ends_with(" @ [mzQC][runQualities][0][qualityMetrics][0][accession]"),
        "{}",
        findings.schema
    );
    let terms = &findings.semantic[&Category::OntologyTerms];
    assert_eq!(terms.len(), 1);
    assert!(terms[0].starts_with("Unknown CVTerm of severity 7"), "{}", terms[0]);
}

#[test]
fn configured_threshold_truncates_semantic_results() {
    let mut doc = file();
    let metrics = &mut doc.run_qualities[0].quality_metrics;
    for _ in 0..3 {
        metrics.push(metrics[0].clone());
    }
    let config = MzqcConfig {
        validation: ValidationConfig {
            max_errors: 1,
            load_local: false,
        },
        ..MzqcConfig::default()
    };
    let mut validator = Validator::new(gateway(), config);

    let report = validator.validate_text(&text(&doc)).unwrap();
    let findings = report.findings().unwrap();

    assert_eq!(findings.semantic[&Category::MetricUse].len(), 2);
    assert_eq!(
        findings.semantic[&Category::General],
        vec!["Maximum number of errors incurred (1 < 2), please revise and re-validate.".to_string()]
    );
    assert_eq!(findings.schema, "success");

    let json = report.to_json().unwrap();
    assert_eq!(
        json["general"],
        json!(["Maximum number of errors incurred (1 < 2), please revise and re-validate."])
    );
    assert_eq!(json["metric use"].as_array().map(Vec::len), Some(2));
}

#[test]
fn reports_do_not_leak_between_runs() {
    let mut validator = validator();
    let mut doc = file();
    doc.run_qualities[0].quality_metrics[1].term.unit = None;

    let first = validator.validate_text(&text(&doc)).unwrap();
    let second = validator.validate_text(&text(&file())).unwrap();

    assert_eq!(first.findings().unwrap().semantic[&Category::MetricUse].len(), 1);
    assert!(second.is_clean());
}

#[test]
fn documentation_lists_every_issue() {
    let text = documentation();

    for kind in IssueKind::ALL {
        assert!(text.contains(&format!("{} of severity {}", kind.name(), kind.severity())), "{kind:?}");
    }
    assert!(text.contains("* 'metric use':"));
    assert!(text.contains("'schema validation'"));
    assert_eq!(
        text.lines().filter(|line| line.starts_with("    ")).count(),
        IssueKind::ALL.len()
    );
    assert!(!text.ends_with('\n'));
}
