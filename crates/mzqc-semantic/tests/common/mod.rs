//! Shared fixtures: an in-memory PSI-MS/UO pair and a document that is clean
//! against them.

#![allow(dead_code)]

use mzqc_config::OntologyConfig;
use mzqc_core::entities::*;
use mzqc_core::timestamp;
use mzqc_semantic::{MemoryGateway, MemoryOntology, SemanticCheck, Term};
use serde_json::json;

pub const MS_URI: &str = "https://example.org/psi-ms.obo";
pub const UO_URI: &str = "https://example.org/uo.obo";

pub const DURATION: &str = "MS:4000053";
pub const CHARGE_TABLE: &str = "MS:4000063";
pub const PSM_COUNT: &str = "MS:4000078";
pub const TABLE_ROOT: &str = "MS:4000005";

fn definition(accession: &str) -> String {
    format!("Definition of {accession}.")
}

fn term(accession: &str, name: &str) -> Term {
    Term::new(accession, name, definition(accession))
}

pub fn psi_ms() -> MemoryOntology {
    MemoryOntology::new()
        .with_term(term("MS:4000002", "QC metric"))
        .with_term(term(TABLE_ROOT, "table"))
        .with_term(term("MS:4000008", "ID based metric"))
        .with_term(term(DURATION, "chromatography duration"))
        .with_term(term(CHARGE_TABLE, "MS2 known precursor charges fractions"))
        .with_term(term(PSM_COUNT, "number of identified PSMs"))
        .with_term(term("MS:1000584", "mzML format"))
        .with_term(term("MS:1002439", "mzIdentML format"))
        .with_term(term("MS:1000041", "charge state"))
        .with_term(term("MS:1003162", "PTX-QC"))
        .with_term(term("MS:1000747", "completion time"))
        .with_is_a(TABLE_ROOT, "MS:4000002")
        .with_is_a("MS:4000008", "MS:4000002")
        .with_is_a(DURATION, "MS:4000002")
        .with_is_a(CHARGE_TABLE, TABLE_ROOT)
        .with_is_a(PSM_COUNT, "MS:4000008")
        .with_relationship(CHARGE_TABLE, "has_column", "MS:1000041")
        .with_relationship(CHARGE_TABLE, "has_column", "UO:0000191")
        .with_relationship(CHARGE_TABLE, "has_optional_column", "MS:1000747")
}

pub fn unit_ontology() -> MemoryOntology {
    MemoryOntology::new()
        .with_term(term("UO:0000010", "second"))
        .with_term(term("UO:0000191", "fraction"))
        .with_term(term("UO:0000189", "count unit"))
}

pub fn gateway() -> MemoryGateway {
    MemoryGateway::new()
        .with_ontology(MS_URI, psi_ms())
        .with_ontology(UO_URI, unit_ontology())
}

pub fn checker() -> SemanticCheck<MemoryGateway> {
    SemanticCheck::new(gateway(), OntologyConfig::default())
}

/// A CV parameter whose name and description agree with the fixtures.
pub fn param(accession: &str, name: &str) -> CvParameter {
    CvParameter::new(accession, name).with_description(definition(accession))
}

pub fn duration(seconds: f64) -> QualityMetric {
    QualityMetric::new(
        param(DURATION, "chromatography duration")
            .with_value(seconds)
            .with_unit(param("UO:0000010", "second")),
    )
}

pub fn charge_table(value: serde_json::Value) -> QualityMetric {
    QualityMetric::new(param(CHARGE_TABLE, "MS2 known precursor charges fractions").with_value(value))
}

pub fn mzml(stem: &str) -> InputFile {
    InputFile::new(
        format!("file:///data/{stem}.mzML"),
        format!("{stem}.mzML"),
        param("MS:1000584", "mzML format"),
    )
}

pub fn quality(label: &str, inputs: Vec<InputFile>, metrics: Vec<QualityMetric>) -> BaseQuality {
    let software = AnalysisSoftware::new(param("MS:1003162", "PTX-QC"), "1.0.3", "https://github.com/cbielow/PTXQC/");
    BaseQuality::new(
        MetadataParameters::new(inputs, vec![software]).with_label(label),
        metrics,
    )
}

pub fn clean_file() -> File {
    File {
        creation_date: timestamp::parse("creationDate", "2020-12-01T11:56:34").unwrap(),
        contact_name: "Chris Bielow".into(),
        run_qualities: vec![
            quality(
                "run01",
                vec![mzml("run01")],
                vec![
                    duration(4321.5),
                    charge_table(json!({"MS:1000041": [1, 2, 3], "UO:0000191": [0.1, 0.8, 0.1]})),
                ],
            ),
            quality("run02", vec![mzml("run02")], vec![duration(4100.0)]),
        ],
        controlled_vocabularies: vec![
            ControlledVocabulary::new("Proteomics Standards Initiative Mass Spectrometry Ontology", MS_URI),
            ControlledVocabulary::new("Unit Ontology", UO_URI),
        ],
        ..File::default()
    }
}
