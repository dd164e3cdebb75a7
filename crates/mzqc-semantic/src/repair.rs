//! Filling omitted term descriptions from the loaded ontologies.

use mzqc_core::File;

use crate::ontology::Vocabularies;

/// Copy the ontology definition into every CV parameter whose description is
/// empty, using the first vocabulary that defines the accession. Returns the
/// number of parameters changed.
pub fn fill_missing_descriptions(file: &mut File, vocabularies: &Vocabularies) -> usize {
    let mut filled = 0;
    file.visit_cv_parameters_mut(|param| {
        if !param.description.is_empty() {
            return;
        }
        if let Some(term) = vocabularies.first(&param.accession) {
            if !term.definition.is_empty() {
                param.description.clone_from(&term.definition);
                filled += 1;
            }
        }
    });
    tracing::debug!(filled, "descriptions filled from ontologies");
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::{MemoryOntology, Term};
    use mzqc_core::entities::{BaseQuality, CvParameter, MetadataParameters, QualityMetric};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn only_empty_descriptions_are_filled() {
        let mut file = File {
            run_qualities: vec![BaseQuality::new(
                MetadataParameters::default(),
                vec![
                    QualityMetric::new(CvParameter::new("MS:4000059", "number of MS1 spectra")),
                    QualityMetric::new(
                        CvParameter::new("MS:4000060", "number of MS2 spectra")
                            .with_description("kept"),
                    ),
                    QualityMetric::new(CvParameter::new("MS:9999999", "unknown")),
                ],
            )],
            ..File::default()
        };
        let mut vocabularies = Vocabularies::new();
        vocabularies.insert(
            "MS",
            Arc::new(
                MemoryOntology::new()
                    .with_term(Term::new("MS:4000059", "number of MS1 spectra", "MS1 count."))
                    .with_term(Term::new("MS:4000060", "number of MS2 spectra", "MS2 count.")),
            ),
        );

        assert_eq!(fill_missing_descriptions(&mut file, &vocabularies), 1);
        let descriptions: Vec<&str> = file.run_qualities[0]
            .quality_metrics
            .iter()
            .map(|m| m.term.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["MS1 count.", "kept", ""]);
    }
}
