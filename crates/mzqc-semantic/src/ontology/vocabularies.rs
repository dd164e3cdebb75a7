use std::collections::BTreeSet;
use std::sync::Arc;

use super::{Ontology, Term};

/// The ontologies a file references, by vocabulary name, in file order.
#[derive(Clone, Default)]
pub struct Vocabularies {
    loaded: Vec<(String, Arc<dyn Ontology>)>,
}

impl Vocabularies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ontology` under `name`, replacing an earlier entry of the
    /// same name in place.
    pub fn insert(&mut self, name: impl Into<String>, ontology: Arc<dyn Ontology>) {
        let name = name.into();
        match self.loaded.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = ontology,
            None => self.loaded.push((name, ontology)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loaded.iter().map(|(name, _)| name.as_str())
    }

    /// Every definition of `accession`, one per ontology that has it.
    #[must_use]
    pub fn lookup(&self, accession: &str) -> Vec<&Term> {
        self.loaded
            .iter()
            .filter_map(|(_, ontology)| ontology.get(accession))
            .collect()
    }

    /// The first definition of `accession` in file order.
    #[must_use]
    pub fn first(&self, accession: &str) -> Option<&Term> {
        self.loaded
            .iter()
            .find_map(|(_, ontology)| ontology.get(accession))
    }

    /// Union of the subtrees rooted at `root` across all ontologies.
    #[must_use]
    pub fn subclasses_of(&self, root: &str) -> BTreeSet<String> {
        self.loaded
            .iter()
            .flat_map(|(_, ontology)| ontology.subclasses_of(root))
            .collect()
    }

    /// Relationship targets taken from the first ontology defining
    /// `accession`; empty if none does.
    #[must_use]
    pub fn relationship_values(&self, accession: &str, relationship: &str) -> BTreeSet<Term> {
        self.loaded
            .iter()
            .find(|(_, ontology)| ontology.get(accession).is_some())
            .map(|(_, ontology)| ontology.relationship_values(accession, relationship))
            .unwrap_or_default()
    }
}
