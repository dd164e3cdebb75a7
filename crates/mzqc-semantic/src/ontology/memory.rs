//! In-memory ontologies, for embedding vocabularies and for tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use super::{Ontology, OntologyGateway, Term};
use crate::error::GatewayError;

const FILE_SCHEME: &str = "file://";

/// An ontology built in code.
#[derive(Debug, Clone, Default)]
pub struct MemoryOntology {
    terms: BTreeMap<String, Term>,
    children: BTreeMap<String, BTreeSet<String>>,
    relationships: BTreeMap<(String, String), BTreeSet<String>>,
}

impl MemoryOntology {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_term(mut self, term: Term) -> Self {
        self.terms.insert(term.id.clone(), term);
        self
    }

    /// Declare `child` a direct subclass of `parent`.
    #[must_use]
    pub fn with_is_a(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        self.children
            .entry(parent.into())
            .or_default()
            .insert(child.into());
        self
    }

    #[must_use]
    pub fn with_relationship(
        mut self,
        from: impl Into<String>,
        relationship: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.relationships
            .entry((from.into(), relationship.into()))
            .or_default()
            .insert(to.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Ontology for MemoryOntology {
    fn get(&self, accession: &str) -> Option<&Term> {
        self.terms.get(accession)
    }

    fn subclasses_of(&self, accession: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        if !self.terms.contains_key(accession) {
            return found;
        }
        let mut pending = vec![accession.to_string()];
        while let Some(current) = pending.pop() {
            if !found.insert(current.clone()) {
                continue;
            }
            if let Some(children) = self.children.get(&current) {
                pending.extend(children.iter().cloned());
            }
        }
        found
    }

    fn relationship_values(&self, accession: &str, relationship: &str) -> BTreeSet<Term> {
        self.relationships
            .get(&(accession.to_string(), relationship.to_string()))
            .into_iter()
            .flatten()
            .map(|id| {
                self.terms
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| Term::new(id.clone(), "", ""))
            })
            .collect()
    }
}

/// A gateway serving ontologies registered by address.
///
/// With `prefer_local`, a `file://` scheme is stripped before lookup, so
/// local ontologies are registered under their plain path.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    ontologies: HashMap<String, Arc<dyn Ontology>>,
    failures: HashMap<String, GatewayError>,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ontology(mut self, address: impl Into<String>, ontology: impl Ontology + 'static) -> Self {
        self.ontologies.insert(address.into(), Arc::new(ontology));
        self
    }

    /// Make loading `address` fail with `error`.
    #[must_use]
    pub fn with_failure(mut self, address: impl Into<String>, error: GatewayError) -> Self {
        self.failures.insert(address.into(), error);
        self
    }
}

impl OntologyGateway for MemoryGateway {
    fn load(&self, uri: &str, prefer_local: bool) -> Result<Arc<dyn Ontology>, GatewayError> {
        let address = if prefer_local {
            uri.strip_prefix(FILE_SCHEME).unwrap_or(uri)
        } else {
            uri
        };
        if let Some(error) = self.failures.get(address) {
            return Err(error.clone());
        }
        self.ontologies
            .get(address)
            .cloned()
            .ok_or_else(|| GatewayError::Retrieve {
                uri: address.to_string(),
                reason: "no ontology registered at this address".to_string(),
            })
    }
}
