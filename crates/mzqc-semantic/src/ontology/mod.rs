//! Ontology gateway interface and the vocabularies loaded through it.
//!
//! Parsing ontology files is left to implementations of [`OntologyGateway`];
//! the checks only need term lookup, subclass enumeration and relationship
//! queries.

mod memory;
mod vocabularies;

use std::collections::BTreeSet;
use std::sync::Arc;

pub use memory::{MemoryGateway, MemoryOntology};
pub use vocabularies::Vocabularies;

use crate::error::GatewayError;

/// An ontology term.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    /// Accession, `PREFIX:NNNNNNN`.
    pub id: String,
    pub name: String,
    pub definition: String,
}

impl Term {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// Read access to one loaded ontology.
pub trait Ontology: Send + Sync {
    /// The term with `accession`, if defined here.
    fn get(&self, accession: &str) -> Option<&Term>;

    /// Accessions of `accession` and all its transitive subclasses; empty if
    /// `accession` is not defined here.
    fn subclasses_of(&self, accession: &str) -> BTreeSet<String>;

    /// Targets of the named relationship from `accession`.
    fn relationship_values(&self, accession: &str, relationship: &str) -> BTreeSet<Term>;
}

/// Source of ontologies addressed by URI.
pub trait OntologyGateway {
    /// Load the ontology at `uri`, preferring the local file system when
    /// `prefer_local` is set.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the ontology cannot be retrieved or parsed.
    fn load(&self, uri: &str, prefer_local: bool) -> Result<Arc<dyn Ontology>, GatewayError>;
}
