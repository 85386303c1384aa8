//! Statement store - the write boundary and schema lookup
//!
//! The store is the single external authority over persistence, editability
//! and schema. The editor submits exactly one batch per commit; the store
//! answers with a provenance record or a categorized [`StoreError`].
//!
//! `SchemaInfo` also drives input validation: when a property has no
//! explicitly configured accepted datatypes, the set is derived from its
//! declared ranges and property type, with built-in ranges for the well-known
//! ontology predicates.

use crate::error::StoreError;
use graphel_core::{Datatype, Iri, Provenance, Term, Triple};
use graphel_vocab::{rdf, rdfs};
use std::collections::BTreeSet;

/// Declared schema of one predicate
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaInfo {
    /// Declared domains (classes the subject is expected to belong to)
    pub domains: BTreeSet<Term>,
    /// Declared ranges (type IRIs the object is expected to conform to)
    pub ranges: BTreeSet<Iri>,
    /// The predicate is declared an object property
    pub is_object_property: bool,
    /// The predicate is declared a datatype property
    pub is_datatype_property: bool,
}

impl SchemaInfo {
    /// Schema with domains only
    pub fn with_domains<I: IntoIterator<Item = Term>>(domains: I) -> Self {
        Self {
            domains: domains.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Add a declared range
    pub fn with_range(mut self, range: Iri) -> Self {
        self.ranges.insert(range);
        self
    }

    /// Mark as an object property
    pub fn object_property(mut self) -> Self {
        self.is_object_property = true;
        self
    }

    /// Mark as a datatype property
    pub fn datatype_property(mut self) -> Self {
        self.is_datatype_property = true;
        self
    }

    /// Datatypes this predicate accepts for new values.
    ///
    /// Well-known ontology predicates carry built-in ranges. Otherwise the
    /// set is derived from the declared ranges and the property type; an
    /// empty result means "no schema opinion" and the editor falls back to
    /// accepting any resource or plain literal.
    pub fn accepted_types(&self, predicate: &Iri) -> Vec<Datatype> {
        if let Some(builtin) = builtin_accepted_types(predicate) {
            return builtin;
        }
        let mut types: Vec<Datatype> = self
            .ranges
            .iter()
            .filter_map(Datatype::from_type_iri)
            .collect();
        if types.is_empty() {
            if self.is_object_property {
                types.push(Datatype::Resource);
            } else if self.is_datatype_property {
                types.push(Datatype::UntypedLiteral);
            }
        }
        types.sort_by_key(|dt| dt.type_iri());
        types.dedup();
        types
    }
}

/// Built-in accepted types for the well-known ontology predicates
fn builtin_accepted_types(predicate: &Iri) -> Option<Vec<Datatype>> {
    match predicate.as_str() {
        rdf::TYPE
        | rdfs::SUB_CLASS_OF
        | rdfs::SUB_PROPERTY_OF
        | rdfs::DOMAIN
        | rdfs::RANGE
        | rdfs::MEMBER
        | rdfs::IS_DEFINED_BY
        | rdfs::SEE_ALSO => Some(vec![Datatype::Resource]),
        rdfs::LABEL | rdfs::COMMENT => Some(vec![Datatype::UntypedLiteral]),
        _ => None,
    }
}

/// Write access and schema lookup
pub trait StatementStore {
    /// Submit one all-or-nothing batch under a single operation label.
    ///
    /// Returns the provenance record assigned to the written statements.
    /// Change pairs are (old triple, new triple); the store removes the old
    /// and writes the new atomically with the rest of the batch.
    fn commit(
        &mut self,
        adds: &[Triple],
        deletes: &[Triple],
        changes: &[(Triple, Triple)],
        operation: &str,
    ) -> Result<Provenance, StoreError>;

    /// Whether the store permits deleting or changing this triple
    fn is_editable(&self, triple: &Triple) -> bool;

    /// Declared schema of a predicate; a default (empty) schema if unknown
    fn property_schema(&self, predicate: &Iri) -> SchemaInfo;

    /// Declared types of a subject, used for cluster resolution and
    /// placeholder suggestion
    fn subject_types(&self, subject: &Term) -> BTreeSet<Term>;

    /// Current number of outgoing statements for (subject, predicate);
    /// seeds cardinality baselines
    fn statement_count(&self, subject: &Term, predicate: &Iri) -> usize;

    /// Predicates the schema suggests for subjects of these types
    fn suggested_predicates(&self, types: &BTreeSet<Term>) -> Vec<Iri>;
}
