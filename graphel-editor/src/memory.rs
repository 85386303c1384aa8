//! In-memory triple source and statement store
//!
//! Backs the integration tests and demos: a `MemoryWorkbench` holds triples,
//! per-predicate schema, and suggestion entries, and can simulate a read-only
//! or conflicting store. `source_for` scopes it to one subject, producing the
//! `TripleSource` a tree is built from.

use crate::error::{Result, StoreError};
use crate::source::TripleSource;
use crate::store::{SchemaInfo, StatementStore};
use graphel_core::{Direction, EditorStatement, Iri, PropertyInfo, Provenance, Term, Triple};
use graphel_vocab::{buckets, rdf};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
struct StoredTriple {
    triple: Triple,
    provenance: Provenance,
    editable: bool,
}

/// In-memory statement store with schema and suggestion lookup
#[derive(Default)]
pub struct MemoryWorkbench {
    triples: Vec<StoredTriple>,
    schema: FxHashMap<Iri, SchemaInfo>,
    suggestions: Vec<(Term, Iri)>,
    read_only: bool,
    conflicting: bool,
    next_tx: u64,
    commits: usize,
    fetch_log: RefCell<Vec<(Iri, usize, usize)>>,
}

impl MemoryWorkbench {
    /// Empty workbench
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an editable triple
    pub fn insert(&mut self, triple: Triple) {
        self.triples.push(StoredTriple {
            triple,
            provenance: Provenance::new("seed"),
            editable: true,
        });
    }

    /// Insert a triple the store reports as not editable
    pub fn insert_readonly(&mut self, triple: Triple) {
        self.triples.push(StoredTriple {
            triple,
            provenance: Provenance::new("seed"),
            editable: false,
        });
    }

    /// Declare the schema of a predicate
    pub fn set_schema(&mut self, predicate: Iri, schema: SchemaInfo) {
        self.schema.insert(predicate, schema);
    }

    /// Suggest a predicate for subjects of a class
    pub fn suggest(&mut self, class: Term, predicate: Iri) {
        self.suggestions.push((class, predicate));
    }

    /// Make every commit fail as unsupported
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Make every commit fail with a conflict
    pub fn set_conflicting(&mut self, conflicting: bool) {
        self.conflicting = conflicting;
    }

    /// Number of successful commits so far
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Number of stored triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check for emptiness
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Check whether a triple is stored
    pub fn contains(&self, triple: &Triple) -> bool {
        self.position(triple).is_some()
    }

    /// Every `(predicate, offset, limit)` page fetch issued so far
    pub fn fetch_log(&self) -> Vec<(Iri, usize, usize)> {
        self.fetch_log.borrow().clone()
    }

    /// Scope this workbench to one subject, yielding its triple source
    pub fn source_for(&self, subject: Term) -> SubjectView<'_> {
        SubjectView {
            workbench: self,
            subject,
        }
    }

    fn position(&self, triple: &Triple) -> Option<usize> {
        self.triples.iter().position(|s| &s.triple == triple)
    }

    fn types_of(&self, subject: &Term) -> BTreeSet<Term> {
        self.triples
            .iter()
            .filter(|s| &s.triple.subject == subject && s.triple.predicate.as_str() == rdf::TYPE)
            .map(|s| s.triple.object.clone())
            .collect()
    }
}

impl StatementStore for MemoryWorkbench {
    fn commit(
        &mut self,
        adds: &[Triple],
        deletes: &[Triple],
        changes: &[(Triple, Triple)],
        _operation: &str,
    ) -> std::result::Result<Provenance, StoreError> {
        if self.read_only {
            return Err(StoreError::Unsupported);
        }
        if self.conflicting {
            return Err(StoreError::Conflict(
                "subject was modified by another session".to_string(),
            ));
        }
        // all-or-nothing: verify every target exists before mutating
        for triple in deletes.iter().chain(changes.iter().map(|(old, _)| old)) {
            if self.position(triple).is_none() {
                return Err(StoreError::Unspecified(format!(
                    "no such statement: {triple}"
                )));
            }
        }

        self.next_tx += 1;
        let provenance = Provenance::new(format!("tx-{}", self.next_tx));

        for triple in deletes {
            if let Some(pos) = self.position(triple) {
                self.triples.remove(pos);
            }
        }
        for (old, new) in changes {
            if let Some(pos) = self.position(old) {
                self.triples[pos].triple = new.clone();
                self.triples[pos].provenance = provenance.clone();
            }
        }
        for triple in adds {
            self.triples.push(StoredTriple {
                triple: triple.clone(),
                provenance: provenance.clone(),
                editable: true,
            });
        }

        self.commits += 1;
        Ok(provenance)
    }

    fn is_editable(&self, triple: &Triple) -> bool {
        self.position(triple)
            .map(|pos| self.triples[pos].editable)
            .unwrap_or(false)
    }

    fn property_schema(&self, predicate: &Iri) -> SchemaInfo {
        self.schema.get(predicate).cloned().unwrap_or_default()
    }

    fn subject_types(&self, subject: &Term) -> BTreeSet<Term> {
        self.types_of(subject)
    }

    fn statement_count(&self, subject: &Term, predicate: &Iri) -> usize {
        self.triples
            .iter()
            .filter(|s| &s.triple.subject == subject && &s.triple.predicate == predicate)
            .count()
    }

    fn suggested_predicates(&self, types: &BTreeSet<Term>) -> Vec<Iri> {
        let mut out = Vec::new();
        for (class, predicate) in &self.suggestions {
            if types.contains(class) && !out.contains(predicate) {
                out.push(predicate.clone());
            }
        }
        out
    }
}

/// A workbench scoped to one subject
pub struct SubjectView<'a> {
    workbench: &'a MemoryWorkbench,
    subject: Term,
}

impl SubjectView<'_> {
    /// Cluster buckets for one predicate: declared domains intersected with
    /// the subject's types; incoming buckets get the incoming-link label
    fn clusters_for(&self, predicate: &Iri, direction: Direction) -> BTreeSet<Term> {
        let schema = self.workbench.property_schema(predicate);
        match direction {
            Direction::Outgoing => {
                let types = self.workbench.types_of(&self.subject);
                schema.domains.intersection(&types).cloned().collect()
            }
            Direction::Incoming => schema
                .domains
                .iter()
                .map(|d| Term::literal(buckets::incoming(d.display_text())))
                .collect(),
        }
    }

    fn info_for(&self, predicate: &Iri, direction: Direction) -> PropertyInfo {
        PropertyInfo::new(
            predicate.clone(),
            direction,
            self.clusters_for(predicate, direction),
        )
    }

    fn matching(&self, property: &PropertyInfo) -> Vec<&StoredTriple> {
        self.workbench
            .triples
            .iter()
            .filter(|s| {
                s.triple.predicate == property.predicate
                    && match property.direction {
                        Direction::Outgoing => s.triple.subject == self.subject,
                        Direction::Incoming => s.triple.object == self.subject,
                    }
            })
            .collect()
    }
}

impl TripleSource for SubjectView<'_> {
    fn property_infos(&self) -> Result<Vec<PropertyInfo>> {
        let mut seen: FxHashSet<(Iri, Direction)> = FxHashSet::default();
        let mut infos = Vec::new();
        for stored in &self.workbench.triples {
            let direction = if stored.triple.subject == self.subject {
                Direction::Outgoing
            } else if stored.triple.object == self.subject {
                Direction::Incoming
            } else {
                continue;
            };
            if seen.insert((stored.triple.predicate.clone(), direction)) {
                infos.push(self.info_for(&stored.triple.predicate, direction));
            }
        }
        Ok(infos)
    }

    fn statement_preview(&self, limit: usize) -> Result<Vec<EditorStatement>> {
        let mut out = Vec::new();
        for info in self.property_infos()? {
            for stored in self.matching(&info).into_iter().take(limit) {
                out.push(EditorStatement::new(
                    stored.triple.clone(),
                    Some(stored.provenance.clone()),
                    info.clone(),
                ));
            }
        }
        Ok(out)
    }

    fn statements_for_property(
        &self,
        property: &PropertyInfo,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<EditorStatement>> {
        self.workbench
            .fetch_log
            .borrow_mut()
            .push((property.predicate.clone(), offset, limit));
        Ok(self
            .matching(property)
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|stored| {
                EditorStatement::new(
                    stored.triple.clone(),
                    Some(stored.provenance.clone()),
                    property.clone(),
                )
            })
            .collect())
    }
}
