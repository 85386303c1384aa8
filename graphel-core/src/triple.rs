//! Triple and statement types
//!
//! A `Triple` is the bare fact (subject, predicate, object). An
//! `EditorStatement` is a triple as the editor sees it: paired with the
//! property descriptor it belongs to and, once persisted, the provenance
//! record the store assigned to it.

use crate::iri::Iri;
use crate::property::PropertyInfo;
use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A single fact: subject, predicate, object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term (resource or, for incoming views, any term)
    pub subject: Term,
    /// Predicate IRI
    pub predicate: Iri,
    /// Object term
    pub object: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: Term, predicate: Iri, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Copy of this triple with a different object value
    pub fn with_object(&self, object: Term) -> Self {
        Self {
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.subject, self.predicate, self.object)
    }
}

/// Store-assigned provenance record for a persisted triple
///
/// Identifies where/when the triple was written; the store uses it to decide
/// editability. Cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance(Arc<str>);

impl Provenance {
    /// Create a provenance record from its identifier
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Get the record identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A triple in the editor's view: fact + owning property + provenance
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorStatement {
    /// The underlying fact
    pub triple: Triple,
    /// Provenance record, absent for orphan (not yet committed) statements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    /// The property descriptor this statement belongs to
    pub property: PropertyInfo,
}

impl EditorStatement {
    /// Create a statement for an existing, persisted triple
    pub fn new(triple: Triple, provenance: Option<Provenance>, property: PropertyInfo) -> Self {
        Self {
            triple,
            provenance,
            property,
        }
    }

    /// Create an orphan statement: a candidate not yet in the store
    pub fn orphan(triple: Triple, property: PropertyInfo) -> Self {
        Self {
            triple,
            provenance: None,
            property,
        }
    }

    /// Check whether the subject of the tree is this triple's subject
    pub fn is_outgoing(&self) -> bool {
        self.property.is_outgoing()
    }

    /// The displayed value: object for outgoing, subject for incoming
    pub fn display_value(&self) -> &Term {
        if self.is_outgoing() {
            &self.triple.object
        } else {
            &self.triple.subject
        }
    }

    /// Cluster buckets inherited from the property descriptor
    pub fn cluster_values(&self) -> &std::collections::BTreeSet<Term> {
        &self.property.cluster_values
    }
}
