//! Property descriptor - predicate plus direction plus clustering values
//!
//! A `PropertyInfo` describes one predicate as seen from the tree's subject:
//! whether the subject's statements for it are outgoing or incoming, and
//! which cluster buckets the property files under.

use crate::iri::Iri;
use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Orientation of a statement relative to the tree's subject
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Subject is the statement's subject
    Outgoing,
    /// Subject is the statement's object (inverse/incoming link)
    Incoming,
}

impl Direction {
    /// Check for the outgoing direction
    pub fn is_outgoing(self) -> bool {
        self == Direction::Outgoing
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outgoing => write!(f, "outgoing"),
            Direction::Incoming => write!(f, "incoming"),
        }
    }
}

/// Information about one property of the subject
///
/// The cluster values are kept in a `BTreeSet` so iteration order (and with
/// it tree construction) is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyInfo {
    /// Predicate IRI
    pub predicate: Iri,
    /// Statement orientation relative to the subject
    pub direction: Direction,
    /// Cluster buckets this property files under (never empty after resolution)
    pub cluster_values: BTreeSet<Term>,
}

impl PropertyInfo {
    /// Create property info with explicit cluster values
    pub fn new(predicate: Iri, direction: Direction, cluster_values: BTreeSet<Term>) -> Self {
        Self {
            predicate,
            direction,
            cluster_values,
        }
    }

    /// Outgoing property filed under a single cluster bucket
    pub fn outgoing(predicate: Iri, cluster: Term) -> Self {
        Self::new(
            predicate,
            Direction::Outgoing,
            BTreeSet::from([cluster]),
        )
    }

    /// Check whether statements of this property are outgoing
    pub fn is_outgoing(&self) -> bool {
        self.direction.is_outgoing()
    }
}

impl fmt::Display for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.predicate, self.direction)
    }
}
