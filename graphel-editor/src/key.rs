//! Node keys - value identity for tree nodes
//!
//! A `NodeKey` identifies a node within its parent and drives the child
//! index. Identity is value + direction based: two statement keys with equal
//! resolved display value and equal direction are the same identity, no
//! matter which concrete triple or provenance they came from.

use graphel_core::{Direction, EditorStatement, Iri, PropertyInfo, Term};
use std::fmt;

/// Identity of a tree node
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// Plain value: the root subject or a cluster bucket
    Plain(Term),
    /// One predicate with its direction
    Property {
        /// Predicate IRI
        predicate: Iri,
        /// Outgoing or incoming
        direction: Direction,
    },
    /// One concrete value under a property, with the direction inherited
    /// from the originating triple's orientation
    Statement {
        /// The resolved display value
        value: Term,
        /// Outgoing or incoming
        direction: Direction,
    },
}

impl NodeKey {
    /// Key for a cluster bucket (or the root subject)
    pub fn plain(value: Term) -> Self {
        NodeKey::Plain(value)
    }

    /// Key for a property node
    pub fn property(info: &PropertyInfo) -> Self {
        NodeKey::Property {
            predicate: info.predicate.clone(),
            direction: info.direction,
        }
    }

    /// Key for a statement node, derived from its display value and direction
    pub fn statement(stmt: &EditorStatement) -> Self {
        NodeKey::Statement {
            value: stmt.display_value().clone(),
            direction: stmt.property.direction,
        }
    }

    /// The direction carried by this key, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            NodeKey::Plain(_) => None,
            NodeKey::Property { direction, .. } | NodeKey::Statement { direction, .. } => {
                Some(*direction)
            }
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Plain(term) => write!(f, "{term}"),
            NodeKey::Property {
                predicate,
                direction,
            } => write!(f, "{predicate} ({direction})"),
            NodeKey::Statement { value, direction } => write!(f, "{value} ({direction})"),
        }
    }
}
