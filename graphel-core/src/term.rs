//! Term - polymorphic RDF value type
//!
//! A `Term` is any value that can appear in a triple position: a named
//! resource (`Iri`), an anonymous node (`Blank`), or a `Literal`.
//!
//! ## Ordering
//!
//! Terms order by type discriminant first (Iri < Blank < Literal), then by
//! value within the type. The ordering is total and deterministic, which the
//! editor tree relies on for stable rebuilds.

use crate::iri::Iri;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A literal value: lexical form plus optional datatype and language tag
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form as written
    pub lexical: String,
    /// Datatype IRI, absent for plain literals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,
    /// Language tag (e.g. "en"), only on plain literals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Literal {
    /// Plain (untyped, untagged) literal
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            lang: None,
        }
    }

    /// Typed literal
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype),
            lang: None,
        }
    }
}

/// Polymorphic RDF value
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Named resource
    Iri(Iri),
    /// Anonymous (blank) node, identified by a scoped label
    Blank(Arc<str>),
    /// Literal value
    Literal(Literal),
}

impl Term {
    /// Create a blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::Blank(Arc::from(label.as_ref()))
    }

    /// Create a plain literal term
    pub fn literal(lexical: impl Into<String>) -> Self {
        Term::Literal(Literal::plain(lexical))
    }

    /// Create a typed literal term
    pub fn typed_literal(lexical: impl Into<String>, datatype: Iri) -> Self {
        Term::Literal(Literal::typed(lexical, datatype))
    }

    /// Check if this is a named or anonymous resource
    pub fn is_resource(&self) -> bool {
        matches!(self, Term::Iri(_) | Term::Blank(_))
    }

    /// Check if this is an anonymous (non-addressable) node
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Try to get as IRI
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get as literal
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Displayed text: literal lexical form, IRI local name, or blank label
    ///
    /// This is the text the deterministic sort uses in the absence of a
    /// label service.
    pub fn display_text(&self) -> &str {
        match self {
            Term::Iri(iri) => iri.local_name(),
            Term::Blank(label) => label,
            Term::Literal(lit) => &lit.lexical,
        }
    }

    fn type_discriminant(&self) -> u8 {
        match self {
            Term::Iri(_) => 0,
            Term::Blank(_) => 1,
            Term::Literal(_) => 2,
        }
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a.cmp(b),
            (Term::Blank(a), Term::Blank(b)) => a.cmp(b),
            (Term::Literal(a), Term::Literal(b)) => a.cmp(b),
            _ => self.type_discriminant().cmp(&other.type_discriminant()),
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(label) => write!(f, "_:{label}"),
            Term::Literal(lit) => {
                write!(f, "\"{}\"", lit.lexical)?;
                if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{dt}>")?;
                } else if let Some(lang) = &lit.lang {
                    write!(f, "@{lang}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}
