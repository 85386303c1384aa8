//! IRI - resource identifier
//!
//! An `Iri` wraps the full IRI text in an `Arc<str>` so clones are cheap and
//! the same identifier can be shared between the tree, pending changes, and
//! configuration maps without copying.
//!
//! ## Ordering
//!
//! IRIs use strict total ordering over the full text, which keeps sorted
//! collections (and the deterministic tree ordering built on top of them)
//! stable across rebuilds.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Resource identifier backed by a shared string
///
/// Serializes as a plain JSON string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri {
    text: Arc<str>,
}

impl Iri {
    /// Create a new IRI without validation
    ///
    /// Use [`Iri::parse`] for user-supplied input.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: Arc::from(text.as_ref()),
        }
    }

    /// Parse user input as an IRI.
    ///
    /// Accepts any non-empty string containing a scheme separator (`:`) with
    /// no whitespace. This matches what the workbench accepts as a property
    /// identifier; full RFC 3987 validation is the namespace service's job.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_iri("empty input"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(Error::invalid_iri(format!(
                "'{trimmed}' contains whitespace"
            )));
        }
        let colon = trimmed
            .find(':')
            .ok_or_else(|| Error::invalid_iri(format!("'{trimmed}' has no scheme or prefix")))?;
        if colon == 0 {
            return Err(Error::invalid_iri(format!("'{trimmed}' has an empty scheme")));
        }
        Ok(Self::new(trimmed))
    }

    /// Get the full IRI text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Local name: the part after the last `#` or `/` (or the full text)
    ///
    /// Used as the display text for IRIs when no label is available.
    pub fn local_name(&self) -> &str {
        let text: &str = &self.text;
        match text.rfind(['#', '/']) {
            Some(pos) if pos + 1 < text.len() => &text[pos + 1..],
            _ => text,
        }
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl Serialize for Iri {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Iri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Iri::new(s))
    }
}
