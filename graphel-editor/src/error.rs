//! Editor error types
//!
//! Validation and cardinality failures are detected before any store call
//! and abort the whole pending batch with no side effects. Store failures
//! keep their category so callers can give differentiated guidance.

use graphel_core::Iri;
use thiserror::Error;

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Failure categories reported by the external statement store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store is read-only; write operations are not supported
    #[error("Write operations to the store are not supported (read only)")]
    Unsupported,

    /// A concurrent modification conflicts with the submitted batch
    #[error("Conflicting concurrent modification: {0}")]
    Conflict(String),

    /// Any other store failure
    #[error("Store failure: {0}")]
    Unspecified(String),
}

/// The cardinality bound a batch would newly violate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalityBound {
    /// Count would newly fall below the configured minimum
    Min(u32),
    /// Count would newly exceed the configured maximum
    Max(u32),
}

impl std::fmt::Display for CardinalityBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardinalityBound::Min(n) => write!(f, "min={n}"),
            CardinalityBound::Max(n) => write!(f, "max={n}"),
        }
    }
}

/// Editor errors
#[derive(Error, Debug)]
pub enum EditorError {
    /// Unparsable or inadmissible input on an add/change, naming the field
    #[error("Invalid input for {field}: {reason}")]
    Validation {
        /// Predicate (or field) the offending input belongs to
        field: String,
        /// What was wrong with the input
        reason: String,
    },

    /// A pending batch would newly violate a configured cardinality bound
    #[error("Property {predicate} violates cardinality bound {bound}")]
    Cardinality {
        /// The constrained predicate
        predicate: Iri,
        /// The violated bound
        bound: CardinalityBound,
    },

    /// The store rejected the batch; category preserved
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Bad editor configuration (duplicate property entries, bad identifiers)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Triple source evaluation failure at build or expansion time
    #[error("Query evaluation error: {0}")]
    Query(String),

    /// Core data type error
    #[error(transparent)]
    Core(#[from] graphel_core::Error),
}

impl EditorError {
    /// Create a validation error for a field
    pub fn validation(field: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        EditorError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        EditorError::Config(msg.into())
    }

    /// Create a query evaluation error
    pub fn query(msg: impl Into<String>) -> Self {
        EditorError::Query(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_message_names_predicate_and_bound() {
        let err = EditorError::Cardinality {
            predicate: Iri::new("ex:status"),
            bound: CardinalityBound::Max(2),
        };
        let msg = err.to_string();
        assert!(msg.contains("ex:status"));
        assert!(msg.contains("max=2"));
    }

    #[test]
    fn store_category_is_preserved() {
        let err: EditorError = StoreError::Unsupported.into();
        assert!(matches!(
            err,
            EditorError::Store(StoreError::Unsupported)
        ));
    }
}
