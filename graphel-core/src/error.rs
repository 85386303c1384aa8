//! Error types for graphel-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Text that cannot be interpreted as an IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Lexical form that does not conform to its datatype
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid IRI error
    pub fn invalid_iri(msg: impl Into<String>) -> Self {
        Error::InvalidIri(msg.into())
    }

    /// Create an invalid literal error
    pub fn invalid_literal(msg: impl Into<String>) -> Self {
        Error::InvalidLiteral(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
