//! # Graphel Core
//!
//! Fundamental data types for the Graphel entity-editor core:
//!
//! - [`Iri`] - cheap-to-clone resource identifier
//! - [`Term`] - polymorphic RDF value (IRI / blank node / literal)
//! - [`Triple`], [`EditorStatement`], [`Provenance`] - facts and their editor view
//! - [`PropertyInfo`], [`Direction`] - predicate descriptors
//! - [`Datatype`] - input validation against accepted types

pub mod datatype;
pub mod error;
pub mod iri;
pub mod property;
pub mod term;
pub mod triple;

// Re-exports
pub use datatype::{parse_accepted, Datatype};
pub use error::{Error, Result};
pub use iri::Iri;
pub use property::{Direction, PropertyInfo};
pub use term::{Literal, Term};
pub use triple::{EditorStatement, Provenance, Triple};
