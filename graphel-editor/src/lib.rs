//! # Graphel Editor
//!
//! The clustered, transactionally-edited triple tree backing the Graphel
//! entity editor: a hierarchical view model over one subject's triples
//! (subject → cluster bucket → property group → statement value) with lazy
//! pagination, deterministic ordering, per-property cardinality constraints,
//! placeholder properties, and an all-or-nothing commit protocol.
//!
//! The tree reads through a [`TripleSource`] and writes through a
//! [`StatementStore`]; both are external collaborators. [`MemoryWorkbench`]
//! implements both in memory for tests and demos.
//!
//! ```
//! use graphel_core::{Iri, Term, Triple};
//! use graphel_editor::{ChangeKind, EditorOptions, EditorTree, MemoryWorkbench};
//! use graphel_core::Direction;
//!
//! # fn main() -> graphel_editor::Result<()> {
//! let mut workbench = MemoryWorkbench::new();
//! let alice = Term::Iri(Iri::new("ex:alice"));
//! workbench.insert(Triple::new(
//!     alice.clone(),
//!     Iri::new("ex:name"),
//!     Term::literal("Alice"),
//! ));
//!
//! let source = workbench.source_for(alice.clone());
//! let mut tree = EditorTree::build(alice, EditorOptions::default(), &source, &workbench)?;
//! drop(source);
//!
//! let name = tree
//!     .property_node(&Iri::new("ex:name"), Direction::Outgoing)
//!     .unwrap();
//! tree.queue_change(name, ChangeKind::Add("Alicia".to_string()))?;
//! let receipt = tree.commit(&mut workbench)?;
//! assert_eq!(receipt.added, 1);
//! # Ok(())
//! # }
//! ```

pub mod cardinality;
pub mod error;
pub mod key;
pub mod memory;
pub mod node;
pub mod options;
pub mod sort;
pub mod source;
pub mod store;
pub mod tree;

// Re-exports
pub use cardinality::CardinalityChecker;
pub use error::{CardinalityBound, EditorError, Result, StoreError};
pub use key::NodeKey;
pub use memory::{MemoryWorkbench, SubjectView};
pub use node::{Node, NodeId, NodeKind};
pub use options::{ConstraintMap, EditorOptions, PropertyConstraint};
pub use source::{TripleSource, ALL_STATEMENTS};
pub use store::{SchemaInfo, StatementStore};
pub use tree::{ChangeKind, CommitReceipt, EditorTree, OPERATION_LABEL};
