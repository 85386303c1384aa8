//! Tree nodes - arena-allocated, ordered, paginated child containers
//!
//! The tree is an arena of nodes addressed by [`NodeId`] handles. Each node
//! owns its ordered child list; the parent handle is navigation only, never
//! an ownership edge. A key→position index gives O(1) child lookup.
//!
//! Child lists are small (bounded by the page size), so the index is rebuilt
//! wholesale after structural mutation instead of being patched in place.
//!
//! Pagination: a node materializes children up to its reveal window; the
//! window grows by `increment` per expansion request.

use crate::key::NodeKey;
use graphel_core::{EditorStatement, PropertyInfo};
use rustc_hash::FxHashMap;
use std::fmt;

/// Handle to a node in the tree arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node kind discriminator with kind-specific payload
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// The tree root (the subject)
    Root,
    /// A grouping bucket; its value lives in the node key
    Cluster,
    /// One predicate with its direction
    Property(PropertyInfo),
    /// One concrete value attached to a property
    Statement(EditorStatement),
}

/// An ordered, paginated container of child nodes
#[derive(Clone, Debug)]
pub struct Node {
    /// Identity of this node within its parent
    pub key: NodeKey,
    /// Kind discriminator and payload
    pub kind: NodeKind,
    /// Parent handle, navigation only
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
    index: FxHashMap<NodeKey, usize>,
    revealed: usize,
    increment: usize,
}

impl Node {
    /// Create a node with an empty child list
    pub fn new(key: NodeKey, kind: NodeKind, parent: Option<NodeId>, increment: usize) -> Self {
        Self {
            key,
            kind,
            parent,
            children: Vec::new(),
            index: FxHashMap::default(),
            revealed: 0,
            increment,
        }
    }

    /// All materialized children, in order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of materialized children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Children inside the current reveal window
    pub fn visible_children(&self) -> &[NodeId] {
        &self.children[..self.revealed.min(self.children.len())]
    }

    /// Current reveal window size
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// How many more children one expansion request reveals
    pub fn increment(&self) -> usize {
        self.increment
    }

    /// Position of the child with this key, if present (O(1))
    pub fn child_position(&self, key: &NodeKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Append a child. The index keeps the first occurrence of a key, so
    /// duplicate statement values may coexist in the list while lookup
    /// stays deterministic.
    pub fn push_child(&mut self, id: NodeId, key: NodeKey) {
        let pos = self.children.len();
        self.children.push(id);
        self.index.entry(key).or_insert(pos);
    }

    /// Remove the child at a position; the caller must rebuild the index
    pub fn remove_child_at(&mut self, pos: usize) -> NodeId {
        let id = self.children.remove(pos);
        if self.revealed > self.children.len() {
            self.revealed = self.children.len();
        }
        self.index.clear();
        id
    }

    /// Rebuild the key→position index from the current child order.
    /// Keys must be supplied in child order; first occurrence wins.
    pub fn rebuild_index<I: IntoIterator<Item = NodeKey>>(&mut self, keys: I) {
        self.index.clear();
        for (pos, key) in keys.into_iter().enumerate() {
            self.index.entry(key).or_insert(pos);
        }
    }

    /// Reorder children; the caller must rebuild the index afterwards
    pub fn set_children(&mut self, children: Vec<NodeId>) {
        self.children = children;
        self.index.clear();
    }

    /// Grow the reveal window by one expansion step
    pub fn reveal_more(&mut self) {
        self.revealed = (self.revealed + self.increment).min(self.children.len());
    }

    /// Set the reveal window, clamped to the child count
    pub fn set_revealed(&mut self, n: usize) {
        self.revealed = n.min(self.children.len());
    }

    /// Reveal all materialized children
    pub fn reveal_all(&mut self) {
        self.revealed = self.children.len();
    }

    /// The property payload, if this is a property node
    pub fn property(&self) -> Option<&PropertyInfo> {
        match &self.kind {
            NodeKind::Property(info) => Some(info),
            _ => None,
        }
    }

    /// The statement payload, if this is a statement node
    pub fn statement(&self) -> Option<&EditorStatement> {
        match &self.kind {
            NodeKind::Statement(stmt) => Some(stmt),
            _ => None,
        }
    }

    /// Mutable statement payload, if this is a statement node
    pub fn statement_mut(&mut self) -> Option<&mut EditorStatement> {
        match &mut self.kind {
            NodeKind::Statement(stmt) => Some(stmt),
            _ => None,
        }
    }

    /// Check for the property kind
    pub fn is_property(&self) -> bool {
        matches!(self.kind, NodeKind::Property(_))
    }

    /// Check for the statement kind
    pub fn is_statement(&self) -> bool {
        matches!(self.kind, NodeKind::Statement(_))
    }
}
