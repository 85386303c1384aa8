//! Editor tree - construction, pending edits, and the commit protocol
//!
//! One `EditorTree` per editing session, built once from a triple source
//! snapshot: subject → cluster buckets → property groups → statement values,
//! with placeholder properties injected after real data and a deterministic
//! sort applied to clusters and properties.
//!
//! Edits are queued against existing nodes without mutating them. A commit
//! validates everything first (input parsing, editability, cardinality), then
//! makes a single store call, and only on success reconciles the tree in
//! place. On any failure the tree is left exactly as it was; the queued batch
//! is consumed either way and queuing starts a fresh batch.

use crate::cardinality::CardinalityChecker;
use crate::error::{EditorError, Result};
use crate::key::NodeKey;
use crate::node::{Node, NodeId, NodeKind};
use crate::options::{ConstraintMap, EditorOptions};
use crate::sort::{
    cluster_cmp, property_cmp, INCOMING_DEFAULT_BUCKET, INCOMING_LITERAL_BUCKET,
    OUTGOING_DEFAULT_BUCKET,
};
use crate::source::{TripleSource, ALL_STATEMENTS};
use crate::store::StatementStore;
use graphel_core::{
    parse_accepted, Datatype, Direction, EditorStatement, Iri, PropertyInfo, Provenance, Term,
    Triple,
};
use graphel_vocab::buckets;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use tracing::debug;

/// Operation label the commit protocol passes to the store
pub const OPERATION_LABEL: &str = "data-input-form";

/// One queued edit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// Add a new value (raw input text) under a property node
    Add(String),
    /// Delete the statement node's underlying triple
    Delete,
    /// Replace the statement node's value with the parsed input text
    Change(String),
}

/// A queued edit bound to its target node
#[derive(Clone, Debug)]
struct PendingChange {
    node: NodeId,
    kind: ChangeKind,
}

/// Outcome of a successful commit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Provenance the store assigned; `None` when the batch emptied out
    /// during validation and no store call was made
    pub provenance: Option<Provenance>,
    /// Number of statements added
    pub added: usize,
    /// Number of statements deleted
    pub deleted: usize,
    /// Number of statements changed in place
    pub changed: usize,
}

/// The clustered, transactionally-edited triple tree
pub struct EditorTree {
    subject: Term,
    options: EditorOptions,
    constraints: ConstraintMap,
    arena: Vec<Node>,
    root: NodeId,
    pending: Vec<PendingChange>,
}

impl EditorTree {
    /// Build the tree from a source snapshot: grouping, placeholder
    /// injection, then the deterministic sort.
    pub fn build<S: TripleSource, T: StatementStore>(
        subject: Term,
        options: EditorOptions,
        source: &S,
        store: &T,
    ) -> Result<Self> {
        let constraints = options.constraint_map()?;
        let root_key = NodeKey::plain(subject.clone());
        let increment = options.page_increment;
        let mut tree = Self {
            subject,
            options,
            constraints,
            arena: vec![Node::new(root_key, NodeKind::Root, None, increment)],
            root: NodeId(0),
            pending: Vec::new(),
        };
        tree.load(source, store)?;
        Ok(tree)
    }

    fn load<S: TripleSource, T: StatementStore>(&mut self, source: &S, store: &T) -> Result<()> {
        let infos = source.property_infos()?;
        for info in &infos {
            if self.property_allowed(info) {
                self.ensure_property_group(info.clone());
            }
        }

        let preview = source.statement_preview(self.options.initial_page_size + 1)?;
        for stmt in preview {
            if self.property_allowed(&stmt.property) {
                // the statement appears under every cluster its property
                // files under
                for prop in self.ensure_property_group(stmt.property.clone()) {
                    self.attach_statement(prop, stmt.clone());
                }
            }
        }

        self.inject_placeholders(store);
        self.sort_tree();

        debug!(
            clusters = self.arena[self.root.0].child_count(),
            subject = %self.subject,
            "editor tree built"
        );
        Ok(())
    }

    fn property_allowed(&self, info: &PropertyInfo) -> bool {
        if info.direction == Direction::Incoming && !self.options.show_inverse_properties {
            return false;
        }
        if self.options.limit_to_configured && !self.constraints.contains(&info.predicate) {
            return false;
        }
        true
    }

    /// Cluster buckets a property files under, falling back to the reserved
    /// default bucket of its direction
    fn resolved_clusters(&self, info: &PropertyInfo) -> Vec<Term> {
        if self.options.cluster_by_domain && !info.cluster_values.is_empty() {
            info.cluster_values.iter().cloned().collect()
        } else {
            vec![self.default_bucket(info.direction)]
        }
    }

    fn default_bucket(&self, direction: Direction) -> Term {
        match direction {
            Direction::Outgoing => OUTGOING_DEFAULT_BUCKET.clone(),
            Direction::Incoming if self.subject.is_literal() => INCOMING_LITERAL_BUCKET.clone(),
            Direction::Incoming => INCOMING_DEFAULT_BUCKET.clone(),
        }
    }

    /// Locate or create the cluster node for a bucket value
    fn ensure_cluster(&mut self, bucket: Term) -> NodeId {
        let key = NodeKey::plain(bucket);
        if let Some(id) = self.find_child(self.root, &key) {
            return id;
        }
        let id = self.alloc(Node::new(
            key.clone(),
            NodeKind::Cluster,
            Some(self.root),
            self.options.page_increment,
        ));
        self.arena[self.root.0].push_child(id, key);
        self.arena[self.root.0].reveal_all();
        id
    }

    /// Locate or create the property node under every resolved cluster,
    /// returning the nodes in cluster order
    fn ensure_property_group(&mut self, info: PropertyInfo) -> Vec<NodeId> {
        let clusters = self.resolved_clusters(&info);
        let key = NodeKey::property(&info);
        let mut ids = Vec::with_capacity(clusters.len());
        for bucket in clusters {
            let cluster = self.ensure_cluster(bucket);
            let id = match self.find_child(cluster, &key) {
                Some(id) => id,
                None => {
                    let id = self.alloc(Node::new(
                        key.clone(),
                        NodeKind::Property(info.clone()),
                        Some(cluster),
                        self.options.page_increment,
                    ));
                    self.arena[cluster.0].push_child(id, key.clone());
                    self.arena[cluster.0].reveal_all();
                    id
                }
            };
            ids.push(id);
        }
        ids
    }

    /// Every property node sharing this node's key: the same predicate and
    /// direction filed under different clusters
    fn property_peers(&self, property: NodeId) -> Vec<NodeId> {
        let key = self.arena[property.0].key.clone();
        self.property_nodes()
            .into_iter()
            .filter(|id| self.arena[id.0].key == key)
            .collect()
    }

    fn attach_statement(&mut self, property: NodeId, stmt: EditorStatement) -> NodeId {
        let key = NodeKey::statement(&stmt);
        let id = self.alloc(Node::new(
            key.clone(),
            NodeKind::Statement(stmt),
            Some(property),
            self.options.page_increment,
        ));
        self.arena[property.0].push_child(id, key);
        id
    }

    /// Attach a committed statement and make it visible: the node is placed
    /// at the reveal boundary rather than after hidden children, so growing
    /// the window by one reveals the new statement itself
    fn attach_committed(&mut self, property: NodeId, stmt: EditorStatement) {
        let id = self.attach_statement(property, stmt);
        let mut children = self.arena[property.0].children().to_vec();
        children.pop();
        let revealed = self.arena[property.0].revealed();
        let pos = revealed.min(children.len());
        children.insert(pos, id);
        self.arena[property.0].set_children(children);
        self.arena[property.0].set_revealed(revealed + 1);
        self.rebuild_index_of(property);
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.arena.len());
        self.arena.push(node);
        id
    }

    /// Inject empty property groups for configured always-show predicates
    /// and, when enabled, schema-suggested predicates
    fn inject_placeholders<T: StatementStore>(&mut self, store: &T) {
        let present: FxHashSet<Iri> = self
            .property_nodes()
            .into_iter()
            .filter_map(|id| self.arena[id.0].property())
            .filter(|info| info.is_outgoing())
            .map(|info| info.predicate.clone())
            .collect();

        let mut candidates: Vec<Iri> = self
            .constraints
            .show_always_predicates()
            .filter(|p| !present.contains(p))
            .cloned()
            .collect();

        let types = store.subject_types(&self.subject);
        if self.options.show_suggested {
            for predicate in store.suggested_predicates(&types) {
                if !present.contains(&predicate) && !candidates.contains(&predicate) {
                    candidates.push(predicate);
                }
            }
        }

        for predicate in candidates {
            let schema = store.property_schema(&predicate);
            let clusters: BTreeSet<Term> = schema
                .domains
                .intersection(&types)
                .cloned()
                .collect();
            let info = PropertyInfo::new(predicate.clone(), Direction::Outgoing, clusters);
            if self.property_allowed(&info) {
                self.ensure_property_group(info);
                debug!(predicate = %predicate, "placeholder property injected");
            }
        }
    }

    /// Sort clusters under the root and properties within each cluster,
    /// rebuild the indices, and set the initial reveal windows
    fn sort_tree(&mut self) {
        let mut clusters = self.arena[self.root.0].children().to_vec();
        clusters.sort_by(|a, b| cluster_cmp(self.plain_term(*a), self.plain_term(*b)));
        let keys: Vec<NodeKey> = clusters.iter().map(|id| self.arena[id.0].key.clone()).collect();
        self.arena[self.root.0].set_children(clusters.clone());
        self.arena[self.root.0].rebuild_index(keys);
        self.arena[self.root.0].reveal_all();

        let order = self.constraints.sort_order().clone();
        for cluster in clusters {
            let mut props = self.arena[cluster.0].children().to_vec();
            props.sort_by(|a, b| {
                match (self.arena[a.0].property(), self.arena[b.0].property()) {
                    (Some(pa), Some(pb)) => property_cmp(pa, pb, &order),
                    _ => a.0.cmp(&b.0),
                }
            });
            let keys: Vec<NodeKey> = props.iter().map(|id| self.arena[id.0].key.clone()).collect();
            self.arena[cluster.0].set_children(props.clone());
            self.arena[cluster.0].rebuild_index(keys);
            self.arena[cluster.0].reveal_all();

            for prop in props {
                let node = &mut self.arena[prop.0];
                let page = self.options.initial_page_size.min(node.child_count());
                node.set_revealed(page);
            }
        }
    }

    fn plain_term(&self, id: NodeId) -> &Term {
        match &self.arena[id.0].key {
            NodeKey::Plain(term) => term,
            // clusters always carry plain keys; fall back to the subject
            _ => &self.subject,
        }
    }

    // ---- lookup -----------------------------------------------------------

    /// The root node handle
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The subject this tree describes
    pub fn subject(&self) -> &Term {
        &self.subject
    }

    /// Borrow a node by handle
    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id.0]
    }

    /// The existing child of `parent` with this key, O(1)
    pub fn find_child(&self, parent: NodeId, key: &NodeKey) -> Option<NodeId> {
        let node = &self.arena[parent.0];
        node.child_position(key).map(|pos| node.children()[pos])
    }

    /// Depth-first search for a child key from `from` downwards
    pub fn find_child_recursive(&self, from: NodeId, key: &NodeKey) -> Option<NodeId> {
        if let Some(id) = self.find_child(from, key) {
            return Some(id);
        }
        for child in self.arena[from.0].children() {
            if let Some(id) = self.find_child_recursive(*child, key) {
                return Some(id);
            }
        }
        None
    }

    /// All property nodes, walking clusters in display order
    pub fn property_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for cluster in self.arena[self.root.0].children() {
            for prop in self.arena[cluster.0].children() {
                if self.arena[prop.0].is_property() {
                    out.push(*prop);
                }
            }
        }
        out
    }

    /// The property node for a predicate and direction, if present anywhere
    pub fn property_node(&self, predicate: &Iri, direction: Direction) -> Option<NodeId> {
        let key = NodeKey::Property {
            predicate: predicate.clone(),
            direction,
        };
        self.find_child_recursive(self.root, &key)
    }

    // ---- edit permissions -------------------------------------------------

    /// Whether a new value may be added under this property node
    pub fn allow_adding(&self, node: NodeId) -> bool {
        let Some(info) = self.arena[node.0].property() else {
            return false;
        };
        if !info.is_outgoing() {
            return false;
        }
        if let Some(constraint) = self.constraints.get(&info.predicate) {
            if let Some(max) = constraint.max_cardinality {
                let count = self.arena[node.0].child_count();
                if max == 1 && count >= 1 {
                    return false;
                }
                if count == max as usize {
                    return false;
                }
            }
        }
        true
    }

    /// Whether this statement node may be deleted
    pub fn allow_deletion<T: StatementStore>(&self, node: NodeId, store: &T) -> bool {
        let Some(stmt) = self.arena[node.0].statement() else {
            return false;
        };
        stmt.is_outgoing()
            && !stmt.display_value().is_blank()
            && store.is_editable(&stmt.triple)
    }

    // ---- pending edits ----------------------------------------------------

    /// Queue one edit against a node. Direction and anonymity rules are
    /// enforced here; editability and input parsing at commit time.
    pub fn queue_change(&mut self, node: NodeId, kind: ChangeKind) -> Result<()> {
        match &kind {
            ChangeKind::Add(_) => {
                let info = self.arena[node.0]
                    .property()
                    .ok_or_else(|| EditorError::validation(&self.arena[node.0].key, "target is not a property group"))?;
                if !info.is_outgoing() {
                    return Err(EditorError::validation(
                        &info.predicate,
                        "values can only be added to outgoing properties",
                    ));
                }
            }
            ChangeKind::Delete | ChangeKind::Change(_) => {
                let stmt = self.arena[node.0]
                    .statement()
                    .ok_or_else(|| EditorError::validation(&self.arena[node.0].key, "target is not a statement"))?;
                if !stmt.is_outgoing() {
                    return Err(EditorError::validation(
                        &stmt.triple.predicate,
                        "incoming statements are read-only",
                    ));
                }
                if stmt.display_value().is_blank() {
                    return Err(EditorError::validation(
                        &stmt.triple.predicate,
                        "anonymous values are read-only",
                    ));
                }
            }
        }
        self.pending.push(PendingChange { node, kind });
        Ok(())
    }

    /// Number of queued edits
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drop every queued edit without external effect
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    // ---- commit protocol --------------------------------------------------

    /// Validate the queued batch, submit it as one store call, and reconcile
    /// the tree in place on success.
    ///
    /// The batch is consumed whether it commits or is rejected; the tree is
    /// only mutated after the store call succeeds.
    pub fn commit<T: StatementStore>(&mut self, store: &mut T) -> Result<CommitReceipt> {
        let pending = std::mem::take(&mut self.pending);

        let mut adds: Vec<(NodeId, EditorStatement)> = Vec::new();
        let mut deletes: Vec<(NodeId, Triple)> = Vec::new();
        let mut changes: Vec<(NodeId, Triple, Triple)> = Vec::new();
        let mut checkers: FxHashMap<Iri, CardinalityChecker> = FxHashMap::default();

        for change in &pending {
            match &change.kind {
                ChangeKind::Add(text) => {
                    if text.trim().is_empty() {
                        debug!(node = %change.node, "dropping add with empty value");
                        continue;
                    }
                    let info = self.arena[change.node.0]
                        .property()
                        .cloned()
                        .ok_or_else(|| {
                            EditorError::validation(&self.arena[change.node.0].key, "target is not a property group")
                        })?;
                    let value = self.parse_value(&info.predicate, text, store)?;
                    let triple =
                        Triple::new(self.subject.clone(), info.predicate.clone(), value);
                    if let Some(checker) = touch_checker(
                        &self.subject,
                        &self.constraints,
                        &mut checkers,
                        &info.predicate,
                        store,
                    ) {
                        checker.record_add();
                    }
                    adds.push((change.node, EditorStatement::orphan(triple, info)));
                }
                ChangeKind::Delete => {
                    let stmt = self.statement_payload(change.node)?.clone();
                    self.require_editable(&stmt, store)?;
                    if let Some(checker) = touch_checker(
                        &self.subject,
                        &self.constraints,
                        &mut checkers,
                        &stmt.triple.predicate,
                        store,
                    ) {
                        checker.record_remove();
                    }
                    deletes.push((change.node, stmt.triple));
                }
                ChangeKind::Change(text) => {
                    let stmt = self.statement_payload(change.node)?.clone();
                    self.require_editable(&stmt, store)?;
                    let value = self.parse_value(&stmt.triple.predicate, text, store)?;
                    let new_triple = stmt.triple.with_object(value);
                    if new_triple == stmt.triple {
                        debug!(node = %change.node, "dropping no-op change");
                        continue;
                    }
                    // a change replaces in place, so cardinality is untouched
                    changes.push((change.node, stmt.triple, new_triple));
                }
            }
        }

        for checker in checkers.values() {
            checker.validate()?;
        }

        if adds.is_empty() && deletes.is_empty() && changes.is_empty() {
            debug!("batch empty after validation, skipping store call");
            return Ok(CommitReceipt {
                provenance: None,
                added: 0,
                deleted: 0,
                changed: 0,
            });
        }

        let add_triples: Vec<Triple> = adds.iter().map(|(_, s)| s.triple.clone()).collect();
        let delete_triples: Vec<Triple> = deletes.iter().map(|(_, t)| t.clone()).collect();
        let change_pairs: Vec<(Triple, Triple)> = changes
            .iter()
            .map(|(_, old, new)| (old.clone(), new.clone()))
            .collect();

        let provenance =
            store.commit(&add_triples, &delete_triples, &change_pairs, OPERATION_LABEL)?;

        let receipt = CommitReceipt {
            provenance: Some(provenance.clone()),
            added: adds.len(),
            deleted: deletes.len(),
            changed: changes.len(),
        };

        for (property, mut stmt) in adds {
            stmt.provenance = Some(provenance.clone());
            // the new statement lands under every cluster the property
            // files under
            for peer in self.property_peers(property) {
                self.attach_committed(peer, stmt.clone());
            }
        }
        for (node, _) in deletes {
            let key = self.arena[node.0].key.clone();
            let parent = self.arena[node.0].parent;
            self.detach(node);
            let Some(parent) = parent else { continue };
            for peer in self.property_peers(parent) {
                if peer == parent {
                    continue;
                }
                if let Some(mirror) = self.find_child(peer, &key) {
                    self.detach(mirror);
                }
            }
        }
        for (node, _, new_triple) in changes {
            let old_key = self.arena[node.0].key.clone();
            let parent = self.arena[node.0].parent;
            self.apply_change_to(node, new_triple.clone(), &provenance);
            let Some(parent) = parent else { continue };
            for peer in self.property_peers(parent) {
                if peer == parent {
                    continue;
                }
                if let Some(mirror) = self.find_child(peer, &old_key) {
                    self.apply_change_to(mirror, new_triple.clone(), &provenance);
                }
            }
        }

        debug!(
            added = receipt.added,
            deleted = receipt.deleted,
            changed = receipt.changed,
            provenance = %provenance,
            "batch committed"
        );
        Ok(receipt)
    }

    /// Single-field fast path: validate and persist exactly one edit,
    /// leaving any separately queued batch untouched
    pub fn apply_single<T: StatementStore>(
        &mut self,
        node: NodeId,
        kind: ChangeKind,
        store: &mut T,
    ) -> Result<CommitReceipt> {
        let saved = std::mem::take(&mut self.pending);
        if let Err(err) = self.queue_change(node, kind) {
            self.pending = saved;
            return Err(err);
        }
        let result = self.commit(store);
        self.pending = saved;
        result
    }

    /// Materialize and delete every outgoing, store-editable statement of
    /// the subject in one batch
    pub fn delete_all_editable<S: TripleSource, T: StatementStore>(
        &mut self,
        source: &S,
        store: &mut T,
    ) -> Result<CommitReceipt> {
        let props = self.property_nodes();
        for prop in &props {
            let Some(info) = self.arena[prop.0].property().cloned() else {
                continue;
            };
            if !info.is_outgoing() {
                continue;
            }
            let offset = self.arena[prop.0].child_count();
            let rest = source.statements_for_property(&info, offset, ALL_STATEMENTS)?;
            for stmt in rest {
                self.attach_statement(*prop, stmt);
            }
            self.arena[prop.0].reveal_all();
        }

        // statements mirrored under several clusters yield one delete each
        let mut seen: FxHashSet<Triple> = FxHashSet::default();
        let mut targets = Vec::new();
        for prop in &props {
            for child in self.arena[prop.0].children() {
                if !self.allow_deletion(*child, store) {
                    continue;
                }
                let Some(stmt) = self.arena[child.0].statement() else {
                    continue;
                };
                if seen.insert(stmt.triple.clone()) {
                    targets.push(*child);
                }
            }
        }

        let saved = std::mem::take(&mut self.pending);
        for target in targets {
            if let Err(err) = self.queue_change(target, ChangeKind::Delete) {
                self.pending = saved;
                return Err(err);
            }
        }
        let result = self.commit(store);
        self.pending = saved;
        result
    }

    // ---- pagination -------------------------------------------------------

    /// Fetch and reveal the next page of a property node's statements.
    ///
    /// Returns the number of newly visible statement nodes. Expansion is a
    /// no-op for non-property nodes, whose children are fully materialized
    /// at construction.
    pub fn expand<S: TripleSource>(&mut self, node: NodeId, source: &S) -> Result<usize> {
        let Some(info) = self.arena[node.0].property().cloned() else {
            return Ok(0);
        };
        let offset = self.arena[node.0].child_count();
        let limit = self.arena[node.0].increment();
        let fetched = source.statements_for_property(&info, offset, limit)?;
        debug!(property = %info, offset, fetched = fetched.len(), "expanded property page");
        let before = self.arena[node.0].visible_children().len();
        for stmt in fetched {
            self.attach_statement(node, stmt);
        }
        self.arena[node.0].reveal_more();
        Ok(self.arena[node.0].visible_children().len() - before)
    }

    // ---- new predicates ---------------------------------------------------

    /// Inject a fresh placeholder property for a predicate typed in by the
    /// user. Returns `None` if the predicate already has a property group
    /// anywhere in the tree.
    pub fn add_new_predicate(&mut self, identifier: &str) -> Result<Option<NodeId>> {
        let predicate = Iri::parse(identifier).map_err(|err| {
            EditorError::config(format!("not a valid predicate identifier: {err}"))
        })?;
        let key = NodeKey::Property {
            predicate: predicate.clone(),
            direction: Direction::Outgoing,
        };
        if self.find_child_recursive(self.root, &key).is_some() {
            return Ok(None);
        }
        let bucket = Term::literal(buckets::new_property(predicate.local_name()));
        let info = PropertyInfo::outgoing(predicate, bucket);
        let id = match self.ensure_property_group(info).into_iter().next() {
            Some(id) => id,
            None => return Ok(None),
        };
        debug!(node = %id, "new predicate injected");
        Ok(Some(id))
    }

    // ---- internals --------------------------------------------------------

    fn statement_payload(&self, node: NodeId) -> Result<&EditorStatement> {
        self.arena[node.0]
            .statement()
            .ok_or_else(|| EditorError::validation(&self.arena[node.0].key, "target is not a statement"))
    }

    fn require_editable<T: StatementStore>(
        &self,
        stmt: &EditorStatement,
        store: &T,
    ) -> Result<()> {
        if !store.is_editable(&stmt.triple) {
            return Err(EditorError::validation(
                &stmt.triple.predicate,
                "the statement is not editable",
            ));
        }
        Ok(())
    }

    /// Accepted datatypes for a predicate: explicit configuration first,
    /// otherwise derived from the store schema
    fn accepted_types<T: StatementStore>(&self, predicate: &Iri, store: &T) -> Vec<Datatype> {
        if let Some(constraint) = self.constraints.get(predicate) {
            if !constraint.accepted_types.is_empty() {
                return constraint.accepted_types.clone();
            }
        }
        store.property_schema(predicate).accepted_types(predicate)
    }

    fn parse_value<T: StatementStore>(
        &self,
        predicate: &Iri,
        text: &str,
        store: &T,
    ) -> Result<Term> {
        let accepted = self.accepted_types(predicate, store);
        parse_accepted(text, &accepted).ok_or_else(|| {
            EditorError::validation(
                predicate,
                format!("cannot interpret {text:?} as any accepted type"),
            )
        })
    }

    fn apply_change_to(&mut self, node: NodeId, new_triple: Triple, provenance: &Provenance) {
        let Some(stmt) = self.arena[node.0].statement_mut() else {
            return;
        };
        stmt.triple = new_triple;
        stmt.provenance = Some(provenance.clone());
        let new_key = NodeKey::statement(stmt);
        self.arena[node.0].key = new_key;
        self.rebuild_parent_index(node);
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.arena[node.0].parent else {
            return;
        };
        let pos = self.arena[parent.0]
            .children()
            .iter()
            .position(|id| *id == node);
        if let Some(pos) = pos {
            self.arena[parent.0].remove_child_at(pos);
            self.rebuild_index_of(parent);
        }
    }

    fn rebuild_parent_index(&mut self, node: NodeId) {
        if let Some(parent) = self.arena[node.0].parent {
            self.rebuild_index_of(parent);
        }
    }

    fn rebuild_index_of(&mut self, node: NodeId) {
        let keys: Vec<NodeKey> = self.arena[node.0]
            .children()
            .to_vec()
            .into_iter()
            .map(|id| self.arena[id.0].key.clone())
            .collect();
        self.arena[node.0].rebuild_index(keys);
    }
}

/// Checker for a predicate's bounds, created lazily on first touch and
/// seeded with the store's pre-batch count. Predicates without configured
/// bounds get no checker at all.
fn touch_checker<'a, T: StatementStore>(
    subject: &Term,
    constraints: &ConstraintMap,
    checkers: &'a mut FxHashMap<Iri, CardinalityChecker>,
    predicate: &Iri,
    store: &T,
) -> Option<&'a mut CardinalityChecker> {
    let constraint = constraints.get(predicate)?;
    if !constraint.has_cardinality_bounds() {
        return None;
    }
    Some(checkers.entry(predicate.clone()).or_insert_with(|| {
        CardinalityChecker::new(
            predicate.clone(),
            constraint.min_cardinality,
            constraint.max_cardinality,
            store.statement_count(subject, predicate),
        )
    }))
}
