//! Commit protocol: validation, cardinality, reconciliation, failure modes

use graphel_core::{Datatype, Direction, Iri, Term, Triple};
use graphel_editor::{
    CardinalityBound, ChangeKind, EditorError, EditorOptions, EditorTree, MemoryWorkbench,
    NodeId, NodeKey, PropertyConstraint, SchemaInfo, StoreError,
};
use graphel_vocab::rdf;

fn iri(text: &str) -> Iri {
    Iri::new(text)
}

fn res(text: &str) -> Term {
    Term::Iri(Iri::new(text))
}

fn triple(s: &str, p: &str, o: Term) -> Triple {
    Triple::new(res(s), iri(p), o)
}

fn build(workbench: &MemoryWorkbench, subject: &str, options: EditorOptions) -> EditorTree {
    let source = workbench.source_for(res(subject));
    EditorTree::build(res(subject), options, &source, workbench).unwrap()
}

fn outgoing(tree: &EditorTree, predicate: &str) -> NodeId {
    tree.property_node(&iri(predicate), Direction::Outgoing)
        .unwrap()
}

fn statement_node(tree: &EditorTree, property: NodeId, value: Term) -> NodeId {
    tree.find_child(
        property,
        &NodeKey::Statement {
            value,
            direction: Direction::Outgoing,
        },
    )
    .unwrap()
}

fn status_options(min: Option<u32>, max: Option<u32>) -> EditorOptions {
    let mut constraint = PropertyConstraint::new(iri("ex:status"));
    constraint.min_cardinality = min;
    constraint.max_cardinality = max;
    EditorOptions {
        constraints: vec![constraint],
        ..Default::default()
    }
}

#[test]
fn empty_add_is_dropped_without_store_call() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:name", Term::literal("Alice")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:name");
    tree.queue_change(prop, ChangeKind::Add("   ".to_string()))
        .unwrap();

    let receipt = tree.commit(&mut wb).unwrap();
    assert_eq!(receipt.added, 0);
    assert!(receipt.provenance.is_none());
    assert_eq!(wb.commits(), 0);
    assert_eq!(tree.node(prop).child_count(), 1);
}

#[test]
fn noop_change_is_dropped_without_store_call() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:name", Term::literal("Alice")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:name");
    let node = statement_node(&tree, prop, Term::literal("Alice"));
    tree.queue_change(node, ChangeKind::Change("Alice".to_string()))
        .unwrap();

    let receipt = tree.commit(&mut wb).unwrap();
    assert_eq!(receipt.changed, 0);
    assert!(receipt.provenance.is_none());
    assert_eq!(wb.commits(), 0);
}

#[test]
fn add_beyond_maximum_is_rejected_naming_the_bound() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:status", Term::literal("a")));
    wb.insert(triple("ex:alice", "ex:status", Term::literal("b")));

    let mut tree = build(&wb, "ex:alice", status_options(None, Some(2)));
    let prop = outgoing(&tree, "ex:status");
    tree.queue_change(prop, ChangeKind::Add("c".to_string()))
        .unwrap();

    let err = tree.commit(&mut wb).unwrap_err();
    match err {
        EditorError::Cardinality { predicate, bound } => {
            assert_eq!(predicate, iri("ex:status"));
            assert_eq!(bound, CardinalityBound::Max(2));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(wb.commits(), 0);
    assert_eq!(tree.node(prop).child_count(), 2);
}

#[test]
fn delete_below_minimum_is_rejected_but_passes_with_slack() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:status", Term::literal("a")));
    wb.insert(triple("ex:alice", "ex:status", Term::literal("b")));

    let mut tree = build(&wb, "ex:alice", status_options(Some(2), None));
    let prop = outgoing(&tree, "ex:status");
    let node = statement_node(&tree, prop, Term::literal("a"));
    tree.queue_change(node, ChangeKind::Delete).unwrap();

    let err = tree.commit(&mut wb).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Cardinality {
            bound: CardinalityBound::Min(2),
            ..
        }
    ));
    assert_eq!(tree.node(prop).child_count(), 2);

    // with a third value the same delete succeeds
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:status", Term::literal("a")));
    wb.insert(triple("ex:alice", "ex:status", Term::literal("b")));
    wb.insert(triple("ex:alice", "ex:status", Term::literal("c")));

    let mut tree = build(&wb, "ex:alice", status_options(Some(2), None));
    let prop = outgoing(&tree, "ex:status");
    let node = statement_node(&tree, prop, Term::literal("a"));
    tree.queue_change(node, ChangeKind::Delete).unwrap();

    let receipt = tree.commit(&mut wb).unwrap();
    assert_eq!(receipt.deleted, 1);
    assert_eq!(tree.node(prop).child_count(), 2);
}

#[test]
fn balanced_batch_commits_in_one_store_call() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:status", Term::literal("a")));
    wb.insert(triple("ex:alice", "ex:status", Term::literal("b")));

    let mut tree = build(&wb, "ex:alice", status_options(None, Some(2)));
    let prop = outgoing(&tree, "ex:status");
    let node = statement_node(&tree, prop, Term::literal("a"));
    tree.queue_change(node, ChangeKind::Delete).unwrap();
    tree.queue_change(prop, ChangeKind::Add("c".to_string()))
        .unwrap();

    let receipt = tree.commit(&mut wb).unwrap();
    assert_eq!(receipt.added, 1);
    assert_eq!(receipt.deleted, 1);
    assert_eq!(wb.commits(), 1);
    assert!(wb.contains(&triple("ex:alice", "ex:status", Term::literal("c"))));
    assert!(!wb.contains(&triple("ex:alice", "ex:status", Term::literal("a"))));
    assert_eq!(tree.node(prop).child_count(), 2);
}

#[test]
fn unconstrained_property_never_blocks() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:note", Term::literal("first")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:note");
    for i in 0..5 {
        tree.queue_change(prop, ChangeKind::Add(format!("note {i}")))
            .unwrap();
    }
    let node = statement_node(&tree, prop, Term::literal("first"));
    tree.queue_change(node, ChangeKind::Delete).unwrap();

    let receipt = tree.commit(&mut wb).unwrap();
    assert_eq!(receipt.added, 5);
    assert_eq!(receipt.deleted, 1);
}

#[test]
fn incoming_statements_are_immutable() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:bob", "ex:knows", res("ex:alice")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = tree
        .property_node(&iri("ex:knows"), Direction::Incoming)
        .unwrap();
    let node = tree.node(prop).children()[0];

    assert!(!tree.allow_adding(prop));
    assert!(!tree.allow_deletion(node, &wb));
    assert!(tree
        .queue_change(prop, ChangeKind::Add("ex:carol".to_string()))
        .is_err());
    assert!(tree.queue_change(node, ChangeKind::Delete).is_err());
    assert_eq!(wb.commits(), 0);
}

#[test]
fn anonymous_values_are_immutable() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:address", Term::blank("b0")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:address");
    let node = tree.node(prop).children()[0];

    assert!(!tree.allow_deletion(node, &wb));
    assert!(tree.queue_change(node, ChangeKind::Delete).is_err());
}

#[test]
fn non_editable_statements_reject_deletion_at_commit() {
    let mut wb = MemoryWorkbench::new();
    wb.insert_readonly(triple("ex:alice", "ex:name", Term::literal("Alice")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:name");
    let node = statement_node(&tree, prop, Term::literal("Alice"));

    assert!(!tree.allow_deletion(node, &wb));
    tree.queue_change(node, ChangeKind::Delete).unwrap();
    let err = tree.commit(&mut wb).unwrap_err();
    assert!(matches!(err, EditorError::Validation { .. }));
    assert_eq!(wb.commits(), 0);
    assert_eq!(tree.node(prop).child_count(), 1);
}

#[test]
fn unparsable_input_aborts_the_whole_batch() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:age", Term::literal("41")));

    let mut constraint = PropertyConstraint::new(iri("ex:age"));
    constraint.accepted_types = vec![Datatype::Integer];
    let options = EditorOptions {
        constraints: vec![constraint],
        ..Default::default()
    };
    let mut tree = build(&wb, "ex:alice", options);
    let prop = outgoing(&tree, "ex:age");
    tree.queue_change(prop, ChangeKind::Add("42".to_string()))
        .unwrap();
    tree.queue_change(prop, ChangeKind::Add("old".to_string()))
        .unwrap();

    let err = tree.commit(&mut wb).unwrap_err();
    match err {
        EditorError::Validation { field, .. } => assert_eq!(field, "ex:age"),
        other => panic!("unexpected error: {other}"),
    }
    // the parsable add in the same batch was not applied either
    assert_eq!(wb.commits(), 0);
    assert_eq!(tree.node(prop).child_count(), 1);
}

#[test]
fn committed_add_is_attached_with_provenance() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:knows", res("ex:bob")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:knows");
    tree.queue_change(prop, ChangeKind::Add("ex:carol".to_string()))
        .unwrap();

    let receipt = tree.commit(&mut wb).unwrap();
    assert_eq!(receipt.added, 1);
    let provenance = receipt.provenance.unwrap();

    let node = statement_node(&tree, prop, res("ex:carol"));
    let stmt = tree.node(node).statement().unwrap();
    assert_eq!(stmt.provenance.as_ref(), Some(&provenance));
    // the new value is immediately visible
    assert!(tree.node(prop).visible_children().contains(&node));
    assert_eq!(tree.pending_count(), 0);
}

#[test]
fn committed_change_updates_value_and_key_in_place() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:name", Term::literal("Alice")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:name");
    let node = statement_node(&tree, prop, Term::literal("Alice"));
    tree.queue_change(node, ChangeKind::Change("Alicia".to_string()))
        .unwrap();

    let receipt = tree.commit(&mut wb).unwrap();
    assert_eq!(receipt.changed, 1);
    assert!(wb.contains(&triple("ex:alice", "ex:name", Term::literal("Alicia"))));
    assert!(!wb.contains(&triple("ex:alice", "ex:name", Term::literal("Alice"))));

    // same node, updated key and payload
    assert_eq!(statement_node(&tree, prop, Term::literal("Alicia")), node);
    assert!(tree
        .find_child(
            prop,
            &NodeKey::Statement {
                value: Term::literal("Alice"),
                direction: Direction::Outgoing,
            }
        )
        .is_none());
}

#[test]
fn committed_delete_removes_node_and_index_entry() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:status", Term::literal("a")));
    wb.insert(triple("ex:alice", "ex:status", Term::literal("b")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:status");
    let node = statement_node(&tree, prop, Term::literal("a"));
    tree.queue_change(node, ChangeKind::Delete).unwrap();

    let receipt = tree.commit(&mut wb).unwrap();
    assert_eq!(receipt.deleted, 1);
    assert_eq!(tree.node(prop).child_count(), 1);
    assert!(tree
        .find_child(
            prop,
            &NodeKey::Statement {
                value: Term::literal("a"),
                direction: Direction::Outgoing,
            }
        )
        .is_none());
    assert!(statement_node(&tree, prop, Term::literal("b")) != node);
}

#[test]
fn committed_edits_mirror_across_clusters() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", rdf::TYPE, res("ex:Person")));
    wb.insert(triple("ex:alice", rdf::TYPE, res("ex:Employee")));
    wb.insert(triple("ex:alice", "ex:worksAt", res("ex:acme")));
    wb.set_schema(
        iri("ex:worksAt"),
        SchemaInfo::with_domains([res("ex:Person"), res("ex:Employee")]),
    );

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let peers: Vec<NodeId> = tree
        .property_nodes()
        .into_iter()
        .filter(|id| {
            tree.node(*id)
                .property()
                .map(|info| info.predicate == iri("ex:worksAt"))
                .unwrap_or(false)
        })
        .collect();
    assert_eq!(peers.len(), 2);

    // an add through one peer lands under both
    tree.queue_change(peers[0], ChangeKind::Add("ex:initech".to_string()))
        .unwrap();
    tree.commit(&mut wb).unwrap();
    for peer in &peers {
        assert_eq!(tree.node(*peer).child_count(), 2);
        let node = statement_node(&tree, *peer, res("ex:initech"));
        assert!(tree.node(*peer).visible_children().contains(&node));
    }

    // a delete through one peer removes it from both
    let node = statement_node(&tree, peers[1], res("ex:acme"));
    tree.queue_change(node, ChangeKind::Delete).unwrap();
    tree.commit(&mut wb).unwrap();
    for peer in &peers {
        assert_eq!(tree.node(*peer).child_count(), 1);
        assert!(tree
            .find_child(
                *peer,
                &NodeKey::Statement {
                    value: res("ex:acme"),
                    direction: Direction::Outgoing,
                }
            )
            .is_none());
    }
}

#[test]
fn committed_add_is_revealed_on_paginated_property() {
    let mut wb = MemoryWorkbench::new();
    for i in 0..5 {
        wb.insert(triple("ex:alice", "ex:note", Term::literal(format!("n{i}"))));
    }

    let options = EditorOptions {
        initial_page_size: 3,
        ..Default::default()
    };
    let mut tree = build(&wb, "ex:alice", options);
    let prop = outgoing(&tree, "ex:note");
    assert_eq!(tree.node(prop).visible_children().len(), 3);

    tree.queue_change(prop, ChangeKind::Add("latest".to_string()))
        .unwrap();
    tree.commit(&mut wb).unwrap();

    // the new statement itself becomes visible, not a previously hidden one
    let node = statement_node(&tree, prop, Term::literal("latest"));
    assert!(tree.node(prop).visible_children().contains(&node));
    assert_eq!(tree.node(prop).visible_children().len(), 4);
}

#[test]
fn read_only_store_failure_leaves_tree_untouched() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:name", Term::literal("Alice")));
    wb.set_read_only(true);

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:name");
    tree.queue_change(prop, ChangeKind::Add("Alicia".to_string()))
        .unwrap();

    let err = tree.commit(&mut wb).unwrap_err();
    assert!(matches!(err, EditorError::Store(StoreError::Unsupported)));
    assert_eq!(tree.node(prop).child_count(), 1);
    // the batch is terminal either way
    assert_eq!(tree.pending_count(), 0);
}

#[test]
fn conflicting_store_failure_keeps_its_category() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:name", Term::literal("Alice")));
    wb.set_conflicting(true);

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:name");
    tree.queue_change(prop, ChangeKind::Add("Alicia".to_string()))
        .unwrap();

    let err = tree.commit(&mut wb).unwrap_err();
    assert!(matches!(err, EditorError::Store(StoreError::Conflict(_))));
    assert_eq!(tree.node(prop).child_count(), 1);
    assert_eq!(wb.len(), 1);
}

#[test]
fn discarding_pending_changes_has_no_external_effect() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:name", Term::literal("Alice")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let prop = outgoing(&tree, "ex:name");
    tree.queue_change(prop, ChangeKind::Add("Alicia".to_string()))
        .unwrap();
    assert_eq!(tree.pending_count(), 1);

    tree.discard_pending();
    assert_eq!(tree.pending_count(), 0);
    let receipt = tree.commit(&mut wb).unwrap();
    assert!(receipt.provenance.is_none());
    assert_eq!(wb.commits(), 0);
}

#[test]
fn single_edit_fast_path_preserves_the_queued_batch() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:name", Term::literal("Alice")));
    wb.insert(triple("ex:alice", "ex:note", Term::literal("draft")));

    let mut tree = build(&wb, "ex:alice", EditorOptions::default());
    let name = outgoing(&tree, "ex:name");
    let note = outgoing(&tree, "ex:note");

    tree.queue_change(name, ChangeKind::Add("Alicia".to_string()))
        .unwrap();

    let receipt = tree
        .apply_single(note, ChangeKind::Add("final".to_string()), &mut wb)
        .unwrap();
    assert_eq!(receipt.added, 1);
    assert!(wb.contains(&triple("ex:alice", "ex:note", Term::literal("final"))));
    // the separately queued add is still pending, not committed
    assert!(!wb.contains(&triple("ex:alice", "ex:name", Term::literal("Alicia"))));
    assert_eq!(tree.pending_count(), 1);
}

#[test]
fn allow_adding_respects_configured_maximum() {
    let mut wb = MemoryWorkbench::new();
    wb.insert(triple("ex:alice", "ex:status", Term::literal("a")));

    let tree = build(&wb, "ex:alice", status_options(None, Some(1)));
    let prop = outgoing(&tree, "ex:status");
    assert!(!tree.allow_adding(prop));

    let tree = build(&wb, "ex:alice", status_options(None, Some(2)));
    let prop = outgoing(&tree, "ex:status");
    assert!(tree.allow_adding(prop));
}

#[test]
fn delete_all_editable_clears_only_editable_outgoing_data() {
    let mut wb = MemoryWorkbench::new();
    for i in 0..5 {
        wb.insert(triple("ex:alice", "ex:note", Term::literal(format!("n{i}"))));
    }
    wb.insert_readonly(triple("ex:alice", "ex:name", Term::literal("Alice")));
    wb.insert(triple("ex:bob", "ex:knows", res("ex:alice")));

    // page size below the value count, so the remainder must be materialized
    let options = EditorOptions {
        initial_page_size: 3,
        ..Default::default()
    };
    let mut tree = build(&wb, "ex:alice", options);
    assert_eq!(tree.node(outgoing(&tree, "ex:note")).child_count(), 4);

    // an owned snapshot so the workbench can be mutably borrowed as the store
    let snapshot = OwnedSnapshot::capture(&wb, res("ex:alice"));
    let receipt = tree.delete_all_editable(&snapshot, &mut wb).unwrap();

    assert_eq!(receipt.deleted, 5);
    // read-only and incoming statements survive
    assert!(wb.contains(&triple("ex:alice", "ex:name", Term::literal("Alice"))));
    assert!(wb.contains(&triple("ex:bob", "ex:knows", res("ex:alice"))));
    assert_eq!(wb.len(), 2);
}

/// Snapshot of a subject's statements, owning its data so it can coexist
/// with a mutable borrow of the workbench
struct OwnedSnapshot {
    infos: Vec<graphel_core::PropertyInfo>,
    statements: Vec<graphel_core::EditorStatement>,
}

impl OwnedSnapshot {
    fn capture(wb: &MemoryWorkbench, subject: Term) -> Self {
        use graphel_editor::TripleSource;
        let view = wb.source_for(subject);
        let infos = view.property_infos().unwrap();
        let mut statements = Vec::new();
        for info in &infos {
            statements.extend(
                view.statements_for_property(info, 0, graphel_editor::ALL_STATEMENTS)
                    .unwrap(),
            );
        }
        Self { infos, statements }
    }
}

impl graphel_editor::TripleSource for OwnedSnapshot {
    fn property_infos(&self) -> graphel_editor::Result<Vec<graphel_core::PropertyInfo>> {
        Ok(self.infos.clone())
    }

    fn statement_preview(
        &self,
        limit: usize,
    ) -> graphel_editor::Result<Vec<graphel_core::EditorStatement>> {
        let mut out = Vec::new();
        for info in &self.infos {
            out.extend(
                self.statements
                    .iter()
                    .filter(|s| s.property == *info)
                    .take(limit)
                    .cloned(),
            );
        }
        Ok(out)
    }

    fn statements_for_property(
        &self,
        property: &graphel_core::PropertyInfo,
        offset: usize,
        limit: usize,
    ) -> graphel_editor::Result<Vec<graphel_core::EditorStatement>> {
        Ok(self
            .statements
            .iter()
            .filter(|s| s.property.predicate == property.predicate
                && s.property.direction == property.direction)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
