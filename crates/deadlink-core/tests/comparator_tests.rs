//! Snapshot diffs in strict and union mode.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{date_object, edge_sets, foo_bar_object, paths_to, std_object};
use deadlink_core::object::{ObjectRef, Value};
use deadlink_core::snapshot::Edge;
use deadlink_core::{Comparator, DiffMode, RootAlias, Snapshot};

#[test]
fn test_the_same() {
    let object = foo_bar_object();
    let snapshot = Snapshot::make([("std", &object)]);

    let diff = Comparator::new().compare(&snapshot, &snapshot);

    assert_eq!(diff.count(), 0);
}

#[test]
fn test_identical_captures_taken_separately_are_equal() {
    let object = foo_bar_object();
    let before = Snapshot::make([("std", &object)]);
    let after = Snapshot::make([("std", &object)]);

    let diff = Comparator::new().compare_strict(&before, &after);

    assert!(diff.is_empty());
}

#[test]
fn test_different_states() {
    let object = foo_bar_object();
    let before = Snapshot::make([("std", &object)]);
    let baz = date_object();
    object.set("baz", Value::object(&baz));
    let after = Snapshot::make([("std", &object)]);

    let diff = Comparator::new().compare(&before, &after);

    assert_eq!(diff.count(), 1);
    let (node, edges) = diff.iter().next().unwrap();
    assert_eq!(node.type_name(), "DateTimeImmutable");
    assert!(node.ptr_eq(&ObjectRef::from(&baz)));
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].path(), Some("std.baz"));
    assert!(edges[0].source().unwrap().ptr_eq(&ObjectRef::from(&object)));
}

#[test]
fn test_nodes_only_in_before_are_reported() {
    let object = foo_bar_object();
    let baz = std_object();
    object.set("baz", Value::object(&baz));
    let before = Snapshot::make([("std", &object)]);
    object.unset("baz");
    let after = Snapshot::make([("std", &object)]);

    let diff = Comparator::new().compare(&before, &after);

    assert_eq!(diff.count(), 1);
    assert_eq!(paths_to(&diff, &ObjectRef::from(&baz)), vec!["std.baz"]);
}

#[test]
fn test_moved_reference_reports_both_edges() {
    let first = std_object();
    let second = std_object();
    let payload = date_object();
    first.set("payload", Value::object(&payload));
    let before = Snapshot::make([("first", &first), ("second", &second)]);

    first.unset("payload");
    second.set("payload", Value::object(&payload));
    let after = Snapshot::make([("first", &first), ("second", &second)]);

    let diff = Comparator::new().compare_strict(&before, &after);

    assert_eq!(diff.count(), 1);
    assert_eq!(
        paths_to(&diff, &ObjectRef::from(&payload)),
        vec!["first.payload", "second.payload"]
    );
}

#[test]
fn test_path_rename_from_same_source_is_not_a_change() {
    let parent = std_object();
    let child = std_object();
    parent.set("old_name", Value::object(&child));
    let before = Snapshot::make([("p", &parent)]);

    parent.unset("old_name");
    parent.set("new_name", Value::object(&child));
    let after = Snapshot::make([("p", &parent)]);

    assert!(Comparator::new().compare(&before, &after).is_empty());
}

#[test]
fn test_union_of_identical_snapshots_keeps_everything() {
    let object = foo_bar_object();
    let snapshot = Snapshot::make([("std", &object)]);

    let diff = Comparator::with_mode(DiffMode::Union).compare(&snapshot, &snapshot);

    assert_eq!(diff.count(), snapshot.count());
    assert_eq!(edge_sets(&diff), edge_sets(&snapshot));
}

#[test]
fn test_union_merges_edges_by_source() {
    let first = std_object();
    let second = std_object();
    let shared = std_object();
    first.set("shared", Value::object(&shared));
    let before = Snapshot::make([("first", &first), ("second", &second)]);
    second.set("shared", Value::object(&shared));
    let after = Snapshot::make([("first", &first), ("second", &second)]);

    let diff = Comparator::new().compare_union(&before, &after);

    let edges = diff.edges(&ObjectRef::from(&shared)).unwrap();
    let paths: Vec<&str> = edges.iter().filter_map(Edge::path).collect();
    assert_eq!(paths, vec!["first.shared", "second.shared"]);
    assert_eq!(diff.count(), 3);
}

#[test]
fn test_result_carries_after_roots() {
    let object = foo_bar_object();
    let extra = std_object();
    let before = Snapshot::make([("std", &object)]);
    let after = Snapshot::make([("std", &object), ("extra", &extra)]);

    let diff = Comparator::new().compare(&before, &after);

    let extra_ref = ObjectRef::from(&extra);
    assert!(diff.contains(&extra_ref));
    assert_eq!(
        diff.root_alias(&extra_ref),
        Some(&RootAlias::Named("extra".to_string()))
    );
}

#[test]
fn test_inputs_are_not_modified() {
    let object = foo_bar_object();
    let before = Snapshot::make([("std", &object)]);
    object.set("baz", Value::object(std_object()));
    let after = Snapshot::make([("std", &object)]);
    let before_edges = edge_sets(&before);
    let after_edges = edge_sets(&after);

    let _ = Comparator::new().compare(&before, &after);
    let _ = Comparator::new().compare_union(&before, &after);

    assert_eq!(edge_sets(&before), before_edges);
    assert_eq!(edge_sets(&after), after_edges);
}
