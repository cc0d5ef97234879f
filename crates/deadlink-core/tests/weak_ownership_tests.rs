//! Snapshots hold nothing strongly.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{edge_sets, std_object};
use deadlink_core::object::{Dynamic, ObjectRef, Value};
use deadlink_core::snapshot::Edge;
use deadlink_core::{Comparator, Snapshot};
use std::rc::Rc;

#[test]
fn test_snapshot_does_not_extend_lifetimes() {
    let root = std_object();
    let child = std_object();
    root.set("child", Value::object(&child));
    let before = Rc::strong_count(&child);

    let snapshot = Snapshot::make([("root", &root)]);

    assert_eq!(Rc::strong_count(&child), before);
    assert_eq!(Rc::strong_count(&root), 1);
    assert_eq!(snapshot.count(), 2);
}

#[test]
fn test_dropped_object_disappears_from_view() {
    let root = std_object();
    let child = std_object();
    root.set("child", Value::object(&child));
    let child_ref = ObjectRef::from(&child);
    let snapshot = Snapshot::make([("root", &root)]);

    root.unset("child");
    drop(child);
    assert!(snapshot.contains(&child_ref));
    drop(child_ref);

    assert_eq!(snapshot.count(), 1);
    assert_eq!(snapshot.iter().count(), 1);
}

#[test]
fn test_clear_prunes_edges_from_dropped_sources_only() {
    let root = Rc::new(Dynamic::new("Root"));
    let child = Rc::new(Dynamic::new("Child"));
    let grandchild = Rc::new(Dynamic::new("Grandchild"));
    let unrelated = Rc::new(Dynamic::new("Unrelated"));
    child.set("grandchild", Value::object(&grandchild));
    root.set("child", Value::object(&child));
    root.set("unrelated", Value::object(&unrelated));
    let mut snapshot = Snapshot::make([("root", &root)]);
    let unrelated_before = snapshot.edges(&ObjectRef::from(&unrelated)).unwrap().len();

    root.unset("child");
    drop(child);
    snapshot.clear();

    assert_eq!(snapshot.count(), 3);
    assert!(snapshot
        .edges(&ObjectRef::from(&grandchild))
        .unwrap()
        .is_empty());
    assert_eq!(
        snapshot.edges(&ObjectRef::from(&unrelated)).unwrap().len(),
        unrelated_before
    );
    let root_edges = snapshot.edges(&ObjectRef::from(&root)).unwrap();
    assert_eq!(root_edges.len(), 1);
    assert!(root_edges[0].is_root());
}

#[test]
fn test_everything_dropped_leaves_an_empty_snapshot() {
    let root = std_object();
    root.set("child", Value::object(std_object()));
    let mut snapshot = Snapshot::make([("root", &root)]);

    drop(root);

    assert_eq!(snapshot.count(), 0);
    snapshot.clear();
    assert!(snapshot.is_empty());
    assert!(snapshot.roots().is_empty());
}

#[test]
fn test_refresh_after_root_dropped_is_empty() {
    let root = std_object();
    let mut snapshot = Snapshot::make([("root", &root)]);

    drop(root);
    snapshot.refresh();

    assert!(snapshot.is_empty());
}

#[test]
fn test_edge_to_dropped_source_reports_no_source() {
    let parent = std_object();
    let child = std_object();
    parent.set("child", Value::object(&child));
    let snapshot = Snapshot::make([("p", &parent)]);

    drop(parent);

    let edges = snapshot.edges(&ObjectRef::from(&child)).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].path(), Some("p.child"));
    assert!(edges[0].source().is_none());
}

#[test]
fn test_diff_ignores_dead_nodes() {
    let root = std_object();
    let transient = std_object();
    root.set("transient", Value::object(&transient));
    let before = Snapshot::make([("root", &root)]);

    root.unset("transient");
    drop(transient);
    let after = Snapshot::make([("root", &root)]);

    let diff = Comparator::new().compare(&before, &after);

    assert!(diff.is_empty());
    assert_eq!(edge_sets(&before).len(), 1);
}

#[test]
fn test_weak_fields_are_not_edges() {
    struct Observer {
        subject: std::rc::Weak<Dynamic>,
    }
    deadlink_core::impl_inspect!(Observer { subject });

    let subject = std_object();
    let observer = Rc::new(Observer {
        subject: Rc::downgrade(&subject),
    });

    let snapshot = Snapshot::make([("observer", &observer)]);

    assert_eq!(snapshot.count(), 1);
    assert!(!snapshot.contains(&ObjectRef::from(&subject)));
    assert!(observer.subject.upgrade().is_some());
    assert!(snapshot
        .edges(&ObjectRef::from(&observer))
        .unwrap()
        .iter()
        .all(Edge::is_root));
}
