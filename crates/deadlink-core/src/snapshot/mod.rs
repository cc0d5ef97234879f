//! Object-graph snapshots.
//!
//! A [`Snapshot`] records, for every object reachable from a set of roots,
//! the incoming edges that currently point at it. Nothing in a snapshot owns
//! the objects it describes: node keys, edge sources and roots are all held
//! through weak handles, so taking a snapshot never keeps anything alive.
//!
//! ## Lifecycle
//!
//! - [`Snapshot::make`] walks the roots once.
//! - [`Snapshot::update_map`] re-walks the same roots later and merges what
//!   it finds (strictly additive), optionally adding new roots.
//! - [`Snapshot::clear`] prunes edges whose source has been dropped and
//!   removes ignored nodes.
//! - [`crate::diff::Comparator`] reduces two snapshots to their delta.

mod edge;
mod ignore;
mod roots;
mod store;
mod walker;

pub use edge::{diff_edges, merge_edges, reference_count, Edge, EdgeKey, EdgeList};
pub use ignore::IgnoreRule;

use crate::core_types::RootAlias;
use crate::errors::{DeadLinkError, Result};
use crate::object::{ObjectRef, Value};
use crate::{log_op_end, log_op_start};
use ignore::IgnoreRules;
use roots::{base_path, RootSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use store::EdgeStore;

/// Flags for [`Snapshot::clear_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearOptions {
    /// Remove ignored nodes outright, and edges whose source is ignored
    pub remove_ignored: bool,
    /// Also drop `Root` markers
    pub remove_roots: bool,
}

impl Default for ClearOptions {
    fn default() -> Self {
        Self {
            remove_ignored: true,
            remove_roots: false,
        }
    }
}

/// Captured object graph: object identity to incoming edges.
///
/// Cloning is shallow: the clone gets its own maps holding the same edge
/// entries and does not re-walk anything.
#[derive(Clone, Default)]
pub struct Snapshot {
    store: EdgeStore,
    roots: RootSet,
    ignore: IgnoreRules,
}

impl Snapshot {
    /// Empty snapshot with no roots
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the graph reachable from the labelled roots.
    ///
    /// Every root receives a `Root` edge before any walking starts, so a root
    /// reached from another root is linked but expanded only once.
    ///
    /// ```
    /// use std::rc::Rc;
    /// use deadlink_core::object::{Dynamic, Value};
    /// use deadlink_core::Snapshot;
    ///
    /// let object = Rc::new(Dynamic::new("stdClass"));
    /// object.set("foo", Value::object(Rc::new(Dynamic::new("stdClass"))));
    ///
    /// let snapshot = Snapshot::make([("std", &object)]);
    /// assert_eq!(snapshot.count(), 2);
    /// ```
    pub fn make<I, L, O>(roots: I) -> Self
    where
        I: IntoIterator<Item = (L, O)>,
        L: Into<RootAlias>,
        O: Into<ObjectRef>,
    {
        let roots: Vec<(RootAlias, ObjectRef)> = roots
            .into_iter()
            .map(|(alias, object)| (alias.into(), object.into()))
            .collect();

        log_op_start!("snapshot_make", root_count = roots.len() as u64);
        let start = Instant::now();

        let mut snapshot = Self::new();
        let mut walk_from = Vec::with_capacity(roots.len());
        for (alias, object) in roots {
            // an object listed twice is rooted and walked once
            if snapshot.roots.insert(&object, alias.clone()) {
                snapshot.store.link(&object, Edge::Root);
                walk_from.push((alias, object));
            }
        }

        let mut edge_count = 0;
        for (alias, object) in &walk_from {
            edge_count += walker::walk(&mut snapshot.store, object, base_path(object, alias));
        }

        log_op_end!(
            "snapshot_make",
            duration_ms = start.elapsed().as_millis() as u64,
            node_count = snapshot.store.live_count() as u64,
            edge_count = edge_count as u64
        );

        snapshot
    }

    /// Capture from unlabelled roots, aliased by position
    pub fn from_objects<I, O>(objects: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<ObjectRef>,
    {
        Self::make(objects.into_iter().enumerate())
    }

    /// Walk `object`'s reachable graph into this snapshot.
    ///
    /// Does not register `object` as a root or give it a `Root` edge. Paths
    /// start at `alias`, or at the object's type name when no alias is given.
    pub fn walk_object(&mut self, object: &ObjectRef, alias: Option<&str>) {
        let base = match alias {
            Some(alias) => alias.to_string(),
            None => object.type_name().to_string(),
        };
        walker::walk(&mut self.store, object, base);
    }

    // ----- typed map operations -----

    pub fn contains(&self, object: &ObjectRef) -> bool {
        self.store.contains(object)
    }

    /// Incoming edges of `object`, if tracked
    pub fn edges(&self, object: &ObjectRef) -> Option<&[Edge]> {
        self.store.get(object).map(|node| node.edges.as_slice())
    }

    /// Replace `object`'s incoming edges.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEdgeList` if a reference edge has an empty path.
    pub fn insert(&mut self, object: &ObjectRef, edges: EdgeList) -> Result<()> {
        edge::validate_edges(object, &edges)?;
        self.store.insert(object, edges);
        Ok(())
    }

    /// Stop tracking `object`, returning its edges
    pub fn remove(&mut self, object: &ObjectRef) -> Option<EdgeList> {
        self.store.remove(object)
    }

    // ----- dynamic-key map operations -----

    /// # Errors
    ///
    /// Returns `InvalidKey` if `key` is not an object.
    pub fn offset_exists(&self, key: &Value) -> Result<bool> {
        Ok(self.contains(object_key(key)?))
    }

    /// # Errors
    ///
    /// Returns `InvalidKey` if `key` is not an object.
    pub fn offset_get(&self, key: &Value) -> Result<Option<&[Edge]>> {
        Ok(self.edges(object_key(key)?))
    }

    /// # Errors
    ///
    /// Returns `InvalidKey` if `key` is not an object, or `InvalidEdgeList`
    /// if `edges` is malformed.
    pub fn offset_set(&mut self, key: &Value, edges: EdgeList) -> Result<()> {
        let object = object_key(key)?.clone();
        self.insert(&object, edges)
    }

    /// # Errors
    ///
    /// Returns `InvalidKey` if `key` is not an object.
    pub fn offset_unset(&mut self, key: &Value) -> Result<Option<EdgeList>> {
        let object = object_key(key)?.clone();
        Ok(self.remove(&object))
    }

    // ----- iteration -----

    /// Live nodes with their edge lists, in identity order.
    ///
    /// Reflects the current state. Clone the snapshot first if it has to be
    /// mutated during a pass.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectRef, &[Edge])> + '_ {
        self.store.iter()
    }

    /// Number of live objects tracked
    pub fn count(&self) -> usize {
        self.store.live_count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    // ----- roots -----

    /// Alias registered for `object`, or `None` if it is not a root
    pub fn root_alias(&self, object: &ObjectRef) -> Option<&RootAlias> {
        self.roots.alias_of(object)
    }

    /// Live roots in registration order
    pub fn roots(&self) -> Vec<(RootAlias, ObjectRef)> {
        self.roots.live()
    }

    // ----- incremental update -----

    /// Re-walk the current roots and merge, then add `extra` roots.
    ///
    /// Existing nodes get the fresh edges merged in with [`merge_edges`];
    /// unseen nodes are inserted as found. Objects in `extra` that are not
    /// roots yet are registered, given a `Root` edge and walked. Never
    /// removes a live node or an edge the merge keeps.
    pub fn update_map<I, L, O>(&mut self, extra: I)
    where
        I: IntoIterator<Item = (L, O)>,
        L: Into<RootAlias>,
        O: Into<ObjectRef>,
    {
        let extra: Vec<(RootAlias, ObjectRef)> = extra
            .into_iter()
            .map(|(alias, object)| (alias.into(), object.into()))
            .collect();

        log_op_start!(
            "snapshot_update_map",
            node_count = self.count() as u64,
            root_count = extra.len() as u64
        );
        let start = Instant::now();

        self.store.purge_dead();
        self.roots.purge_dead();

        let fresh = Self::make(self.roots.live());
        for (id, node) in fresh.store.into_nodes() {
            let Some(object) = node.handle.get() else {
                continue;
            };
            match self.store.get_mut(&object) {
                Some(existing) => existing.edges = merge_edges(&existing.edges, &node.edges),
                None => self.store.insert_node(id, node),
            }
        }

        for (alias, object) in extra {
            if !self.roots.insert(&object, alias.clone()) {
                continue;
            }
            self.store.link(&object, Edge::Root);
            walker::walk(&mut self.store, &object, base_path(&object, &alias));
        }

        log_op_end!(
            "snapshot_update_map",
            duration_ms = start.elapsed().as_millis() as u64,
            node_count = self.count() as u64
        );
    }

    /// Re-walk the current roots without adding any
    pub fn refresh(&mut self) {
        self.update_map(Vec::<(RootAlias, ObjectRef)>::new());
    }

    // ----- ignore rules -----

    /// Register exclusion rules, applied by [`Snapshot::clear`]
    pub fn ignore<I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = IgnoreRule>,
    {
        for rule in rules {
            self.ignore.add(rule);
        }
    }

    /// True if `object` is explicitly ignored, has an ignored type, or
    /// matches an ignore predicate
    pub fn is_ignored(&self, object: &ObjectRef) -> bool {
        self.ignore.matches(object)
    }

    /// True if the type name is in the ignored-type set
    pub fn is_type_ignored(&self, type_name: &str) -> bool {
        self.ignore.matches_type(type_name)
    }

    // ----- pruning -----

    /// [`Snapshot::clear_with`] using the default options
    pub fn clear(&mut self) {
        self.clear_with(ClearOptions::default());
    }

    /// Prune the snapshot.
    ///
    /// Nodes whose object is gone are dropped. With `remove_ignored`, ignored
    /// nodes are dropped too. For every other node, edges whose source is
    /// gone are removed, as are edges from ignored sources (`remove_ignored`)
    /// and `Root` markers (`remove_roots`). A node that loses all its edges
    /// stays tracked.
    pub fn clear_with(&mut self, options: ClearOptions) {
        log_op_start!("snapshot_clear", node_count = self.count() as u64);
        let start = Instant::now();

        let ignore = &self.ignore;
        let check_ignored = options.remove_ignored && !ignore.is_empty();
        let mut pruned_nodes = 0u64;
        let mut pruned_edges = 0u64;

        self.store.nodes_mut().retain(|_, node| {
            let Some(object) = node.handle.get() else {
                pruned_nodes += 1;
                return false;
            };
            if check_ignored && ignore.matches(&object) {
                pruned_nodes += 1;
                return false;
            }

            let before = node.edges.len();
            node.edges.retain(|edge| match edge {
                Edge::Root => !options.remove_roots,
                Edge::Ref { source, .. } => match source.get() {
                    None => false,
                    Some(source) => !(check_ignored && ignore.matches(&source)),
                },
            });
            pruned_edges += (before - node.edges.len()) as u64;
            true
        });
        self.roots.purge_dead();

        tracing::debug!(
            component = module_path!(),
            op = "snapshot_clear",
            pruned_nodes = pruned_nodes,
            pruned_edges = pruned_edges,
        );
        log_op_end!(
            "snapshot_clear",
            duration_ms = start.elapsed().as_millis() as u64,
            node_count = self.count() as u64
        );
    }

    // ----- comparator support -----

    pub(crate) fn insert_unchecked(&mut self, object: &ObjectRef, edges: EdgeList) {
        self.store.insert(object, edges);
    }

    pub(crate) fn absorb_roots(&mut self, other: &Snapshot) {
        self.roots.absorb(&other.roots);
    }
}

fn object_key(key: &Value) -> Result<&ObjectRef> {
    key.as_object().ok_or_else(|| DeadLinkError::InvalidKey {
        found: key.kind().to_string(),
    })
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("count", &self.count())
            .field("roots", &self.roots.live())
            .field("ignore", &self.ignore)
            .finish()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (ObjectRef, &'a [Edge]);
    type IntoIter = Box<dyn Iterator<Item = (ObjectRef, &'a [Edge])> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
