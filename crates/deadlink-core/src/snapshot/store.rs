use super::edge::{Edge, EdgeList};
use crate::object::{ObjectId, ObjectRef, WeakHandle};
use std::collections::BTreeMap;

/// A tracked object and its incoming edges.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) handle: WeakHandle,
    pub(crate) edges: EdgeList,
}

/// Identity-keyed map from object to incoming edges.
///
/// Keys are held weakly. A node whose object has been dropped is invisible to
/// lookups and iteration until [`EdgeStore::purge_dead`] removes it.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeStore {
    nodes: BTreeMap<ObjectId, Node>,
}

impl EdgeStore {
    pub(crate) fn get(&self, object: &ObjectRef) -> Option<&Node> {
        self.nodes
            .get(&object.id())
            .filter(|node| node.handle.refers_to(object))
    }

    pub(crate) fn get_mut(&mut self, object: &ObjectRef) -> Option<&mut Node> {
        self.nodes
            .get_mut(&object.id())
            .filter(|node| node.handle.refers_to(object))
    }

    pub(crate) fn contains(&self, object: &ObjectRef) -> bool {
        self.get(object).is_some()
    }

    /// Append one edge to `object`'s list, creating the node if needed
    pub(crate) fn link(&mut self, object: &ObjectRef, edge: Edge) {
        let node = self.nodes.entry(object.id()).or_insert_with(|| Node {
            handle: object.downgrade(),
            edges: Vec::new(),
        });
        if node.handle.is_gone() {
            node.handle = object.downgrade();
            node.edges.clear();
        }
        node.edges.push(edge);
    }

    /// Replace `object`'s edge list
    pub(crate) fn insert(&mut self, object: &ObjectRef, edges: EdgeList) {
        self.nodes.insert(
            object.id(),
            Node {
                handle: object.downgrade(),
                edges,
            },
        );
    }

    pub(crate) fn insert_node(&mut self, id: ObjectId, node: Node) {
        self.nodes.insert(id, node);
    }

    pub(crate) fn remove(&mut self, object: &ObjectRef) -> Option<EdgeList> {
        if !self.contains(object) {
            return None;
        }
        self.nodes.remove(&object.id()).map(|node| node.edges)
    }

    /// Live nodes, resolved to strong handles
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ObjectRef, &[Edge])> + '_ {
        self.nodes
            .values()
            .filter_map(|node| node.handle.get().map(|object| (object, node.edges.as_slice())))
    }

    pub(crate) fn into_nodes(self) -> impl Iterator<Item = (ObjectId, Node)> {
        self.nodes.into_iter()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|node| !node.handle.is_gone())
            .count()
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut BTreeMap<ObjectId, Node> {
        &mut self.nodes
    }

    /// Drop nodes whose object is gone; returns how many were removed
    pub(crate) fn purge_dead(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| !node.handle.is_gone());
        before - self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Dynamic;

    #[test]
    fn test_link_creates_and_appends() {
        let mut store = EdgeStore::default();
        let object = ObjectRef::new(Dynamic::new("Node"));
        let parent = ObjectRef::new(Dynamic::new("Parent"));

        store.link(&object, Edge::Root);
        store.link(&object, Edge::reference(&parent, "p.node"));

        assert_eq!(store.get(&object).map(|n| n.edges.len()), Some(2));
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn test_dead_nodes_are_invisible_then_purged() {
        let mut store = EdgeStore::default();
        let kept = ObjectRef::new(Dynamic::new("Kept"));
        let dropped = ObjectRef::new(Dynamic::new("Dropped"));
        store.link(&kept, Edge::Root);
        store.link(&dropped, Edge::Root);

        drop(dropped);

        assert_eq!(store.live_count(), 1);
        assert_eq!(store.iter().count(), 1);
        assert_eq!(store.purge_dead(), 1);
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn test_remove_returns_edges() {
        let mut store = EdgeStore::default();
        let object = ObjectRef::new(Dynamic::new("Node"));
        store.link(&object, Edge::Root);

        assert_eq!(store.remove(&object).map(|e| e.len()), Some(1));
        assert!(!store.contains(&object));
        assert!(store.remove(&object).is_none());
    }
}
