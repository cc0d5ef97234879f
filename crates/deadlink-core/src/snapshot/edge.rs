use crate::errors::{DeadLinkError, Result};
use crate::object::{ObjectId, ObjectRef, WeakHandle};
use std::collections::HashSet;

/// One recorded incoming reference to a node.
#[derive(Debug, Clone)]
pub enum Edge {
    /// The node was passed to the snapshot directly as a root
    Root,
    /// The node is held by `source` through the field path `path`
    Ref { source: WeakHandle, path: String },
}

/// Identity an edge is compared by: the `Root` marker, or the source object.
///
/// Path text never takes part in comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKey {
    Root,
    Source(ObjectId),
}

/// Incoming edges of a node; an unordered multiset.
pub type EdgeList = Vec<Edge>;

impl Edge {
    pub fn reference(source: &ObjectRef, path: impl Into<String>) -> Self {
        Edge::Ref {
            source: source.downgrade(),
            path: path.into(),
        }
    }

    pub fn key(&self) -> EdgeKey {
        match self {
            Edge::Root => EdgeKey::Root,
            Edge::Ref { source, .. } => EdgeKey::Source(source.id()),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Edge::Root)
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Edge::Root => None,
            Edge::Ref { path, .. } => Some(path),
        }
    }

    /// The source object, if this is a reference edge and the source is alive
    pub fn source(&self) -> Option<ObjectRef> {
        match self {
            Edge::Root => None,
            Edge::Ref { source, .. } => source.get(),
        }
    }
}

/// Merge a fresh edge list into an existing one.
///
/// Every old edge is kept. A new edge is added only when no edge with the
/// same source identity is already in the running result, and the `Root`
/// marker is added at most once.
pub fn merge_edges(old: &[Edge], new: &[Edge]) -> EdgeList {
    let mut result: EdgeList = old.to_vec();
    let mut seen: HashSet<EdgeKey> = old.iter().map(Edge::key).collect();

    for edge in new {
        if seen.insert(edge.key()) {
            result.push(edge.clone());
        }
    }
    result
}

/// Edges present on only one side, compared by [`EdgeKey`].
///
/// Returns the edges of `a` missing from `b` followed by the edges of `b`
/// missing from `a`. Equal key sets produce an empty list.
pub fn diff_edges(a: &[Edge], b: &[Edge]) -> EdgeList {
    let keys_a: HashSet<EdgeKey> = a.iter().map(Edge::key).collect();
    let keys_b: HashSet<EdgeKey> = b.iter().map(Edge::key).collect();

    a.iter()
        .filter(|edge| !keys_b.contains(&edge.key()))
        .chain(b.iter().filter(|edge| !keys_a.contains(&edge.key())))
        .cloned()
        .collect()
}

/// Number of edges that are not `Root` markers
pub fn reference_count(edges: &[Edge]) -> usize {
    edges.iter().filter(|edge| !edge.is_root()).count()
}

/// Reject edge lists that could not have come from a walk.
///
/// # Errors
///
/// Returns `InvalidEdgeList` if a reference edge carries an empty path.
pub(crate) fn validate_edges(object: &ObjectRef, edges: &[Edge]) -> Result<()> {
    for edge in edges {
        if let Edge::Ref { path, source } = edge {
            if path.is_empty() {
                return Err(DeadLinkError::InvalidEdgeList {
                    type_name: object.type_name().to_string(),
                    reason: format!("edge from {} has an empty path", source.id()),
                });
            }
        }
    }
    Ok(())
}
