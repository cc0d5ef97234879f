use super::edge::Edge;
use super::store::EdgeStore;
use crate::object::{children_of, ObjectRef};
use std::collections::VecDeque;

/// Breadth-first walk of everything reachable from `root`.
///
/// The store itself is the visited set: a child already present gets the new
/// incoming edge but is not expanded again, which is what bounds the walk on
/// cyclic graphs. `root` must already be in the store. Returns the number of
/// edges recorded.
pub(crate) fn walk(store: &mut EdgeStore, root: &ObjectRef, base_path: String) -> usize {
    let mut recorded = 0;
    let mut queue: VecDeque<(ObjectRef, String)> = VecDeque::new();
    queue.push_back((root.clone(), base_path));

    while let Some((parent, parent_path)) = queue.pop_front() {
        for (child, field_path) in children_of(&parent) {
            let path = format!("{}.{}", parent_path, field_path);
            let known = store.contains(&child);

            store.link(&child, Edge::reference(&parent, path.clone()));
            recorded += 1;

            if !known {
                queue.push_back((child, path));
            }
        }
    }
    recorded
}
