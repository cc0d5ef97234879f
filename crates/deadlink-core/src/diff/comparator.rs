use crate::snapshot::{diff_edges, merge_edges, Snapshot};
use crate::{log_op_end, log_op_start};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// How shared nodes are reduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    /// Keep only edges not common to both sides; drop unchanged nodes
    #[default]
    Strict,
    /// Keep the source-deduplicated union of both sides
    Union,
}

impl DiffMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffMode::Strict => "strict",
            DiffMode::Union => "union",
        }
    }
}

/// Diffs two snapshots into a third.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    mode: DiffMode,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: DiffMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DiffMode {
        self.mode
    }

    /// Diff `a` (before) against `b` (after) using the configured mode
    pub fn compare(&self, a: &Snapshot, b: &Snapshot) -> Snapshot {
        match self.mode {
            DiffMode::Strict => self.compare_strict(a, b),
            DiffMode::Union => self.compare_union(a, b),
        }
    }

    /// Nodes that are new in `b`, nodes only in `a`, and for shared nodes
    /// the edges present on one side only. `compare_strict(s, s)` is empty.
    pub fn compare_strict(&self, a: &Snapshot, b: &Snapshot) -> Snapshot {
        run(DiffMode::Strict, a, b)
    }

    /// Like [`Comparator::compare_strict`], but shared nodes keep the union
    /// of both edge lists instead of their difference.
    pub fn compare_union(&self, a: &Snapshot, b: &Snapshot) -> Snapshot {
        run(DiffMode::Union, a, b)
    }
}

fn run(mode: DiffMode, a: &Snapshot, b: &Snapshot) -> Snapshot {
    log_op_start!(
        "compare",
        diff_mode = mode.as_str(),
        node_count = (a.count() + b.count()) as u64
    );
    let start = Instant::now();

    let mut result = a.clone();
    let mut pending = b.clone();

    for (object, edges_a) in a.iter() {
        let Some(edges_b) = pending.remove(&object) else {
            continue;
        };

        let delta = match mode {
            DiffMode::Strict => diff_edges(edges_a, &edges_b),
            DiffMode::Union => merge_edges(edges_a, &edges_b),
        };

        if mode == DiffMode::Strict && delta.is_empty() {
            result.remove(&object);
        } else {
            result.insert_unchecked(&object, delta);
        }
    }

    for (object, edges_b) in pending.iter() {
        result.insert_unchecked(&object, edges_b.to_vec());
    }
    result.absorb_roots(b);

    log_op_end!(
        "compare",
        duration_ms = start.elapsed().as_millis() as u64,
        node_count = result.count() as u64
    );
    result
}
