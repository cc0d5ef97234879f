//! DeadLink Core - object-graph leak detection
//!
//! This crate captures the graph of objects reachable from a set of roots
//! and compares captures taken at different points of a program's life:
//! - Object capability layer (`Inspect`, strong/weak handles, field values)
//! - Snapshots with cycle-safe traversal, incremental re-walks and pruning
//! - Strict and union snapshot diffs
//! - Plain-text / JSON reports
//! - A caller-held tracker wrapping the before/after workflow
//!
//! Snapshots never own the objects they describe; every reference they keep
//! is weak.

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod object;
pub mod render;
pub mod snapshot;
pub mod tracker;

pub use deadlink_core_types as core_types;

#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use config::DetectorConfig;
pub use core_types::RootAlias;
pub use diff::{Comparator, DiffMode};
pub use errors::{DeadLinkError, ExError, ExErrorKind, Result};
pub use object::{Dynamic, Inspect, ObjectId, ObjectRef, Value, WeakHandle};
pub use snapshot::{ClearOptions, Edge, EdgeKey, EdgeList, IgnoreRule, Snapshot};
pub use tracker::LeakTracker;
