//! Snapshot comparison.
//!
//! Reduces two snapshots of the same program to what changed between them.
//!
//! ## Entry point
//!
//! ```
//! use std::rc::Rc;
//! use deadlink_core::diff::Comparator;
//! use deadlink_core::object::{Dynamic, Value};
//! use deadlink_core::Snapshot;
//!
//! let object = Rc::new(Dynamic::new("stdClass"));
//! let before = Snapshot::make([("std", &object)]);
//! object.set("cache", Value::object(Rc::new(Dynamic::new("Cache"))));
//! let after = Snapshot::make([("std", &object)]);
//!
//! let delta = Comparator::new().compare(&before, &after);
//! assert_eq!(delta.count(), 1);
//! ```
//!
//! ## Modes
//!
//! - **Strict** (default): shared nodes with the same edge sources on both
//!   sides are dropped; other shared nodes keep only the edges not common to
//!   both sides.
//! - **Union**: every shared node carries the union of both edge lists,
//!   deduplicated by source identity. Nothing is dropped.

pub mod comparator;

pub use comparator::{Comparator, DiffMode};
