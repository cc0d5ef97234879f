//! Human-readable reports over a snapshot.

pub mod plain;

pub use plain::{NodeReport, PlainRenderer, Report};
