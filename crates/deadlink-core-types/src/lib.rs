//! Core types shared across DeadLink facilities
//!
//! This crate provides foundational types used by the snapshot engine,
//! the renderer and the logging facility:
//!
//! - **Root aliases**: RootAlias, the label a caller attaches to a root object
//! - **Schema constants**: Canonical field keys and event names

pub mod alias;
pub mod schema;

pub use alias::RootAlias;
