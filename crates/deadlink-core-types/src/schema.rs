//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Graph sizes
pub const FIELD_NODE_COUNT: &str = "node_count";
pub const FIELD_ROOT_COUNT: &str = "root_count";
pub const FIELD_EDGE_COUNT: &str = "edge_count";
pub const FIELD_PRUNED_NODES: &str = "pruned_nodes";
pub const FIELD_PRUNED_EDGES: &str = "pruned_edges";

// Diff
pub const FIELD_DIFF_MODE: &str = "diff_mode";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
