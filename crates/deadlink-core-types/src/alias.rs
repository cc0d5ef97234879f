use serde::{Deserialize, Serialize};
use std::fmt;

/// Label attached to a root object when it is handed to a snapshot.
///
/// Callers either name a root (`"std"`) or let its position in the argument
/// list stand in for a name. Named aliases become the first segment of every
/// path discovered below that root; positional roots fall back to the
/// object's runtime type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RootAlias {
    /// Caller-chosen label
    Named(String),
    /// Position of the object in the argument list
    Index(usize),
}

impl RootAlias {
    /// The label, if this alias is a caller-chosen name
    pub fn name(&self) -> Option<&str> {
        match self {
            RootAlias::Named(name) => Some(name),
            RootAlias::Index(_) => None,
        }
    }

    /// True for positional aliases
    pub fn is_positional(&self) -> bool {
        matches!(self, RootAlias::Index(_))
    }
}

impl fmt::Display for RootAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootAlias::Named(name) => f.write_str(name),
            RootAlias::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for RootAlias {
    fn from(name: &str) -> Self {
        RootAlias::Named(name.to_string())
    }
}

impl From<String> for RootAlias {
    fn from(name: String) -> Self {
        RootAlias::Named(name)
    }
}

impl From<usize> for RootAlias {
    fn from(index: usize) -> Self {
        RootAlias::Index(index)
    }
}
