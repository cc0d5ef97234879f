//! Detector configuration.
//!
//! Loaded from TOML by the tooling that drives a leak check:
//!
//! ```toml
//! diff_mode = "strict"
//! skip_empty = true
//! ignore_types = ["Cache"]
//!
//! [clear]
//! remove_ignored = true
//! remove_roots = false
//! ```

use crate::diff::DiffMode;
use crate::errors::{DeadLinkError, Result};
use crate::snapshot::{ClearOptions, IgnoreRule, Snapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Mode used by the tracker's comparator
    pub diff_mode: DiffMode,
    /// Drop nodes without reference edges from rendered reports
    pub skip_empty: bool,
    /// Options used when the tracker prunes its baseline
    pub clear: ClearOptions,
    /// Runtime type names registered as ignored on every snapshot
    pub ignore_types: Vec<String>,
}

impl DetectorConfig {
    /// Parse a TOML document; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document is not valid TOML or contains
    /// unknown keys or mistyped values.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| DeadLinkError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Register the configured type ignores on `snapshot`
    pub fn apply_to(&self, snapshot: &mut Snapshot) {
        snapshot.ignore(self.ignore_types.iter().cloned().map(IgnoreRule::Type));
    }
}
