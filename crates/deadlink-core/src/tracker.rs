//! Caller-held convenience wrapper over [`Snapshot`] and [`Comparator`].
//!
//! Captures a baseline at one point of a program's life and diffs later
//! states against it:
//!
//! ```
//! use std::rc::Rc;
//! use deadlink_core::object::{Dynamic, Value};
//! use deadlink_core::LeakTracker;
//!
//! let service = Rc::new(Dynamic::new("Service"));
//! let mut tracker = LeakTracker::new();
//! tracker.snap([("svc", &service)]);
//!
//! service.set("listener", Value::object(Rc::new(Dynamic::new("Listener"))));
//!
//! let leaks = tracker.leaks([("svc", &service)]).unwrap();
//! assert_eq!(leaks.count(), 1);
//! ```

use crate::config::DetectorConfig;
use crate::core_types::RootAlias;
use crate::diff::Comparator;
use crate::errors::{DeadLinkError, Result};
use crate::log_op_error;
use crate::object::ObjectRef;
use crate::render::{PlainRenderer, Report};
use crate::snapshot::Snapshot;

#[derive(Debug, Default)]
pub struct LeakTracker {
    baseline: Option<Snapshot>,
    comparator: Comparator,
    config: DetectorConfig,
}

impl LeakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            baseline: None,
            comparator: Comparator::with_mode(config.diff_mode),
            config,
        }
    }

    /// Capture the baseline, or walk more objects into it.
    ///
    /// The first call makes the baseline from `roots`. Later calls walk each
    /// object into the existing baseline without registering it as a root.
    pub fn snap<I, L, O>(&mut self, roots: I) -> &Snapshot
    where
        I: IntoIterator<Item = (L, O)>,
        L: Into<RootAlias>,
        O: Into<ObjectRef>,
    {
        let baseline = match self.baseline.take() {
            Some(mut baseline) => {
                for (alias, object) in roots {
                    let alias: RootAlias = alias.into();
                    let object: ObjectRef = object.into();
                    baseline.walk_object(&object, alias.name());
                }
                baseline
            }
            None => {
                let mut baseline = Snapshot::make(roots);
                self.config.apply_to(&mut baseline);
                baseline
            }
        };
        self.baseline.insert(baseline)
    }

    pub fn baseline(&self) -> Option<&Snapshot> {
        self.baseline.as_ref()
    }

    /// Prune the baseline using the configured clear options
    pub fn clear(&mut self) {
        if let Some(baseline) = &mut self.baseline {
            baseline.clear_with(self.config.clear);
        }
    }

    /// Snapshot `roots` now and diff it against the baseline.
    ///
    /// # Errors
    ///
    /// Returns `MissingBaseline` if [`LeakTracker::snap`] was never called.
    pub fn leaks<I, L, O>(&self, roots: I) -> Result<Snapshot>
    where
        I: IntoIterator<Item = (L, O)>,
        L: Into<RootAlias>,
        O: Into<ObjectRef>,
    {
        let baseline = self.require_baseline("leaks")?;
        let mut current = Snapshot::make(roots);
        self.config.apply_to(&mut current);
        Ok(self.comparator.compare(baseline, &current))
    }

    /// Diff an externally built snapshot against the baseline.
    ///
    /// # Errors
    ///
    /// Returns `MissingBaseline` if [`LeakTracker::snap`] was never called.
    pub fn compare(&self, snapshot: &Snapshot) -> Result<Snapshot> {
        let baseline = self.require_baseline("compare")?;
        Ok(self.comparator.compare(baseline, snapshot))
    }

    /// Render a snapshot with the configured `skip_empty` setting
    pub fn report(&self, snapshot: &Snapshot) -> Report {
        PlainRenderer::new(snapshot).render(self.config.skip_empty)
    }

    fn require_baseline(&self, op: &str) -> Result<&Snapshot> {
        match &self.baseline {
            Some(baseline) => Ok(baseline),
            None => {
                let err = DeadLinkError::MissingBaseline { op: op.to_string() };
                log_op_error!(op, err.clone(), duration_ms = 0u64);
                Err(err)
            }
        }
    }
}
