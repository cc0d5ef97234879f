use crate::core_types::RootAlias;
use crate::object::{ObjectRef, WeakHandle};

/// Root objects of a snapshot, in registration order, held weakly.
#[derive(Debug, Clone, Default)]
pub(crate) struct RootSet {
    entries: Vec<(WeakHandle, RootAlias)>,
}

impl RootSet {
    pub(crate) fn alias_of(&self, object: &ObjectRef) -> Option<&RootAlias> {
        self.entries
            .iter()
            .find(|(handle, _)| handle.refers_to(object))
            .map(|(_, alias)| alias)
    }

    pub(crate) fn contains(&self, object: &ObjectRef) -> bool {
        self.alias_of(object).is_some()
    }

    /// Register `object`; returns false if it already is a root
    pub(crate) fn insert(&mut self, object: &ObjectRef, alias: RootAlias) -> bool {
        if self.contains(object) {
            return false;
        }
        self.entries.push((object.downgrade(), alias));
        true
    }

    /// Roots still alive, with their aliases
    pub(crate) fn live(&self) -> Vec<(RootAlias, ObjectRef)> {
        self.entries
            .iter()
            .filter_map(|(handle, alias)| handle.get().map(|object| (alias.clone(), object)))
            .collect()
    }

    /// Register every root of `other` not already present
    pub(crate) fn absorb(&mut self, other: &RootSet) {
        for (alias, object) in other.live() {
            self.insert(&object, alias);
        }
    }

    pub(crate) fn purge_dead(&mut self) {
        self.entries.retain(|(handle, _)| !handle.is_gone());
    }
}

/// First path segment for everything discovered below a root
pub(crate) fn base_path(object: &ObjectRef, alias: &RootAlias) -> String {
    match alias.name() {
        Some(name) => name.to_string(),
        None => object.type_name().to_string(),
    }
}
