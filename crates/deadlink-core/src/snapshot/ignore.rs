use crate::object::{Inspect, ObjectId, ObjectRef, WeakHandle};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

type Predicate = Rc<dyn Fn(&ObjectRef) -> bool>;

/// One exclusion rule for [`Snapshot::ignore`](super::Snapshot::ignore).
#[derive(Clone)]
pub enum IgnoreRule {
    /// Every object whose runtime type name matches
    Type(String),
    /// One specific object (held weakly)
    Object(ObjectRef),
    /// Every object the predicate accepts
    Predicate(Predicate),
}

impl IgnoreRule {
    pub fn of_type<T: Inspect>() -> Self {
        IgnoreRule::Type(std::any::type_name::<T>().to_string())
    }

    pub fn type_name(name: impl Into<String>) -> Self {
        IgnoreRule::Type(name.into())
    }

    pub fn object(object: impl Into<ObjectRef>) -> Self {
        IgnoreRule::Object(object.into())
    }

    pub fn predicate(predicate: impl Fn(&ObjectRef) -> bool + 'static) -> Self {
        IgnoreRule::Predicate(Rc::new(predicate))
    }
}

impl fmt::Debug for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreRule::Type(name) => f.debug_tuple("Type").field(name).finish(),
            IgnoreRule::Object(object) => f.debug_tuple("Object").field(object).finish(),
            IgnoreRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Registered exclusion rules.
#[derive(Clone, Default)]
pub(crate) struct IgnoreRules {
    types: BTreeSet<String>,
    objects: BTreeMap<ObjectId, WeakHandle>,
    predicates: Vec<Predicate>,
}

impl IgnoreRules {
    pub(crate) fn add(&mut self, rule: IgnoreRule) {
        match rule {
            IgnoreRule::Type(name) => {
                self.types.insert(name);
            }
            IgnoreRule::Object(object) => {
                self.objects.insert(object.id(), object.downgrade());
            }
            IgnoreRule::Predicate(predicate) => self.predicates.push(predicate),
        }
    }

    pub(crate) fn matches(&self, object: &ObjectRef) -> bool {
        let explicit = self
            .objects
            .get(&object.id())
            .is_some_and(|handle| handle.refers_to(object));
        explicit
            || self.types.contains(object.type_name())
            || self.predicates.iter().any(|predicate| predicate(object))
    }

    pub(crate) fn matches_type(&self, type_name: &str) -> bool {
        self.types.contains(type_name)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.types.is_empty() && self.objects.is_empty() && self.predicates.is_empty()
    }
}

impl fmt::Debug for IgnoreRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnoreRules")
            .field("types", &self.types)
            .field("objects", &self.objects.len())
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Dynamic;

    #[test]
    fn test_type_rule_matches_runtime_type_name() {
        let mut rules = IgnoreRules::default();
        rules.add(IgnoreRule::type_name("Cache"));

        assert!(rules.matches(&ObjectRef::new(Dynamic::new("Cache"))));
        assert!(!rules.matches(&ObjectRef::new(Dynamic::new("Session"))));
        assert!(rules.matches_type("Cache"));
    }

    #[test]
    fn test_object_rule_matches_only_that_object() {
        let mut rules = IgnoreRules::default();
        let target = ObjectRef::new(Dynamic::new("Node"));
        rules.add(IgnoreRule::object(&target));

        assert!(rules.matches(&target));
        assert!(!rules.matches(&ObjectRef::new(Dynamic::new("Node"))));
    }

    #[test]
    fn test_predicate_rule() {
        let mut rules = IgnoreRules::default();
        assert!(rules.is_empty());
        rules.add(IgnoreRule::predicate(|object| object.type_name().starts_with("Tmp")));

        assert!(rules.matches(&ObjectRef::new(Dynamic::new("TmpBuffer"))));
        assert!(!rules.matches(&ObjectRef::new(Dynamic::new("Buffer"))));
    }
}
