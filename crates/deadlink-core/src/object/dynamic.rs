use super::{Field, Inspect, Value};
use std::cell::RefCell;

/// Property-bag object whose fields are added and removed at run time.
///
/// Handy for ad-hoc graphs in diagnostics and tests. Properties keep their
/// insertion order; re-setting a property keeps its original position.
///
/// ```
/// use std::rc::Rc;
/// use deadlink_core::object::{Dynamic, Value};
///
/// let parent = Rc::new(Dynamic::new("Parent"));
/// parent.set("child", Value::object(Rc::new(Dynamic::new("Child"))));
/// assert!(parent.has("child"));
/// ```
#[derive(Debug)]
pub struct Dynamic {
    type_name: String,
    properties: RefCell<Vec<(String, Value)>>,
}

impl Dynamic {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: RefCell::new(Vec::new()),
        }
    }

    /// Build with an initial set of properties
    pub fn with<I, K>(type_name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let dynamic = Self::new(type_name);
        for (name, value) in properties {
            dynamic.set(name, value);
        }
        dynamic
    }

    pub fn set(&self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let mut properties = self.properties.borrow_mut();
        match properties.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => properties.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.properties
            .borrow()
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.clone())
    }

    /// Remove a property, returning its last value
    pub fn unset(&self, name: &str) -> Option<Value> {
        let mut properties = self.properties.borrow_mut();
        let position = properties.iter().position(|(existing, _)| existing == name)?;
        Some(properties.remove(position).1)
    }

    pub fn has(&self, name: &str) -> bool {
        self.properties
            .borrow()
            .iter()
            .any(|(existing, _)| existing == name)
    }
}

impl Inspect for Dynamic {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn fields(&self) -> Vec<Field> {
        match self.properties.try_borrow() {
            Ok(properties) => properties
                .iter()
                .map(|(name, value)| Field::new(name.clone(), value.clone()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Wrapper for values that must never be reflected, such as closures.
///
/// The wrapped object is still tracked as a node when something references
/// it; the walk just does not descend into it.
pub struct Opaque<T>(pub T);

impl<T: 'static> Inspect for Opaque<T> {
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    fn is_opaque(&self) -> bool {
        true
    }
}
