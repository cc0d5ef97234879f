use super::{Inspect, ObjectRef};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::rc::{Rc, Weak};

/// A field value as seen by the walker.
#[derive(Debug, Clone)]
pub enum Value {
    /// A strong reference to another object; becomes a graph edge
    Object(ObjectRef),
    /// An ordered or keyed container; object elements become edges
    Container(Vec<(String, Value)>),
    /// Anything without reference identity
    Primitive,
}

impl Value {
    pub fn object(object: impl Into<ObjectRef>) -> Self {
        Value::Object(object.into())
    }

    /// Container keyed by position
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Container(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item.into()))
                .collect(),
        )
    }

    /// Container keyed by the given keys
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Into<Value>,
    {
        Value::Container(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.into()))
                .collect(),
        )
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Short shape name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Container(_) => "container",
            Value::Primitive => "primitive",
        }
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl From<&ObjectRef> for Value {
    fn from(object: &ObjectRef) -> Self {
        Value::Object(object.clone())
    }
}

impl<T: Inspect> From<Rc<T>> for Value {
    fn from(rc: Rc<T>) -> Self {
        Value::Object(rc.into())
    }
}

impl<T: Inspect> From<&Rc<T>> for Value {
    fn from(rc: &Rc<T>) -> Self {
        Value::Object(rc.into())
    }
}

/// One named field of an object.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Conversion of a field's current content into a [`Value`].
pub trait AsValue {
    fn as_value(&self) -> Value;
}

impl AsValue for Value {
    fn as_value(&self) -> Value {
        self.clone()
    }
}

impl AsValue for ObjectRef {
    fn as_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl<T: Inspect> AsValue for Rc<T> {
    fn as_value(&self) -> Value {
        Value::Object(self.into())
    }
}

// Weak fields never pin their target, so they are not edges.
impl<T: ?Sized> AsValue for Weak<T> {
    fn as_value(&self) -> Value {
        Value::Primitive
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value {
        match self {
            Some(inner) => inner.as_value(),
            None => Value::Primitive,
        }
    }
}

impl<T: AsValue> AsValue for RefCell<T> {
    fn as_value(&self) -> Value {
        match self.try_borrow() {
            Ok(inner) => inner.as_value(),
            Err(_) => Value::Primitive,
        }
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_value(&self) -> Value {
        Value::list(self.iter().map(AsValue::as_value))
    }
}

impl<T: AsValue> AsValue for VecDeque<T> {
    fn as_value(&self) -> Value {
        Value::list(self.iter().map(AsValue::as_value))
    }
}

impl<K: Display, V: AsValue> AsValue for BTreeMap<K, V> {
    fn as_value(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k, v.as_value())))
    }
}

impl<K: Display, V: AsValue, S> AsValue for HashMap<K, V, S> {
    fn as_value(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k, v.as_value())))
    }
}

macro_rules! primitive_as_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsValue for $ty {
                fn as_value(&self) -> Value {
                    Value::Primitive
                }
            }
        )*
    };
}

primitive_as_value!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

/// Implement [`Inspect`] for a struct by listing the fields to enumerate.
///
/// Every listed field must implement [`AsValue`].
///
/// ```
/// use std::rc::Rc;
/// use deadlink_core::impl_inspect;
///
/// struct Engine;
/// impl_inspect!(Engine {});
///
/// struct Car {
///     engine: Rc<Engine>,
///     wheels: u8,
/// }
/// impl_inspect!(Car { engine, wheels });
/// ```
#[macro_export]
macro_rules! impl_inspect {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::object::Inspect for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::object::Field> {
                ::std::vec![
                    $(
                        $crate::object::Field::new(
                            stringify!($field),
                            $crate::object::AsValue::as_value(&self.$field),
                        )
                    ),*
                ]
            }
        }
    };
}
