//! Object capability layer.
//!
//! The snapshot engine never reflects over memory on its own. Every object it
//! can walk implements [`Inspect`], which enumerates the fields the object
//! holds (public or not) as [`Field`]s. Objects are shared through
//! [`ObjectRef`] (strong, `Rc`-backed) and remembered through [`WeakHandle`]
//! (non-owning), both carrying the same address-derived [`ObjectId`].
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use deadlink_core::impl_inspect;
//! use deadlink_core::object::{children_of, ObjectRef};
//!
//! struct Leaf;
//! impl_inspect!(Leaf {});
//!
//! struct Holder {
//!     leaf: RefCell<Option<Rc<Leaf>>>,
//!     count: u32,
//! }
//! impl_inspect!(Holder { leaf, count });
//!
//! let holder = Rc::new(Holder { leaf: RefCell::new(Some(Rc::new(Leaf))), count: 1 });
//! let children = children_of(&ObjectRef::from(&holder));
//! assert_eq!(children.len(), 1);
//! assert_eq!(children[0].1, "leaf");
//! ```

mod dynamic;
mod value;

pub use dynamic::{Dynamic, Opaque};
pub use value::{AsValue, Field, Value};

use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

/// Field enumeration capability.
///
/// Implementors list every field they hold, regardless of visibility.
/// Use [`impl_inspect!`](crate::impl_inspect) for plain structs.
pub trait Inspect: 'static {
    /// Runtime type name used in paths, ignore rules and reports
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Directly held fields, in declaration order
    fn fields(&self) -> Vec<Field>;

    /// Opaque objects are tracked as nodes but never walked into
    fn is_opaque(&self) -> bool {
        false
    }
}

/// Identity of a live allocation.
///
/// Derived from the allocation address. The address stays reserved while any
/// [`ObjectRef`] or [`WeakHandle`] to it exists, so an identity held next to a
/// weak handle can never alias a different object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn of(object: &ObjectRef) -> Self {
        ObjectId(Rc::as_ptr(&object.0).cast::<()>() as usize)
    }

    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Strong, type-erased handle to an inspectable object.
#[derive(Clone)]
pub struct ObjectRef(Rc<dyn Inspect>);

impl ObjectRef {
    pub fn new<T: Inspect>(value: T) -> Self {
        ObjectRef(Rc::new(value))
    }

    pub fn id(&self) -> ObjectId {
        ObjectId::of(self)
    }

    /// True if both handles point at the same allocation
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        self.id() == other.id()
    }

    pub fn downgrade(&self) -> WeakHandle {
        WeakHandle {
            id: self.id(),
            inner: Rc::downgrade(&self.0),
        }
    }
}

impl Deref for ObjectRef {
    type Target = dyn Inspect;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl<T: Inspect> From<Rc<T>> for ObjectRef {
    fn from(rc: Rc<T>) -> Self {
        ObjectRef(rc)
    }
}

impl<T: Inspect> From<&Rc<T>> for ObjectRef {
    fn from(rc: &Rc<T>) -> Self {
        ObjectRef(rc.clone())
    }
}

impl From<&ObjectRef> for ObjectRef {
    fn from(object: &ObjectRef) -> Self {
        object.clone()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name(), self.id())
    }
}

/// Non-owning handle.
///
/// Never keeps its target alive; [`WeakHandle::get`] reports `None` once the
/// last strong reference is gone.
#[derive(Clone)]
pub struct WeakHandle {
    id: ObjectId,
    inner: Weak<dyn Inspect>,
}

impl WeakHandle {
    /// Identity of the referenced object, available even once it is gone
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Resolve to a strong handle, or `None` if the target was dropped
    pub fn get(&self) -> Option<ObjectRef> {
        self.inner.upgrade().map(ObjectRef)
    }

    pub fn is_gone(&self) -> bool {
        self.inner.strong_count() == 0
    }

    /// True if this handle resolves to `object`
    pub fn refers_to(&self, object: &ObjectRef) -> bool {
        !self.is_gone() && self.id == object.id()
    }
}

impl fmt::Debug for WeakHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(object) => write!(f, "Weak({:?})", object),
            None => write!(f, "Weak(gone {})", self.id),
        }
    }
}

/// Direct object-typed children of `object`, with the field path to each.
///
/// Object fields yield `(value, "field")`; container fields yield
/// `(element, "field[key]")` for object elements one level deep. Nested
/// containers, primitives and opaque objects are skipped.
pub fn children_of(object: &ObjectRef) -> Vec<(ObjectRef, String)> {
    if object.is_opaque() {
        return Vec::new();
    }

    let mut children = Vec::new();
    for Field { name, value } in object.fields() {
        match value {
            Value::Object(child) => children.push((child, name)),
            Value::Container(entries) => {
                for (key, element) in entries {
                    if let Value::Object(child) = element {
                        children.push((child, format!("{}[{}]", name, key)));
                    }
                }
            }
            Value::Primitive => {}
        }
    }
    children
}
