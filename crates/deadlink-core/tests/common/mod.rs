use deadlink_core::object::{Dynamic, ObjectRef, Value};
use deadlink_core::snapshot::{Edge, EdgeKey};
use deadlink_core::{impl_inspect, ObjectId, Snapshot};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A bare property bag, named like the scripting-world `stdClass`
#[allow(dead_code)]
pub fn std_object() -> Rc<Dynamic> {
    Rc::new(Dynamic::new("stdClass"))
}

/// Stand-in for an immutable date value object
#[allow(dead_code)]
pub fn date_object() -> Rc<Dynamic> {
    Rc::new(Dynamic::new("DateTimeImmutable"))
}

/// `stdClass { foo: stdClass, bar: DateTimeImmutable }`
#[allow(dead_code)]
pub fn foo_bar_object() -> Rc<Dynamic> {
    Rc::new(Dynamic::with(
        "stdClass",
        [
            ("foo", Value::object(std_object())),
            ("bar", Value::object(date_object())),
        ],
    ))
}

/// Node edge keys, sorted, keyed by identity; order-insensitive view of a snapshot
#[allow(dead_code)]
pub fn edge_sets(snapshot: &Snapshot) -> BTreeMap<ObjectId, Vec<EdgeKey>> {
    snapshot
        .iter()
        .map(|(object, edges)| {
            let mut keys: Vec<EdgeKey> = edges.iter().map(Edge::key).collect();
            keys.sort();
            (object.id(), keys)
        })
        .collect()
}

/// Paths of the reference edges pointing at `object`
#[allow(dead_code)]
pub fn paths_to(snapshot: &Snapshot, object: &ObjectRef) -> Vec<String> {
    snapshot
        .edges(object)
        .unwrap_or_default()
        .iter()
        .filter_map(|edge| edge.path().map(str::to_string))
        .collect()
}

// Typed fixtures for statically shaped graphs

#[allow(dead_code)]
pub struct Engine {
    pub serial: String,
}
impl_inspect!(Engine { serial });

#[allow(dead_code)]
pub struct Wheel {
    pub position: u8,
}
impl_inspect!(Wheel { position });

#[allow(dead_code)]
pub struct Car {
    pub engine: Rc<Engine>,
    pub wheels: Vec<Rc<Wheel>>,
    pub spare: RefCell<Option<Rc<Wheel>>>,
    pub parts: BTreeMap<String, Rc<Engine>>,
}
impl_inspect!(Car { engine, wheels, spare, parts });

#[allow(dead_code)]
pub fn car() -> Rc<Car> {
    Rc::new(Car {
        engine: Rc::new(Engine {
            serial: "E-1".to_string(),
        }),
        wheels: (0..4).map(|position| Rc::new(Wheel { position })).collect(),
        spare: RefCell::new(None),
        parts: BTreeMap::new(),
    })
}
