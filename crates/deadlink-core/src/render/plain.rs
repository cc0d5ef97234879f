use crate::object::ObjectRef;
use crate::snapshot::{Edge, Snapshot};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// One tracked object in a [`Report`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    /// `"[alias] <type> <identity> (<reference count>)"`
    pub header: String,
    /// One `"<path> parent: <type|gone>"` line per non-root edge
    pub references: Vec<String>,
}

/// Rendered view of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Caller-supplied context, emitted first
    #[serde(flatten)]
    pub data: BTreeMap<String, JsonValue>,
    #[serde(rename = "Total count")]
    pub total_count: usize,
    #[serde(rename = "References")]
    pub references: Vec<NodeReport>,
}

impl Report {
    /// Pretty-printed JSON form
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a caller-supplied data value cannot be
    /// encoded.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.data {
            writeln!(f, "{}: {}", key, value)?;
        }
        writeln!(f, "Total count: {}", self.total_count)?;
        for node in &self.references {
            writeln!(f, "{}", node.header)?;
            for line in &node.references {
                writeln!(f, "  {}", line)?;
            }
        }
        Ok(())
    }
}

/// Formats a snapshot's nodes and their incoming references.
///
/// ```
/// use std::rc::Rc;
/// use deadlink_core::object::{Dynamic, Value};
/// use deadlink_core::render::PlainRenderer;
/// use deadlink_core::Snapshot;
///
/// let object = Rc::new(Dynamic::new("Service"));
/// object.set("cache", Value::object(Rc::new(Dynamic::new("Cache"))));
/// let snapshot = Snapshot::make([("svc", &object)]);
///
/// let report = PlainRenderer::new(&snapshot).data("stage", "after").render(true);
/// assert_eq!(report.total_count, 2);
/// assert_eq!(report.references.len(), 1);
/// assert_eq!(report.references[0].references, vec!["svc.cache parent: Service"]);
/// ```
pub struct PlainRenderer<'a> {
    snapshot: &'a Snapshot,
    data: BTreeMap<String, JsonValue>,
}

impl<'a> PlainRenderer<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            data: BTreeMap::new(),
        }
    }

    /// Attach a context entry to the report
    pub fn data(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Build the report; `skip_empty` drops nodes with no reference edges
    pub fn render(&self, skip_empty: bool) -> Report {
        let mut references = Vec::new();

        for (object, edges) in self.snapshot.iter() {
            let lines: Vec<String> = edges.iter().filter_map(reference_line).collect();
            if skip_empty && lines.is_empty() {
                continue;
            }
            references.push(NodeReport {
                header: self.header(&object, lines.len()),
                references: lines,
            });
        }

        Report {
            data: self.data.clone(),
            total_count: self.snapshot.count(),
            references,
        }
    }

    fn header(&self, object: &ObjectRef, count: usize) -> String {
        let alias = match self.snapshot.root_alias(object).and_then(|a| a.name()) {
            Some(name) => format!("[{}] ", name),
            None => String::new(),
        };
        format!("{}{} {} ({})", alias, object.type_name(), object.id(), count)
    }
}

fn reference_line(edge: &Edge) -> Option<String> {
    let Edge::Ref { source, path } = edge else {
        return None;
    };
    let parent = match source.get() {
        Some(parent) => parent.type_name().to_string(),
        None => "gone".to_string(),
    };
    Some(format!("{} parent: {}", path, parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Dynamic, Value};
    use std::rc::Rc;

    #[test]
    fn test_root_header_carries_alias_and_zero_count() {
        let root = Rc::new(Dynamic::new("Root"));
        let snapshot = Snapshot::make([("main", &root)]);

        let report = PlainRenderer::new(&snapshot).render(false);

        assert_eq!(report.references.len(), 1);
        assert!(report.references[0].header.starts_with("[main] Root #"));
        assert!(report.references[0].header.ends_with("(0)"));
    }

    #[test]
    fn test_positional_root_has_no_alias_prefix() {
        let root = Rc::new(Dynamic::new("Root"));
        let snapshot = Snapshot::from_objects([&root]);

        let report = PlainRenderer::new(&snapshot).render(false);

        assert!(report.references[0].header.starts_with("Root #"));
    }

    #[test]
    fn test_gone_parent_is_reported() {
        let child = Rc::new(Dynamic::new("Child"));
        let parent = Rc::new(Dynamic::new("Parent"));
        parent.set("child", Value::object(&child));
        let snapshot = Snapshot::make([("p", &parent)]);

        drop(parent);
        let report = PlainRenderer::new(&snapshot).render(true);

        assert_eq!(report.references.len(), 1);
        assert_eq!(report.references[0].references, vec!["p.child parent: gone"]);
    }

    #[test]
    fn test_json_uses_report_keys() {
        let root = Rc::new(Dynamic::new("Root"));
        let snapshot = Snapshot::make([("main", &root)]);

        let json = PlainRenderer::new(&snapshot)
            .data("run", 7)
            .render(false)
            .to_json()
            .unwrap();

        assert!(json.contains("\"Total count\": 1"));
        assert!(json.contains("\"References\""));
        assert!(json.contains("\"run\": 7"));
    }
}
