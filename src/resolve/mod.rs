//! Value resolver
//!
//! Converts raw document JSON into typed value nodes, resolving data
//! references and template directives as it descends.
//!
//! # Overview
//!
//! - `ValueNode` - the resolved value model (scalar, list, map, instance)
//! - `InstanceArena` - owns every materialized template instance
//! - `Resolver` - memoized per-document resolution over a store
//!
//! Resolution runs at most once per document. A data reference hands the
//! same instance id to every referrer, which is what makes shared
//! sub-objects count once during collection.

mod types;

pub use types::{InstanceArena, InstanceId, NodeKind, ScalarValue, TemplateInstance, ValueNode};


use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::store::{json_kind, Document, DocumentStore};
use crate::types::{
    field_notes_key, is_reserved_key, JsonObject, JsonValue, TemplateFormat, DATA_URL_KEY,
    DELEGATE_KEY, NOTES_KEY, TEMPLATE_KEY, VIEW_KEY,
};

/// Resolves documents from a store into value nodes.
///
/// Holds the instance arena and the per-document memo for one
/// resolution session.
pub struct Resolver<'a> {
    store: &'a DocumentStore,
    arena: InstanceArena,
    resolved: HashMap<String, ValueNode>,
    in_flight: Vec<String>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a loaded store
    pub fn new(store: &'a DocumentStore) -> Self {
        Self {
            store,
            arena: InstanceArena::new(),
            resolved: HashMap::new(),
            in_flight: Vec::new(),
        }
    }

    /// Resolve every document in the store, in sorted path order.
    ///
    /// Returns the top-level node of each document paired with its path.
    pub fn resolve_all(&mut self) -> Result<Vec<(String, ValueNode)>> {
        let store = self.store;
        let mut roots = Vec::with_capacity(store.len());
        for path in store.paths() {
            let node = self.resolve_document(path)?;
            roots.push((path.clone(), node));
        }
        debug!(
            documents = roots.len(),
            instances = self.arena.len(),
            "Resolution complete"
        );
        Ok(roots)
    }

    /// Resolve one document, memoized.
    ///
    /// Re-entering a document that is still being resolved means a data
    /// reference chain loops back on itself.
    pub fn resolve_document(&mut self, path: &str) -> Result<ValueNode> {
        if let Some(node) = self.resolved.get(path) {
            return Ok(node.clone());
        }
        if self.in_flight.iter().any(|p| p == path) {
            let chain = format!("{} -> {}", self.in_flight.join(" -> "), path);
            return Err(Error::cyclic_reference(path, chain));
        }

        let document = self.store.get(path).ok_or_else(|| {
            Error::internal(format!("document '{path}' requested but never loaded"))
        })?;

        self.in_flight.push(path.to_string());
        let outcome = self.resolve_object(document, &document.object, None);
        self.in_flight.pop();

        let node = outcome?.ok_or_else(|| {
            Error::invalid_document(path, "top-level value must not be delegated")
        })?;
        self.resolved.insert(path.to_string(), node.clone());
        Ok(node)
    }

    /// The instance arena built so far
    pub fn arena(&self) -> &InstanceArena {
        &self.arena
    }

    /// Consume the resolver, keeping the arena
    pub fn into_arena(self) -> InstanceArena {
        self.arena
    }

    /// Resolve one raw JSON value.
    ///
    /// Returns `None` when the value is delegated, which drops the
    /// owning field or list element.
    fn resolve_value(
        &mut self,
        doc: &Document,
        value: &JsonValue,
        note: Option<&str>,
    ) -> Result<Option<ValueNode>> {
        match value {
            JsonValue::Null => Err(Error::invalid_document(
                &doc.path,
                "null values are not allowed; omit the field or use _delegate",
            )),
            JsonValue::Bool(b) => Ok(Some(ValueNode::Scalar {
                value: ScalarValue::Boolean(*b),
                note: note.map(str::to_string),
            })),
            JsonValue::Number(n) => Ok(Some(ValueNode::Scalar {
                value: ScalarValue::Number(n.clone()),
                note: note.map(str::to_string),
            })),
            JsonValue::String(s) => Ok(Some(ValueNode::Scalar {
                value: ScalarValue::String(s.clone()),
                note: note.map(str::to_string),
            })),
            JsonValue::Array(items) => self.resolve_list(doc, items).map(Some),
            JsonValue::Object(object) => self.resolve_object(doc, object, note),
        }
    }

    /// Resolve a raw object: delegation, data reference, template
    /// instance, or plain map, checked in that order.
    fn resolve_object(
        &mut self,
        doc: &Document,
        object: &JsonObject,
        note: Option<&str>,
    ) -> Result<Option<ValueNode>> {
        if object.contains_key(DELEGATE_KEY) {
            return Ok(None);
        }
        if let Some(url_value) = object.get(DATA_URL_KEY) {
            return self.resolve_reference(doc, object, url_value).map(Some);
        }
        if let Some(name_value) = object.get(TEMPLATE_KEY) {
            let template = key_string(doc, TEMPLATE_KEY, name_value)?;
            return self
                .resolve_instance(doc, object, template, TemplateFormat::Structured, note)
                .map(Some);
        }
        if let Some(name_value) = object.get(VIEW_KEY) {
            let template = key_string(doc, VIEW_KEY, name_value)?;
            return self
                .resolve_instance(doc, object, template, TemplateFormat::Embedded, note)
                .map(Some);
        }

        let entries = self.resolve_entries(doc, object)?;
        Ok(Some(ValueNode::Map {
            entries,
            note: note.map(str::to_string),
        }))
    }

    /// Materialize a template instance in the arena
    fn resolve_instance(
        &mut self,
        doc: &Document,
        object: &JsonObject,
        template: String,
        format: TemplateFormat,
        field_note: Option<&str>,
    ) -> Result<ValueNode> {
        let template_note = match object.get(NOTES_KEY) {
            None => None,
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(Error::invalid_document(
                    &doc.path,
                    format!("instance note must be a string, got {}", json_kind(other)),
                ))
            }
        };

        let fields = self.resolve_entries(doc, object)?;
        let id = self.arena.insert(TemplateInstance {
            template,
            format,
            fields,
            field_note: field_note.map(str::to_string),
            template_note,
        });
        Ok(ValueNode::Instance(id))
    }

    /// Resolve the non-reserved entries of an object in authored order,
    /// pairing each with its note sibling and dropping delegated values.
    fn resolve_entries(
        &mut self,
        doc: &Document,
        object: &JsonObject,
    ) -> Result<IndexMap<String, ValueNode>> {
        let mut entries = IndexMap::new();
        for (key, raw) in object {
            if is_reserved_key(key) {
                continue;
            }
            let note = entry_note(doc, object, key)?;
            if let Some(node) = self.resolve_value(doc, raw, note.as_deref())? {
                entries.insert(key.clone(), node);
            }
        }
        Ok(entries)
    }

    /// Resolve a list, enforcing that all kept elements share one kind
    fn resolve_list(&mut self, doc: &Document, items: &[JsonValue]) -> Result<ValueNode> {
        let mut elements: Vec<ValueNode> = Vec::with_capacity(items.len());
        for item in items {
            let Some(node) = self.resolve_value(doc, item, None)? else {
                continue;
            };
            if let Some(first) = elements.first() {
                if node.kind() != first.kind() {
                    return Err(Error::heterogeneous_list(
                        &doc.path,
                        first.kind().name(),
                        node.kind().name(),
                    ));
                }
            }
            elements.push(node);
        }
        Ok(ValueNode::List(elements))
    }

    /// Substitute a data reference with the resolved target document.
    ///
    /// The referrer and the target end up sharing one instance id.
    fn resolve_reference(
        &mut self,
        doc: &Document,
        object: &JsonObject,
        url_value: &JsonValue,
    ) -> Result<ValueNode> {
        let JsonValue::String(url) = url_value else {
            return Err(Error::invalid_document(
                &doc.path,
                format!("data reference must be a string, got {}", json_kind(url_value)),
            ));
        };
        if object.contains_key(TEMPLATE_KEY) || object.contains_key(VIEW_KEY) {
            return Err(Error::template_override(&doc.path, url));
        }

        let target = resolve_data_url(doc.directory(), url);
        if !self.store.contains(&target) {
            return Err(Error::missing_data_reference(&doc.path, url));
        }
        debug!(from = %doc.path, to = %target, "Following data reference");
        self.resolve_document(&target)
    }
}

/// Read a template or view name, which must be a string
fn key_string(doc: &Document, key: &str, value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        other => Err(Error::invalid_document(
            &doc.path,
            format!("'{key}' must be a string, got {}", json_kind(other)),
        )),
    }
}

/// Read the note sibling for an entry, which must be a string if present
fn entry_note(doc: &Document, object: &JsonObject, key: &str) -> Result<Option<String>> {
    match object.get(&field_notes_key(key)) {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::invalid_document(
            &doc.path,
            format!(
                "note for field '{key}' must be a string, got {}",
                json_kind(other)
            ),
        )),
    }
}

/// Resolve a data reference URL against the referring document's
/// directory.
///
/// URLs starting with `/` are root-relative; anything else is relative
/// to `referrer_dir`. `.` and `..` segments are normalized, with `..`
/// saturating at the root.
pub fn resolve_data_url(referrer_dir: &str, url: &str) -> String {
    let combined = if url.starts_with('/') {
        url.to_string()
    } else {
        format!("{referrer_dir}/{url}")
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in combined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}
