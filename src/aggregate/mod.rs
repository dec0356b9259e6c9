//! Template aggregator
//!
//! Folds the collected instance groups into one `Template` per template
//! name, unifying each field's observed value shapes into a single
//! effective type.
//!
//! # Overview
//!
//! - `Template` / `FieldDefinition` - the aggregated output model
//! - `ValueKind` / `EffectiveType` - observation and unification types
//! - `aggregate` - the pure fold over a collected graph
//!
//! Unification accepts exactly one kind per field, with one sanctioned
//! heterogeneity: a field observed sometimes as inline text and
//! sometimes as a structured reference unifies to the reference type.
//! Every other mixture is an error naming the template and field.

mod types;

pub use types::{AggregateOptions, EffectiveType, FieldDefinition, Template, ValueKind};


use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::TemplateGraph;
use crate::resolve::{InstanceArena, InstanceId, ScalarValue, ValueNode};

/// Aggregate every collected instance group into a template.
///
/// Templates come out in first-observed name order; fields come out in
/// first-seen order across each group.
pub fn aggregate(
    graph: &TemplateGraph,
    arena: &InstanceArena,
    options: &AggregateOptions,
) -> Result<Vec<Template>> {
    let mut templates = Vec::with_capacity(graph.template_count());
    for (name, ids) in graph.iter() {
        templates.push(aggregate_template(name, ids, arena, options)?);
    }
    debug!(templates = templates.len(), "Aggregation complete");
    Ok(templates)
}

fn aggregate_template(
    name: &str,
    ids: &[InstanceId],
    arena: &InstanceArena,
    options: &AggregateOptions,
) -> Result<Template> {
    let mut observations: IndexMap<String, FieldObservations> = IndexMap::new();
    let mut notes = BTreeSet::new();
    let mut formats = BTreeSet::new();

    for id in ids {
        let instance = &arena[*id];
        formats.insert(instance.format);
        if let Some(note) = &instance.template_note {
            notes.insert(note.clone());
        }
        for (field, node) in &instance.fields {
            observations
                .entry(field.clone())
                .or_default()
                .observe(node, arena);
        }
    }

    let mut fields = Vec::with_capacity(observations.len());
    for (field_name, field_observations) in observations {
        fields.push(field_observations.unify(name, &field_name, options)?);
    }

    Ok(Template {
        name: name.to_string(),
        namespace: options.namespace_of(name),
        fields,
        notes,
        formats,
        instance_count: ids.len(),
    })
}

/// Everything seen for one field across an instance group
#[derive(Debug, Default)]
struct FieldObservations {
    kinds: BTreeSet<ValueKind>,
    template_names: BTreeSet<String>,
    item_kinds: BTreeSet<ValueKind>,
    item_template_names: BTreeSet<String>,
    notes: BTreeSet<String>,
}

impl FieldObservations {
    /// Record one observed value node
    fn observe(&mut self, node: &ValueNode, arena: &InstanceArena) {
        match node {
            ValueNode::Scalar { value, note } => {
                self.kinds.insert(scalar_kind(value));
                if let Some(note) = note {
                    self.notes.insert(note.clone());
                }
            }
            ValueNode::Map { note, .. } => {
                self.kinds.insert(ValueKind::Map);
                if let Some(note) = note {
                    self.notes.insert(note.clone());
                }
            }
            ValueNode::Instance(id) => {
                let instance = &arena[*id];
                self.kinds.insert(ValueKind::TemplateObject);
                self.template_names.insert(instance.template.clone());
                if let Some(note) = &instance.field_note {
                    self.notes.insert(note.clone());
                }
            }
            ValueNode::List(elements) => {
                self.kinds.insert(ValueKind::List);
                for element in elements {
                    self.observe_item(element, arena);
                }
            }
        }
    }

    /// Record one list element; elements carry no notes of their own
    fn observe_item(&mut self, node: &ValueNode, arena: &InstanceArena) {
        match node {
            ValueNode::Scalar { value, .. } => {
                self.item_kinds.insert(scalar_kind(value));
            }
            ValueNode::Map { .. } => {
                self.item_kinds.insert(ValueKind::Map);
            }
            ValueNode::Instance(id) => {
                self.item_kinds.insert(ValueKind::TemplateObject);
                self.item_template_names.insert(arena[*id].template.clone());
            }
            ValueNode::List(_) => {
                self.item_kinds.insert(ValueKind::List);
            }
        }
    }

    /// Collapse the observations into one field definition
    fn unify(
        self,
        template: &str,
        field: &str,
        options: &AggregateOptions,
    ) -> Result<FieldDefinition> {
        let unified = unify_kinds(&self.kinds, template, field)?;

        let (effective_type, template_names) = if unified == ValueKind::List {
            if self.item_kinds.is_empty() {
                (EffectiveType::List(None), BTreeSet::new())
            } else {
                let item_kind = unify_kinds(&self.item_kinds, template, field)?;
                let (item_type, names) =
                    effective_of(item_kind, self.item_template_names, options);
                (EffectiveType::List(Some(Box::new(item_type))), names)
            }
        } else {
            effective_of(unified, self.template_names, options)
        };

        Ok(FieldDefinition {
            name: field.to_string(),
            observed_kinds: self.kinds,
            effective_type,
            template_names,
            notes: self.notes,
        })
    }
}

/// Unify a set of observed kind families into one kind.
///
/// Exactly one kind passes through. The pair {string, template-object}
/// unifies to template-object. Anything else conflicts. An empty set
/// means the caller recorded a field without observing it.
fn unify_kinds(kinds: &BTreeSet<ValueKind>, template: &str, field: &str) -> Result<ValueKind> {
    let Some(first) = kinds.first() else {
        return Err(Error::internal(format!(
            "field '{field}' of template '{template}' has no observed kinds"
        )));
    };
    if kinds.len() == 1 {
        return Ok(*first);
    }
    if kinds.len() == 2
        && kinds.contains(&ValueKind::String)
        && kinds.contains(&ValueKind::TemplateObject)
    {
        return Ok(ValueKind::TemplateObject);
    }
    Err(Error::conflicting_field_type(
        template,
        field,
        kind_list(kinds),
    ))
}

/// Map a unified kind to its effective type and referenced names
fn effective_of(
    kind: ValueKind,
    names: BTreeSet<String>,
    options: &AggregateOptions,
) -> (EffectiveType, BTreeSet<String>) {
    match kind {
        ValueKind::Boolean => (EffectiveType::Boolean, BTreeSet::new()),
        ValueKind::String => (EffectiveType::String, BTreeSet::new()),
        ValueKind::Number => (EffectiveType::Number, BTreeSet::new()),
        ValueKind::Map => (EffectiveType::StringMap, BTreeSet::new()),
        ValueKind::TemplateObject => template_object_type(names, options),
        // A list observed as a list item; its own elements stay untyped
        ValueKind::List => (EffectiveType::List(None), BTreeSet::new()),
    }
}

/// A structured reference, unless the sole referenced template is
/// registered as a map template
fn template_object_type(
    names: BTreeSet<String>,
    options: &AggregateOptions,
) -> (EffectiveType, BTreeSet<String>) {
    if names.len() == 1 {
        if let Some(single) = names.first() {
            if options.map_templates.contains(single) {
                return (EffectiveType::StringMap, BTreeSet::new());
            }
        }
    }
    (EffectiveType::TemplateObject(names.clone()), names)
}

fn scalar_kind(value: &ScalarValue) -> ValueKind {
    match value {
        ScalarValue::String(_) => ValueKind::String,
        ScalarValue::Number(_) => ValueKind::Number,
        ScalarValue::Boolean(_) => ValueKind::Boolean,
    }
}

fn kind_list(kinds: &BTreeSet<ValueKind>) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
