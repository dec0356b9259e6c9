//! Aggregated template types

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Serializer};

use crate::types::TemplateFormat;

/// The kind family of a value observed for a field in one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Boolean,
    String,
    Number,
    List,
    Map,
    TemplateObject,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::List => write!(f, "list"),
            ValueKind::Map => write!(f, "map"),
            ValueKind::TemplateObject => write!(f, "template-object"),
        }
    }
}

/// The unified type of a field after aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveType {
    Boolean,
    String,
    Number,
    /// An opaque string-to-string mapping, either from untyped map
    /// observations or from a registered map template
    StringMap,
    /// A structured reference to one or more concrete templates
    TemplateObject(BTreeSet<String>),
    /// An ordered list; the item type is `None` when every observed
    /// list was empty
    List(Option<Box<EffectiveType>>),
}

impl EffectiveType {
    /// The concrete template names this type references, directly or
    /// through its list item type
    pub fn referenced_templates(&self) -> BTreeSet<String> {
        match self {
            EffectiveType::TemplateObject(names) => names.clone(),
            EffectiveType::List(Some(item)) => item.referenced_templates(),
            _ => BTreeSet::new(),
        }
    }
}

impl fmt::Display for EffectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectiveType::Boolean => write!(f, "boolean"),
            EffectiveType::String => write!(f, "string"),
            EffectiveType::Number => write!(f, "number"),
            EffectiveType::StringMap => write!(f, "map<string, string>"),
            EffectiveType::TemplateObject(_) => write!(f, "template-object"),
            EffectiveType::List(None) => write!(f, "list<unknown>"),
            EffectiveType::List(Some(item)) => write!(f, "list<{item}>"),
        }
    }
}

impl Serialize for EffectiveType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One unified field of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Field name as authored
    pub name: String,

    /// Every kind family observed for this field across instances
    pub observed_kinds: BTreeSet<ValueKind>,

    /// The unified type all observations agree on
    pub effective_type: EffectiveType,

    /// Concrete template names, when the effective type references
    /// templates
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub template_names: BTreeSet<String>,

    /// Deduplicated documentation notes from every observation
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub notes: BTreeSet<String>,
}

/// One aggregated template: the union of every instance observed with
/// its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Template name as declared in documents
    pub name: String,

    /// Derived hierarchical namespace
    pub namespace: String,

    /// Unified fields in first-seen order across the instance group
    pub fields: Vec<FieldDefinition>,

    /// Deduplicated instance-level notes
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub notes: BTreeSet<String>,

    /// Declaration formats observed for this template
    pub formats: BTreeSet<TemplateFormat>,

    /// Number of distinct instances that contributed
    pub instance_count: usize,
}

impl Template {
    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Options steering aggregation
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    /// Templates whose instances are opaque string maps rather than
    /// structured references
    pub map_templates: BTreeSet<String>,

    /// Derived namespace per template name
    pub namespaces: BTreeMap<String, String>,
}

impl AggregateOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the registered map templates
    #[must_use]
    pub fn with_map_templates(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.map_templates = names.into_iter().collect();
        self
    }

    /// Set the derived namespaces
    #[must_use]
    pub fn with_namespaces(mut self, namespaces: BTreeMap<String, String>) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// The namespace derived for a template, empty when none was
    pub fn namespace_of(&self, template: &str) -> String {
        self.namespaces.get(template).cloned().unwrap_or_default()
    }
}
