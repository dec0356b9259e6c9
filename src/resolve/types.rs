//! Resolved value model
//!
//! The resolver turns raw JSON into these types exactly once; no later
//! pass inspects reserved keys or raw maps again.

use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;
use serde_json::Number;

use crate::types::TemplateFormat;

/// Stable index of a template instance in the resolution arena.
///
/// Reference identity is index identity: every referrer of a shared
/// document holds the same id, while separately authored instances get
/// distinct ids even when structurally equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub(crate) usize);

impl InstanceId {
    /// The raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A scalar leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    String(String),
    Number(Number),
    Boolean(bool),
}

/// A resolved value with its shape made explicit
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// A leaf value with an optional documentation note
    Scalar {
        value: ScalarValue,
        note: Option<String>,
    },
    /// An ordered sequence; all elements share one node kind
    List(Vec<ValueNode>),
    /// An opaque mapping not tied to any template
    Map {
        entries: IndexMap<String, ValueNode>,
        note: Option<String>,
    },
    /// A template instance, stored in the arena
    Instance(InstanceId),
}

impl ValueNode {
    /// Create a string scalar without a note
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar {
            value: ScalarValue::String(value.into()),
            note: None,
        }
    }

    /// Create a number scalar without a note
    pub fn number(value: impl Into<Number>) -> Self {
        Self::Scalar {
            value: ScalarValue::Number(value.into()),
            note: None,
        }
    }

    /// Create a boolean scalar without a note
    pub fn boolean(value: bool) -> Self {
        Self::Scalar {
            value: ScalarValue::Boolean(value),
            note: None,
        }
    }

    /// The shape family of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            ValueNode::Scalar {
                value: ScalarValue::String(_),
                ..
            } => NodeKind::String,
            ValueNode::Scalar {
                value: ScalarValue::Number(_),
                ..
            } => NodeKind::Number,
            ValueNode::Scalar {
                value: ScalarValue::Boolean(_),
                ..
            } => NodeKind::Boolean,
            ValueNode::List(_) => NodeKind::List,
            ValueNode::Map { .. } => NodeKind::Map,
            ValueNode::Instance(_) => NodeKind::Instance,
        }
    }
}

/// The shape family of a resolved node, used for list homogeneity checks
/// and error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    String,
    Number,
    Boolean,
    List,
    Map,
    Instance,
}

impl NodeKind {
    /// The name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::List => "list",
            NodeKind::Map => "map",
            NodeKind::Instance => "template instance",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One materialized template instance.
///
/// Field order is the authored order of the first resolution that
/// created the instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateInstance {
    /// The declared template name
    pub template: String,
    /// How the instance declared its template
    pub format: TemplateFormat,
    /// Resolved fields in authored order; delegated fields are absent
    pub fields: IndexMap<String, ValueNode>,
    /// Note attached by the field that contained this instance, if any
    pub field_note: Option<String>,
    /// Note the instance carries about itself
    pub template_note: Option<String>,
}

/// Arena owning every template instance of one resolution session.
///
/// Ids are never invalidated; the arena only grows.
#[derive(Debug, Default)]
pub struct InstanceArena {
    instances: Vec<TemplateInstance>,
}

impl InstanceArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an instance and return its id
    pub fn insert(&mut self, instance: TemplateInstance) -> InstanceId {
        let id = InstanceId(self.instances.len());
        self.instances.push(instance);
        id
    }

    /// Look up an instance by id
    pub fn get(&self, id: InstanceId) -> Option<&TemplateInstance> {
        self.instances.get(id.0)
    }

    /// Iterate instances with their ids, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &TemplateInstance)> {
        self.instances
            .iter()
            .enumerate()
            .map(|(i, instance)| (InstanceId(i), instance))
    }

    /// Number of stored instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the arena holds no instances
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Index<InstanceId> for InstanceArena {
    type Output = TemplateInstance;

    fn index(&self, id: InstanceId) -> &TemplateInstance {
        &self.instances[id.0]
    }
}
