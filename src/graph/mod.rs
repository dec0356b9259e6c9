//! Template graph collector
//!
//! Walks every resolved document and gathers the distinct template
//! instances reachable from them, grouped by template name.
//!
//! Distinctness is instance identity: an instance shared through a data
//! reference is visited once no matter how many documents reach it,
//! while separately authored twins are collected separately.

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::resolve::{InstanceArena, InstanceId, ValueNode};

/// The collected instance groups of one resolution session
#[derive(Debug, Default)]
pub struct TemplateGraph {
    groups: IndexMap<String, Vec<InstanceId>>,
}

impl TemplateGraph {
    /// Template names in first-observed order
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// The distinct instances observed for a template, in observation
    /// order
    pub fn instances(&self, template: &str) -> &[InstanceId] {
        self.groups.get(template).map_or(&[], Vec::as_slice)
    }

    /// Iterate groups in first-observed template order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[InstanceId])> {
        self.groups.iter().map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    /// Number of distinct templates
    pub fn template_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of distinct instances across all templates
    pub fn instance_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Collect every distinct instance reachable from the given roots.
///
/// Roots are expected in sorted document-path order so the observed
/// template order is deterministic.
pub fn collect(roots: &[(String, ValueNode)], arena: &InstanceArena) -> TemplateGraph {
    let mut visited: HashSet<InstanceId> = HashSet::new();
    let mut groups: IndexMap<String, Vec<InstanceId>> = IndexMap::new();

    for (_, node) in roots {
        visit(node, arena, &mut visited, &mut groups);
    }

    let graph = TemplateGraph { groups };
    debug!(
        templates = graph.template_count(),
        instances = graph.instance_count(),
        "Collected template graph"
    );
    graph
}

fn visit(
    node: &ValueNode,
    arena: &InstanceArena,
    visited: &mut HashSet<InstanceId>,
    groups: &mut IndexMap<String, Vec<InstanceId>>,
) {
    match node {
        ValueNode::Scalar { .. } => {}
        ValueNode::List(elements) => {
            for element in elements {
                visit(element, arena, visited, groups);
            }
        }
        ValueNode::Map { entries, .. } => {
            for value in entries.values() {
                visit(value, arena, visited, groups);
            }
        }
        ValueNode::Instance(id) => {
            if !visited.insert(*id) {
                return;
            }
            let instance = &arena[*id];
            groups.entry(instance.template.clone()).or_default().push(*id);
            for value in instance.fields.values() {
                visit(value, arena, visited, groups);
            }
        }
    }
}
