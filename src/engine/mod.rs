//! Cast engine module
//!
//! Full-pass orchestration: load, resolve, collect, aggregate.
//!
//! # Overview
//!
//! The engine module provides:
//! - `CastEngine` - Runs one complete cast pass over a project's documents
//! - `CastStats` - Statistics describing the last pass
//!
//! A pass has no incremental mode. Every run re-reads every document and
//! re-derives every template, which keeps the output a pure function of
//! the corpus on disk.

mod types;

pub use types::CastStats;

use std::time::Instant;

use tracing::{debug, info};

use crate::aggregate::{aggregate, AggregateOptions, Template};
use crate::error::Result;
use crate::graph::collect;
use crate::namespace::derive_namespaces;
use crate::project::ProjectDefinition;
use crate::resolve::Resolver;
use crate::store::DocumentStore;

/// Engine for casting a document corpus into typed templates
pub struct CastEngine {
    /// Project definition
    project: ProjectDefinition,
    /// Statistics from the last pass
    stats: CastStats,
}

impl CastEngine {
    /// Create a new cast engine
    pub fn new(project: ProjectDefinition) -> Self {
        Self {
            project,
            stats: CastStats::default(),
        }
    }

    /// Get the project definition
    pub fn project(&self) -> &ProjectDefinition {
        &self.project
    }

    /// Get statistics from the last pass
    pub fn stats(&self) -> &CastStats {
        &self.stats
    }

    /// Run one full cast pass
    ///
    /// Loads every document under the project roots, resolves references,
    /// collects the distinct template instances, and aggregates them into
    /// field-typed templates. Any corpus error aborts the pass.
    pub fn cast(&mut self) -> Result<Vec<Template>> {
        let start = Instant::now();
        self.stats = CastStats::new();

        let store = DocumentStore::load(&self.project.roots, &self.project.ignore)?;
        self.stats.set_documents(store.len());
        debug!(
            "Loaded {} documents from {} root(s)",
            store.len(),
            self.project.roots.len()
        );

        let mut resolver = Resolver::new(&store);
        let roots = resolver.resolve_all()?;
        let arena = resolver.into_arena();

        let graph = collect(&roots, &arena);
        self.stats.set_instances(graph.instance_count());
        debug!(
            "Collected {} instances across {} templates",
            graph.instance_count(),
            graph.template_count()
        );

        let namespaces = derive_namespaces(graph.template_names(), &self.project.namespace_root);
        let options = AggregateOptions::new()
            .with_map_templates(self.project.map_templates.iter().cloned())
            .with_namespaces(namespaces);
        let templates = aggregate(&graph, &arena, &options)?;

        self.stats.set_templates(templates.len());
        #[allow(clippy::cast_possible_truncation)]
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Cast {} templates from {} documents in {}ms",
            self.stats.templates_inferred, self.stats.documents_loaded, self.stats.duration_ms
        );
        Ok(templates)
    }
}

#[cfg(test)]
mod tests;
