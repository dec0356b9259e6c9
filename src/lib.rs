// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Shapecast
//!
//! A resolution and type-inference engine for JSON document corpora.
//! Observed instance shapes in, TypeScript bindings out.
//!
//! ## Features
//!
//! - **Corpus Loading**: Recursively load JSON documents from one or more root directories
//! - **Reference Resolution**: Materialize `_dataUrl` links across documents, with cycle detection
//! - **Identity Dedup**: Shared instances are counted once no matter how many documents reach them
//! - **Shape Inference**: Unify every observed value of a field into a single field type
//! - **Namespace Derivation**: Group generated types by the template paths they share
//! - **TypeScript Bindings**: One interface per template, imports included
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shapecast::{load_project, CastEngine, Result};
//!
//! fn main() -> Result<()> {
//!     // Load the project definition from YAML
//!     let project = load_project("shapecast.yaml")?;
//!
//!     // Run one inference pass over the corpus
//!     let mut engine = CastEngine::new(project);
//!     let templates = engine.cast()?;
//!
//!     for template in &templates {
//!         println!("{}: {} fields", template.name, template.fields.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         CastEngine                              │
//! │  load → resolve → collect → aggregate       cast() → Templates  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Store   │  Resolve  │     Graph     │ Aggregate │   Render    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Roots    │ Data URLs │ Identity      │ Unify     │ Interfaces  │
//! │ Ignore   │ Templates │ Grouping      │ Conflicts │ Imports     │
//! │ JSON     │ Cycles    │ Ordering      │ Notes     │ Namespaces  │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for shapecast
pub mod error;

/// Common types and type aliases
pub mod types;

/// Document loading from root directories
pub mod store;

/// Reference resolution and instance materialization
pub mod resolve;

/// Instance grouping by template
pub mod graph;

/// Field type unification
pub mod aggregate;

/// Namespace derivation from template names
pub mod namespace;

/// Project definitions and YAML loader
pub mod project;

/// Main inference engine
pub mod engine;

/// TypeScript binding renderer
pub mod render;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use aggregate::Template;
pub use engine::CastEngine;
pub use project::{load_project, load_project_from_str, ProjectDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
