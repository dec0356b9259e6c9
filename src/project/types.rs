//! Project definition types
//!
//! Declarative project configuration for YAML parsing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Project Definition
// ============================================================================

/// Top-level project definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectDefinition {
    /// Project name
    pub name: String,
    /// Root directories scanned for `.json` documents
    pub roots: Vec<PathBuf>,
    /// File names skipped during the scan
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Template names treated as opaque string-to-string maps
    #[serde(default)]
    pub map_templates: Vec<String>,
    /// Prefix every derived namespace is rooted under
    #[serde(default = "default_namespace_root")]
    pub namespace_root: String,
    /// Prefix prepended to every generated type identifier
    #[serde(default)]
    pub type_prefix: Option<String>,
    /// Directory generated bindings are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_namespace_root() -> String {
    "gen".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

impl ProjectDefinition {
    /// Rebase relative roots and the output directory onto `base`
    pub(crate) fn rebase(&mut self, base: &Path) {
        for root in &mut self.roots {
            if root.is_relative() {
                *root = base.join(root.as_path());
            }
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
    }
}
