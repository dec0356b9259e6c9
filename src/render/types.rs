//! Renderer types
//!
//! Options and output for TypeScript binding generation.

use std::path::PathBuf;

/// Options for binding generation
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Prefix prepended to every generated type identifier
    pub type_prefix: Option<String>,
}

impl RenderOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the type identifier prefix
    #[must_use]
    pub fn with_type_prefix(mut self, prefix: Option<String>) -> Self {
        self.type_prefix = prefix;
        self
    }
}

/// One rendered binding file, not yet written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Template the binding was generated from
    pub template: String,
    /// Path relative to the output directory
    pub relative_path: PathBuf,
    /// TypeScript source text
    pub source: String,
}
