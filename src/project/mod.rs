//! Project definition loading
//!
//! Parses and validates `shapecast.yaml` project files. The project file
//! names the document roots to scan, the templates to treat as opaque
//! string maps, and how generated bindings are namespaced and written.

mod types;

pub use types::ProjectDefinition;


use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Conventional project file name, used when no explicit path is given
pub const DEFAULT_PROJECT_FILE: &str = "shapecast.yaml";

/// Load a project definition from a YAML file
///
/// Relative `roots` entries and the output directory are interpreted
/// relative to the project file's own directory, so a project behaves the
/// same no matter where the command is run from.
pub fn load_project(path: impl AsRef<Path>) -> Result<ProjectDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config(format!(
                "Project file '{}' not found. Create a {DEFAULT_PROJECT_FILE} or pass --project.",
                path.display()
            ))
        } else {
            Error::config(format!(
                "Failed to read project file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let mut definition = load_project_from_str(&content)?;
    if let Some(base) = path.parent() {
        definition.rebase(base);
    }

    debug!(
        "Loaded project '{}' with {} root(s)",
        definition.name,
        definition.roots.len()
    );
    Ok(definition)
}

/// Load a project definition from a YAML string
pub fn load_project_from_str(yaml: &str) -> Result<ProjectDefinition> {
    let definition: ProjectDefinition = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse project YAML: {e}")))?;

    validate_project(&definition)?;
    Ok(definition)
}

/// Validate a project definition
fn validate_project(definition: &ProjectDefinition) -> Result<()> {
    if definition.name.is_empty() {
        return Err(Error::missing_field("name"));
    }

    if definition.roots.is_empty() {
        return Err(Error::invalid_value(
            "roots",
            "at least one root directory is required",
        ));
    }

    for root in &definition.roots {
        if root.as_os_str().is_empty() {
            return Err(Error::invalid_value(
                "roots",
                "root directories cannot be empty",
            ));
        }
    }

    for template in &definition.map_templates {
        if !template.starts_with('/') {
            return Err(Error::invalid_value(
                "map_templates",
                format!("template name '{template}' must start with '/'"),
            ));
        }
    }

    if definition.namespace_root.is_empty() {
        return Err(Error::invalid_value("namespace_root", "cannot be empty"));
    }

    if definition.output_dir.as_os_str().is_empty() {
        return Err(Error::invalid_value("output_dir", "cannot be empty"));
    }

    Ok(())
}
