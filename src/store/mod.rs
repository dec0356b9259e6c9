//! Document store
//!
//! Loads every JSON document under the project roots into an addressable
//! table keyed by root-relative path.
//!
//! # Overview
//!
//! - `Document` - one parsed JSON file with its root-relative path
//! - `DocumentStore` - recursive discovery, parsing, and lookup
//!
//! Paths are `/`-rooted and `/`-separated regardless of the host
//! filesystem, so data references inside documents stay portable.

mod types;

pub use types::Document;


use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{JsonValue, TEMPLATE_KEY, VIEW_KEY};

/// Immutable table of loaded documents.
///
/// Lookup by path is O(1); iteration is always in sorted path order so
/// every downstream pass is deterministic.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, Document>,
    paths: Vec<String>,
}

impl DocumentStore {
    /// Load every `.json` file under the given roots.
    ///
    /// Files whose name appears in `ignored_file_names` are skipped.
    /// Fails on unreadable roots, unparseable JSON, non-object top
    /// levels, documents that declare no template, and relative paths
    /// that collide across roots.
    pub fn load(roots: &[impl AsRef<Path>], ignored_file_names: &[String]) -> Result<Self> {
        let mut documents = HashMap::new();

        for root in roots {
            let root = root.as_ref();
            if !root.is_dir() {
                return Err(Error::config(format!(
                    "Root directory not found: {}",
                    root.display()
                )));
            }

            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(|e| Error::Io(e.into()))?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let file_path = entry.path();
                if file_path.extension().map_or(true, |ext| ext != "json") {
                    continue;
                }
                let file_name = entry.file_name().to_string_lossy();
                if ignored_file_names.iter().any(|i| i.as_str() == file_name) {
                    debug!(file = %file_path.display(), "Skipping ignored file");
                    continue;
                }

                let doc_path = document_path(root, file_path)?;
                let document = load_document(&doc_path, file_path)?;
                if documents.insert(doc_path.clone(), document).is_some() {
                    return Err(Error::DuplicateDocument { path: doc_path });
                }
            }
        }

        let mut paths: Vec<String> = documents.keys().cloned().collect();
        paths.sort();
        debug!(documents = paths.len(), "Document store loaded");

        Ok(Self { documents, paths })
    }

    /// Look up a document by its root-relative path
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents.get(path)
    }

    /// Whether a document with this path was loaded
    pub fn contains(&self, path: &str) -> bool {
        self.documents.contains_key(path)
    }

    /// All document paths in sorted order
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Iterate documents in sorted path order
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.paths.iter().filter_map(|p| self.documents.get(p))
    }

    /// Number of loaded documents
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Compute the root-relative document path for a file.
///
/// The result starts with `/` and uses `/` separators on every platform.
fn document_path(root: &Path, file: &Path) -> Result<String> {
    let relative = file.strip_prefix(root).map_err(|_| {
        Error::internal(format!(
            "File '{}' is not under root '{}'",
            file.display(),
            root.display()
        ))
    })?;

    let mut path = String::new();
    for component in relative.components() {
        path.push('/');
        path.push_str(&component.as_os_str().to_string_lossy());
    }
    Ok(path)
}

/// Parse one document file, enforcing the top-level rules
fn load_document(doc_path: &str, file: &Path) -> Result<Document> {
    let content = fs::read_to_string(file)?;
    let value: JsonValue = serde_json::from_str(&content)
        .map_err(|e| Error::invalid_document(doc_path, e.to_string()))?;

    let object = match value {
        JsonValue::Object(object) => object,
        other => {
            return Err(Error::invalid_document(
                doc_path,
                format!("top-level value must be an object, got {}", json_kind(&other)),
            ))
        }
    };

    if !object.contains_key(TEMPLATE_KEY) && !object.contains_key(VIEW_KEY) {
        return Err(Error::missing_template(doc_path));
    }

    Ok(Document {
        path: doc_path.to_string(),
        object,
    })
}

/// Human-readable name for a JSON value kind, used in error messages
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
