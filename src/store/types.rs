//! Document store types

use crate::types::JsonObject;

/// One loaded JSON document.
///
/// The top-level value is always an object declaring a template or view
/// name; the store rejects anything else at load time. Key order is the
/// authored order.
#[derive(Debug, Clone)]
pub struct Document {
    /// Root-relative path, `/`-rooted and `/`-separated on every platform
    pub path: String,
    /// The top-level object, authored key order preserved
    pub object: JsonObject,
}

impl Document {
    /// The directory portion of the document path, used to resolve
    /// sibling-relative data references (`/a/b.json` -> `/a`).
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(0) | None => "/",
            Some(idx) => &self.path[..idx],
        }
    }
}
