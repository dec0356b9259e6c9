//! Common types used throughout shapecast
//!
//! This module contains shared type definitions, type aliases,
//! the reserved document keys, and utility types used across modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type, preserving authored key order
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Reserved Document Keys
// ============================================================================

/// Declares the template a document or map instantiates (structured form)
pub const TEMPLATE_KEY: &str = "_template";

/// Declares the view a document or map instantiates (embedded form)
pub const VIEW_KEY: &str = "_view";

/// References another document by root-relative or sibling-relative path
pub const DATA_URL_KEY: &str = "_dataUrl";

/// Marks a value as delegated; the owning field is dropped entirely
pub const DELEGATE_KEY: &str = "_delegate";

/// Documentation note attached to the instance itself
pub const NOTES_KEY: &str = "_notes";

/// Authoring-tool key, never part of the inferred shape
pub const OPTIONS_KEY: &str = "options";

/// The sibling key carrying the documentation note for a field.
///
/// A field `title` is documented by its sibling `_titleNotes`.
pub fn field_notes_key(field: &str) -> String {
    format!("_{field}Notes")
}

/// Whether a key is reserved and therefore skipped during field iteration
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with('_') || key == OPTIONS_KEY
}

// ============================================================================
// Template Format
// ============================================================================

/// How an instance declared its template
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateFormat {
    /// Declared via the template key; fields carry structured content
    Structured,
    /// Declared via the view key; fields carry embedded view content
    Embedded,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_notes_key() {
        assert_eq!(field_notes_key("title"), "_titleNotes");
        assert_eq!(field_notes_key("relatedPosts"), "_relatedPostsNotes");
    }

    #[test]
    fn test_is_reserved_key() {
        assert!(is_reserved_key("_template"));
        assert!(is_reserved_key("_dataUrl"));
        assert!(is_reserved_key("_titleNotes"));
        assert!(is_reserved_key("options"));

        assert!(!is_reserved_key("title"));
        assert!(!is_reserved_key("optionsList"));
    }

    #[test]
    fn test_template_format_serde() {
        let format: TemplateFormat = serde_json::from_str("\"structured\"").unwrap();
        assert_eq!(format, TemplateFormat::Structured);

        let json = serde_json::to_string(&TemplateFormat::Embedded).unwrap();
        assert_eq!(json, "\"embedded\"");
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some("".to_string()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!("test".to_string().none_if_empty(), Some("test".to_string()));
        assert_eq!("".to_string().none_if_empty(), None);
    }
}
