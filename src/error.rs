//! Error types for shapecast
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for shapecast
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required project field: {field}")]
    MissingProjectField { field: String },

    #[error("Invalid project value for '{field}': {message}")]
    InvalidProjectValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Invalid document '{path}': {message}")]
    InvalidDocument { path: String, message: String },

    #[error("Document '{path}' declares no template or view name")]
    MissingTemplate { path: String },

    #[error("Duplicate document path '{path}' across roots")]
    DuplicateDocument { path: String },

    // ============================================================================
    // Resolution Errors
    // ============================================================================
    #[error("Unresolved data reference '{url}' in document '{path}'")]
    MissingDataReference { path: String, url: String },

    #[error("Data reference '{url}' in document '{path}' must not declare its own template")]
    TemplateOverride { path: String, url: String },

    #[error("Cyclic data reference entering document '{path}': {chain}")]
    CyclicReference { path: String, chain: String },

    #[error("Mixed element kinds in a list of document '{path}': {first} vs {second}")]
    HeterogeneousList {
        path: String,
        first: String,
        second: String,
    },

    // ============================================================================
    // Aggregation Errors
    // ============================================================================
    #[error("Conflicting types for field '{field}' of template '{template}': {kinds}")]
    ConflictingFieldType {
        template: String,
        field: String,
        kinds: String,
    },

    #[error("Internal consistency error: {message}")]
    InternalConsistency { message: String },

    // ============================================================================
    // Render Errors
    // ============================================================================
    #[error("Render error: {message}")]
    Render { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing project field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingProjectField {
            field: field.into(),
        }
    }

    /// Create an invalid project value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidProjectValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid document error
    pub fn invalid_document(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing template error
    pub fn missing_template(path: impl Into<String>) -> Self {
        Self::MissingTemplate { path: path.into() }
    }

    /// Create a missing data reference error
    pub fn missing_data_reference(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self::MissingDataReference {
            path: path.into(),
            url: url.into(),
        }
    }

    /// Create a template override error
    pub fn template_override(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self::TemplateOverride {
            path: path.into(),
            url: url.into(),
        }
    }

    /// Create a cyclic reference error
    pub fn cyclic_reference(path: impl Into<String>, chain: impl Into<String>) -> Self {
        Self::CyclicReference {
            path: path.into(),
            chain: chain.into(),
        }
    }

    /// Create a heterogeneous list error
    pub fn heterogeneous_list(
        path: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::HeterogeneousList {
            path: path.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a conflicting field type error
    pub fn conflicting_field_type(
        template: impl Into<String>,
        field: impl Into<String>,
        kinds: impl Into<String>,
    ) -> Self {
        Self::ConflictingFieldType {
            template: template.into(),
            field: field.into(),
            kinds: kinds.into(),
        }
    }

    /// Create an internal consistency error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalConsistency {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Check if this error originates in the corpus rather than the setup.
    ///
    /// Corpus errors are fixed by editing content documents; the watch loop
    /// keeps running after them. Setup errors (bad project file, IO) are not.
    pub fn is_corpus_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidDocument { .. }
                | Error::MissingTemplate { .. }
                | Error::DuplicateDocument { .. }
                | Error::MissingDataReference { .. }
                | Error::TemplateOverride { .. }
                | Error::CyclicReference { .. }
                | Error::HeterogeneousList { .. }
                | Error::ConflictingFieldType { .. }
        )
    }
}

/// Result type alias for shapecast
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
