//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::document::Document;
use crate::error::FormatError;
use crate::format::{Format, ReadContext, SerializedFile, WriteOptions};
use std::collections::HashMap;

/// Registry of snippet formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let doc = registry.parse(source, "sublime", &mut ctx)?;
/// let files = registry.serialize(&doc, "cson", &WriteOptions::default())?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Parse source text using the specified format
    pub fn parse(
        &self,
        source: &str,
        format: &str,
        ctx: &mut ReadContext<'_>,
    ) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support parsing",
                format
            )));
        }
        fmt.parse(source, ctx)
    }

    /// Serialize a document using the specified format
    pub fn serialize(
        &self,
        doc: &Document,
        format: &str,
        options: &WriteOptions,
    ) -> Result<Vec<SerializedFile>, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support serialization",
                format
            )));
        }
        fmt.serialize(doc, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::TextMateFormat);
        registry.register(crate::formats::SublimeFormat);
        registry.register(crate::formats::JsonFormat);
        registry.register(crate::formats::CsonFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
