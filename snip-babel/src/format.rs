//! Format trait definition
//!
//! This module defines the core Format trait that all snippet formats implement.
//! Readers turn source text into a [`Document`]; writers turn a [`Document`] into
//! one or more output files. A format may support either direction or both.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::document::{CompletionEntry, Document, DuplicatePolicy};
use crate::error::FormatError;
use crate::scope;
use std::path::{Path, PathBuf};

/// Comment line placed at the top of generated files
pub const ATTRIBUTION: &str = concat!("# Generated with snip - ", env!("CARGO_PKG_REPOSITORY"));

/// Settings readers need from the run configuration
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub scope_override: Option<String>,
    pub duplicates: DuplicatePolicy,
    pub validate: bool,
}

/// Per-file state handed to a reader
pub struct ReadContext<'a> {
    pub origin: &'a Path,
    pub options: &'a ReadOptions,
    pub diagnostics: &'a mut Diagnostics,
}

impl<'a> ReadContext<'a> {
    pub fn new(origin: &'a Path, options: &'a ReadOptions, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            origin,
            options,
            diagnostics,
        }
    }

    /// Resolve the document scope from the parsed value or the override.
    pub fn resolve_scope(&mut self, parsed: Option<&str>) -> Result<String, FormatError> {
        scope::resolve_scope(
            parsed,
            self.options.scope_override.as_deref(),
            self.origin,
            self.diagnostics,
        )
    }

    /// Insert an entry under the run's duplicate policy.
    pub fn insert(
        &mut self,
        doc: &mut Document,
        title: String,
        entry: CompletionEntry,
    ) -> Result<(), FormatError> {
        doc.insert(
            title,
            entry,
            self.options.duplicates,
            self.origin,
            self.diagnostics,
        )
    }

    /// Report an entry that was dropped for lack of a trigger.
    pub fn skip(&mut self, entry: impl Into<String>) {
        self.diagnostics
            .report(self.origin, DiagnosticKind::SkippedEntry(entry.into()));
    }

    pub fn parse_error(&self, message: impl Into<String>) -> FormatError {
        FormatError::parse(self.origin, message)
    }
}

/// Settings writers need from the run configuration
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// One file per completion instead of one per document
    pub split: bool,
    pub comment_header: bool,
    pub auto_tabstops: bool,
    /// File stem for non-split output
    pub base_name: String,
    /// Input came from a directory; place non-split output in a package layout
    pub package_layout: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            split: false,
            comment_header: true,
            auto_tabstops: true,
            base_name: "snippets".to_string(),
            package_layout: false,
        }
    }
}

/// A serialized output file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Trait for snippet formats
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str, ctx: &mut ReadContext) -> Result<Document, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "textmate", "sublime", "cson")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions handled by this format, without the dot
    fn extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → files)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str, _ctx: &mut ReadContext<'_>) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into output files
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(
        &self,
        _doc: &Document,
        _options: &WriteOptions,
    ) -> Result<Vec<SerializedFile>, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
