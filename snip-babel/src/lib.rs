//! Conversion between editor snippet formats
//!
//!     This crate reads snippet definitions from TextMate (`.tmSnippet`), Sublime Text
//!     (`.sublime-snippet`, `.sublime-completions`) and JSON sources, normalizes them into one
//!     [`Document`], and writes them as JSON or Atom CSON.
//!
//!     This is a pure lib: it powers the snip cli but is shell agnostic. It never reads env vars
//!     or prints; notices go through [`Diagnostics`] (and `tracing`), failures through
//!     [`FormatError`].
//!
//! Architecture
//!
//!     - Format trait: uniform interface for readers (parse) and writers (serialize)
//!     - FormatRegistry: discovery and selection of formats by name
//!     - filters: the regex pipelines every field passes through exactly once
//!     - scope: alias table and leading-dot normalization
//!     - Conversion: run-scoped context holding counters and the merge accumulator
//!
//!     The file structure :
//!     .
//!     ├── convert.rs              # Conversion runs, merge mode
//!     ├── diagnostics.rs          # Non-fatal notices
//!     ├── document.rs             # Document, CompletionEntry, duplicate policy
//!     ├── error.rs
//!     ├── filters.rs              # Field filter pipelines
//!     ├── format.rs               # Format trait definition
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Reader implementation
//!     │   │   ├── serializer.rs   # Writer implementation
//!     │   │   └── mod.rs
//!     ├── publish.rs              # Writing serialized files to disk
//!     ├── registry.rs             # FormatRegistry
//!     ├── scope.rs
//!     ├── source.rs               # Input classification
//!     ├── validate.rs             # Well-formedness checks
//!     ├── lib.rs
//!
//! Escaping
//!
//!     Titles and bodies are escaped once, when read, so that they can be spliced into quoted
//!     CSON literals. The JSON writer stores those escaped strings, which is why reading JSON
//!     output back yields the same document: every pipeline is idempotent.
pub mod convert;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod filters;
pub mod format;
pub mod formats;
pub mod publish;
pub mod registry;
pub mod scope;
pub mod source;
pub mod validate;

pub use convert::{run, Conversion, ConvertOptions, OutputFormat, RunSummary};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use document::{CompletionEntry, Document, DuplicatePolicy};
pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
pub use source::{SourceFile, SourceKind};
