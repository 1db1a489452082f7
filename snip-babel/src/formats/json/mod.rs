//! JSON format
//!
//! Reads Sublime completion lists as well as its own output, and writes the
//! `{scope: {title: {prefix, body}}}` mapping.

pub mod parser;
pub mod serializer;

use crate::document::Document;
use crate::error::FormatError;
use crate::format::{Format, ReadContext, SerializedFile, WriteOptions};

/// Format implementation for JSON snippets
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON completions (Sublime completion lists in, scope mapping out)"
    }

    fn extensions(&self) -> &[&str] {
        &["sublime-completions", "json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, ctx: &mut ReadContext<'_>) -> Result<Document, FormatError> {
        parser::parse_json(source, ctx)
    }

    fn serialize(
        &self,
        doc: &Document,
        options: &WriteOptions,
    ) -> Result<Vec<SerializedFile>, FormatError> {
        serializer::serialize_json(doc, options)
    }
}
