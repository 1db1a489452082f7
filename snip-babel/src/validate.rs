//! Well-formedness checks run before parsing
//!
//! Validation only answers "is this blob well-formed for its syntax"; readers
//! still decide whether the structure makes sense as a snippet. When
//! validation is disabled, readers attempt the parse anyway and malformed
//! input surfaces as a parse error instead.

use roxmltree::ParsingOptions;

pub trait Validator {
    /// Short name used in error messages, e.g. "XML"
    fn kind(&self) -> &'static str;

    fn is_valid(&self, raw: &str) -> bool;
}

pub struct XmlValidator;

impl Validator for XmlValidator {
    fn kind(&self) -> &'static str {
        "XML"
    }

    fn is_valid(&self, raw: &str) -> bool {
        roxmltree::Document::parse_with_options(raw, markup_options()).is_ok()
    }
}

pub struct JsonValidator;

impl Validator for JsonValidator {
    fn kind(&self) -> &'static str {
        "JSON"
    }

    fn is_valid(&self, raw: &str) -> bool {
        serde_json::from_str::<serde_json::Value>(raw).is_ok()
    }
}

/// Property lists carry a DOCTYPE, so DTDs must be accepted.
pub(crate) fn markup_options() -> ParsingOptions {
    ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    }
}
