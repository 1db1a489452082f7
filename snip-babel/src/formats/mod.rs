//! Format implementations
//!
//! Readers: `textmate` (plist `.tmSnippet`), `sublime` (`.sublime-snippet`),
//! `json` (`.sublime-completions` and the JSON mapping written by this crate).
//! Writers: `json` and `cson`.

pub mod cson;
pub mod json;
pub mod sublime;
pub mod textmate;

pub use cson::CsonFormat;
pub use json::JsonFormat;
pub use sublime::SublimeFormat;
pub use textmate::TextMateFormat;

use crate::error::FormatError;
use crate::filters::{self, FILENAME};
use crate::format::ReadContext;
use crate::validate::{self, Validator, XmlValidator};
use std::collections::HashSet;
use std::path::PathBuf;

/// Validate (unless disabled) and parse a markup source.
pub(crate) fn parse_markup<'input>(
    source: &'input str,
    ctx: &ReadContext<'_>,
) -> Result<roxmltree::Document<'input>, FormatError> {
    if ctx.options.validate && !XmlValidator.is_valid(source) {
        return Err(FormatError::Validation {
            path: ctx.origin.to_path_buf(),
            kind: XmlValidator.kind(),
        });
    }
    roxmltree::Document::parse_with_options(source, validate::markup_options())
        .map_err(|e| ctx.parse_error(e.to_string()))
}

/// Concatenated text of a node and its descendants, CDATA included.
pub(crate) fn text_content(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// First element anywhere in the document with the given tag name.
pub(crate) fn first_element<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    tag: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    doc.descendants().find(|n| n.has_tag_name(tag))
}

/// File names for the entries of one document in split mode.
///
/// Prefixes that filter to the same stem are numbered (`a.json`, `a-2.json`)
/// so that no entry overwrites another.
#[derive(Debug, Default)]
pub(crate) struct SplitNames {
    taken: HashSet<String>,
}

impl SplitNames {
    pub(crate) fn next(&mut self, prefix: &str, extension: &str) -> PathBuf {
        let mut stem = filters::apply(prefix, &FILENAME);
        if stem.is_empty() {
            stem = "untitled".to_string();
        }
        let mut candidate = stem.clone();
        let mut n = 1;
        while self.taken.contains(&candidate) {
            n += 1;
            candidate = format!("{stem}-{n}");
        }
        let path = PathBuf::from(format!("{candidate}.{extension}"));
        self.taken.insert(candidate);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_names_are_filename_safe() {
        let mut names = SplitNames::default();
        assert_eq!(names.next("fn\tFunction", "json"), PathBuf::from("fn-Function.json"));
        assert_eq!(names.next("a/b", "cson"), PathBuf::from("a_b.cson"));
        assert_eq!(names.next("", "cson"), PathBuf::from("untitled.cson"));
    }

    #[test]
    fn colliding_split_names_are_numbered() {
        let mut names = SplitNames::default();
        assert_eq!(names.next("a", "json"), PathBuf::from("a.json"));
        assert_eq!(names.next("a", "json"), PathBuf::from("a-2.json"));
        assert_eq!(names.next("a-2", "json"), PathBuf::from("a-2-2.json"));
        assert_eq!(names.next("a", "json"), PathBuf::from("a-3.json"));
    }

    #[test]
    fn text_content_includes_cdata() {
        let doc = roxmltree::Document::parse(
            "<snippet><content><![CDATA[if ($1) {\n\t$0\n}]]></content></snippet>",
        )
        .unwrap();
        let node = first_element(&doc, "content").unwrap();
        assert_eq!(text_content(node), "if ($1) {\n\t$0\n}");
    }
}
