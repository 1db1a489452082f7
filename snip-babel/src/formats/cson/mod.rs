//! CSON format (Atom snippet files)
//!
//! Line-oriented output with the scope at the top level and one block per
//! entry:
//!
//! ```text
//! '.source.js':
//!   'Log':
//!     'prefix': 'log'
//!     'body': 'console.log($1)$0'
//!   'If':
//!     'prefix': 'if'
//!     'body': """
//!       if ($1) {
//!         $0
//!       }
//!     """
//! ```
//!
//! Titles and bodies arrive already escaped by the filter pipelines, so they
//! are spliced into the quoted literals as-is.

use crate::document::{CompletionEntry, Document};
use crate::error::FormatError;
use crate::format::{Format, SerializedFile, WriteOptions, ATTRIBUTION};
use crate::formats::SplitNames;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::path::PathBuf;

pub const EXTENSION: &str = "cson";

/// Directory Atom packages keep their snippet files in
pub const PACKAGE_SNIPPETS_DIR: &str = "snippets";

static TRAILING_TABSTOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\d+$").unwrap());

/// Append a final `$0` cursor stop unless the body already ends in `$<digits>`.
pub fn add_trailing_tabstop(body: &str) -> Cow<'_, str> {
    if TRAILING_TABSTOP.is_match(body) {
        Cow::Borrowed(body)
    } else {
        Cow::Owned(format!("{body}$0"))
    }
}

fn push_entry(out: &mut String, title: &str, entry: &CompletionEntry, auto_tabstops: bool) {
    let body = if auto_tabstops {
        add_trailing_tabstop(&entry.body)
    } else {
        Cow::Borrowed(entry.body.as_str())
    };

    out.push_str(&format!("  '{title}':\n"));
    out.push_str(&format!("    'prefix': '{}'\n", entry.prefix));
    if body.lines().count() <= 1 {
        out.push_str(&format!("    'body': '{body}'\n"));
    } else {
        out.push_str("    'body': \"\"\"\n");
        for line in body.split_inclusive('\n') {
            out.push_str("      ");
            out.push_str(line);
        }
        out.push_str("\n    \"\"\"\n");
    }
}

pub fn serialize_cson(doc: &Document, options: &WriteOptions) -> Vec<SerializedFile> {
    if options.split {
        let mut names = SplitNames::default();
        return doc
            .completions
            .iter()
            .map(|(title, entry)| {
                let mut contents = format!("'{}':\n", doc.scope);
                push_entry(&mut contents, title, entry, options.auto_tabstops);
                SerializedFile {
                    path: names.next(&entry.prefix, EXTENSION),
                    contents,
                }
            })
            .collect();
    }

    let mut contents = String::new();
    if options.comment_header {
        contents.push_str(ATTRIBUTION);
        contents.push('\n');
    }
    contents.push_str(&format!("'{}':\n", doc.scope));
    for (title, entry) in &doc.completions {
        push_entry(&mut contents, title, entry, options.auto_tabstops);
    }

    let file_name = format!("{}.{EXTENSION}", options.base_name);
    let path = if options.package_layout {
        PathBuf::from(PACKAGE_SNIPPETS_DIR).join(file_name)
    } else {
        PathBuf::from(file_name)
    };
    vec![SerializedFile { path, contents }]
}

/// Format implementation for CSON output
pub struct CsonFormat;

impl Format for CsonFormat {
    fn name(&self) -> &str {
        "cson"
    }

    fn description(&self) -> &str {
        "Atom CSON snippets"
    }

    fn extensions(&self) -> &[&str] {
        &[EXTENSION]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(
        &self,
        doc: &Document,
        options: &WriteOptions,
    ) -> Result<Vec<SerializedFile>, FormatError> {
        Ok(serialize_cson(doc, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    fn sample() -> Document {
        let mut doc = Document::new(".source.js");
        doc.completions
            .insert("Log".into(), CompletionEntry::new("log", r"console.log(\'$1\')"));
        doc.completions.insert(
            "If".into(),
            CompletionEntry::new("if", "if ($1) {\n\t$2\n}"),
        );
        doc
    }

    #[rstest]
    #[case("Hello $1", "Hello $1")]
    #[case("done $12", "done $12")]
    #[case("$0", "$0")]
    #[case("Hello", "Hello$0")]
    #[case("${1:name}", "${1:name}$0")]
    #[case("$1 at start\nthen text", "$1 at start\nthen text$0")]
    #[case("", "$0")]
    fn trailing_tabstop(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(add_trailing_tabstop(body), expected);
    }

    #[test]
    fn writes_document() {
        let options = WriteOptions {
            comment_header: false,
            base_name: "console".into(),
            ..WriteOptions::default()
        };
        let files = serialize_cson(&sample(), &options);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("console.cson"));
        assert_snapshot!(files[0].contents, @r#"
'.source.js':
  'Log':
    'prefix': 'log'
    'body': 'console.log(\'$1\')$0'
  'If':
    'prefix': 'if'
    'body': """
      if ($1) {
      	$2
      }$0
    """
"#);
    }

    #[test]
    fn comment_header_and_no_tabstops() {
        let options = WriteOptions {
            auto_tabstops: false,
            ..WriteOptions::default()
        };
        let contents = &serialize_cson(&sample(), &options)[0].contents;

        assert!(contents.starts_with(&format!("{ATTRIBUTION}\n'.source.js':\n")));
        assert!(contents.contains("    'body': 'console.log(\\'$1\\')'\n"));
    }

    #[test]
    fn package_layout_uses_snippets_dir() {
        let options = WriteOptions {
            package_layout: true,
            base_name: "javascript".into(),
            ..WriteOptions::default()
        };
        let files = serialize_cson(&sample(), &options);
        assert_eq!(files[0].path, PathBuf::from("snippets/javascript.cson"));
    }

    #[test]
    fn split_writes_one_file_per_entry() {
        let options = WriteOptions {
            split: true,
            package_layout: true,
            ..WriteOptions::default()
        };
        let files = serialize_cson(&sample(), &options);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("log.cson"));
        assert_eq!(
            files[0].contents,
            "'.source.js':\n  'Log':\n    'prefix': 'log'\n    'body': 'console.log(\\'$1\\')$0'\n"
        );
        assert_eq!(files[1].path, PathBuf::from("if.cson"));
        assert!(!files[1].contents.contains("'Log'"));
    }
}
