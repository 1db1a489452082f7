//! JSON writer
//!
//! Non-split output holds the whole document under its scope, optionally
//! preceded by a `"#"` attribution key. Split output holds a single entry.

use crate::document::{CompletionEntry, Document};
use crate::error::FormatError;
use crate::format::{SerializedFile, WriteOptions, ATTRIBUTION};
use crate::formats::SplitNames;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const EXTENSION: &str = "json";

pub fn serialize_json(
    doc: &Document,
    options: &WriteOptions,
) -> Result<Vec<SerializedFile>, FormatError> {
    if options.split {
        let mut names = SplitNames::default();
        return doc
            .completions
            .iter()
            .map(|(title, entry)| -> Result<SerializedFile, FormatError> {
                Ok(SerializedFile {
                    path: names.next(&entry.prefix, EXTENSION),
                    contents: render(&doc.scope, [(title, entry)], false)?,
                })
            })
            .collect();
    }

    Ok(vec![SerializedFile {
        path: PathBuf::from(format!("{}.{EXTENSION}", options.base_name)),
        contents: render(&doc.scope, &doc.completions, options.comment_header)?,
    }])
}

fn render<'a>(
    scope: &str,
    completions: impl IntoIterator<Item = (&'a String, &'a CompletionEntry)>,
    comment: bool,
) -> Result<String, FormatError> {
    let mut entries = Map::new();
    for (title, entry) in completions {
        entries.insert(title.clone(), serde_json::to_value(entry)?);
    }

    let mut root = Map::new();
    if comment {
        root.insert("#".to_string(), Value::String(ATTRIBUTION.to_string()));
    }
    root.insert(scope.to_string(), Value::Object(entries));

    let mut out = serde_json::to_string_pretty(&Value::Object(root))?;
    out.push('\n');
    Ok(out)
}
