//! JSON reader
//!
//! Two shapes are accepted:
//!
//! - Sublime completion lists:
//!   `{"scope": "...", "completions": [{"trigger": "...", "contents": "..."}]}`
//! - The mapping written by [`super::serializer`]:
//!   `{"#": "...", "<scope>": {"<title>": {"prefix": "...", "body": "..."}}}`

use crate::document::{CompletionEntry, Document};
use crate::error::FormatError;
use crate::filters::{self, BODY, PREFIX, TITLE};
use crate::format::ReadContext;
use crate::validate::{JsonValidator, Validator};
use serde_json::{Map, Value};

const COMMENT_KEY: &str = "#";

pub fn parse_json(source: &str, ctx: &mut ReadContext<'_>) -> Result<Document, FormatError> {
    if ctx.options.validate && !JsonValidator.is_valid(source) {
        return Err(FormatError::Validation {
            path: ctx.origin.to_path_buf(),
            kind: JsonValidator.kind(),
        });
    }

    let value: Value =
        serde_json::from_str(source).map_err(|e| ctx.parse_error(e.to_string()))?;
    let Value::Object(root) = value else {
        return Err(ctx.parse_error("expected an object at the top level"));
    };

    if let Some(Value::Array(items)) = root.get("completions") {
        let scope = root.get("scope").and_then(Value::as_str);
        return read_completion_list(scope, items, ctx);
    }
    read_mapping(&root, ctx)
}

fn read_completion_list(
    scope: Option<&str>,
    items: &[Value],
    ctx: &mut ReadContext<'_>,
) -> Result<Document, FormatError> {
    let mut doc = Document::new(ctx.resolve_scope(scope)?);

    for item in items {
        let Some(trigger) = item.get("trigger").and_then(Value::as_str) else {
            ctx.skip(item.to_string());
            continue;
        };
        let contents = item.get("contents").and_then(Value::as_str).unwrap_or_default();

        let entry = CompletionEntry {
            prefix: filters::apply(trigger, &PREFIX),
            body: filters::apply(contents, &BODY),
        };
        ctx.insert(&mut doc, filters::apply(trigger, &TITLE), entry)?;
    }
    Ok(doc)
}

fn read_mapping(root: &Map<String, Value>, ctx: &mut ReadContext<'_>) -> Result<Document, FormatError> {
    let mut scopes = root.iter().filter(|(key, _)| key.as_str() != COMMENT_KEY);
    let Some((scope, entries)) = scopes.next() else {
        return Err(ctx.parse_error("no scope key and no completions list"));
    };
    if scopes.next().is_some() {
        return Err(ctx.parse_error("expected exactly one scope key"));
    }
    let Value::Object(entries) = entries else {
        return Err(ctx.parse_error(format!("scope '{scope}' must map titles to entries")));
    };

    let mut doc = Document::new(ctx.resolve_scope(Some(scope))?);
    for (title, entry) in entries {
        let Some(prefix) = entry.get("prefix").and_then(Value::as_str) else {
            ctx.skip(format!("{title:?}"));
            continue;
        };
        let body = entry.get("body").and_then(Value::as_str).unwrap_or_default();

        let entry = CompletionEntry {
            prefix: filters::apply(prefix, &PREFIX),
            body: filters::apply(body, &BODY),
        };
        ctx.insert(&mut doc, filters::apply(title, &TITLE), entry)?;
    }
    Ok(doc)
}
