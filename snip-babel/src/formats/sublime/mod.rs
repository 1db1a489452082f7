//! Sublime Text snippet format (`.sublime-snippet`)
//!
//! ```text
//! <snippet>
//!     <content><![CDATA[console.log(${1:value});]]></content>
//!     <tabTrigger>log</tabTrigger>
//!     <scope>source.js</scope>
//!     <description>Log a value</description>
//! </snippet>
//! ```
//!
//! Every `content` node becomes an entry. All entries of a file share the
//! trigger, so a file with several `content` nodes collapses to one title and
//! goes through the duplicate policy.

use crate::document::{CompletionEntry, Document};
use crate::error::FormatError;
use crate::filters::{self, BODY, PREFIX, TITLE};
use crate::format::{Format, ReadContext};
use crate::formats::{first_element, parse_markup, text_content};

/// Format implementation for Sublime Text XML snippets
pub struct SublimeFormat;

impl Format for SublimeFormat {
    fn name(&self) -> &str {
        "sublime"
    }

    fn description(&self) -> &str {
        "Sublime Text XML snippet"
    }

    fn extensions(&self) -> &[&str] {
        &["sublime-snippet", "xml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, ctx: &mut ReadContext<'_>) -> Result<Document, FormatError> {
        let xml = parse_markup(source, ctx)?;

        let scope = first_element(&xml, "scope").map(text_content);
        let trigger = first_element(&xml, "tabTrigger")
            .map(|n| text_content(n).trim().to_string())
            .ok_or_else(|| ctx.parse_error("missing <tabTrigger>"))?;

        let mut doc = Document::new(ctx.resolve_scope(scope.as_deref())?);
        let title = filters::apply(&trigger, &TITLE);
        let prefix = filters::apply(&trigger, &PREFIX);

        for content in xml.descendants().filter(|n| n.has_tag_name("content")) {
            let entry = CompletionEntry {
                prefix: prefix.clone(),
                body: filters::apply(text_content(content).trim(), &BODY),
            };
            ctx.insert(&mut doc, title.clone(), entry)?;
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticKind, Diagnostics};
    use crate::document::DuplicatePolicy;
    use crate::format::ReadOptions;
    use std::path::Path;

    const IF_SNIPPET: &str = r#"<snippet>
    <content><![CDATA[
if (${1:true}) {
	$0
}
]]></content>
    <tabTrigger>if</tabTrigger>
    <scope>source.c++</scope>
    <description>If Condition</description>
</snippet>"#;

    fn parse(source: &str, options: &ReadOptions) -> (Result<Document, FormatError>, Diagnostics) {
        let mut diagnostics = Diagnostics::new(true);
        let mut ctx = ReadContext::new(Path::new("if.sublime-snippet"), options, &mut diagnostics);
        let result = SublimeFormat.parse(source, &mut ctx);
        (result, diagnostics)
    }

    #[test]
    fn reads_snippet_keyed_by_trigger() {
        let (doc, _) = parse(IF_SNIPPET, &ReadOptions::default());
        let doc = doc.unwrap();

        assert_eq!(doc.scope, ".source.cpp");
        let entry = &doc.completions["if"];
        assert_eq!(entry.prefix, "if");
        assert_eq!(entry.body, "if (${1:true}) {\n\t$0\n}");
    }

    #[test]
    fn description_leaves_no_trace() {
        let (doc, diagnostics) = parse(IF_SNIPPET, &ReadOptions::default());
        assert_eq!(doc.unwrap().completions.keys().collect::<Vec<_>>(), vec!["if"]);
        let kinds: Vec<_> = diagnostics.entries().iter().map(|d| &d.kind).collect();
        assert_eq!(kinds, vec![&DiagnosticKind::DefaultScope(".source.cpp".into())]);
    }

    #[test]
    fn scope_override_replaces_parsed_scope() {
        let options = ReadOptions {
            scope_override: Some("source.c".into()),
            ..ReadOptions::default()
        };
        let (doc, _) = parse(IF_SNIPPET, &options);
        assert_eq!(doc.unwrap().scope, ".source.c");
    }

    #[test]
    fn several_contents_share_one_title() {
        let source = "<snippet><content>a</content><content>b</content>\
                      <tabTrigger>x</tabTrigger><scope>source.js</scope></snippet>";

        let (doc, diagnostics) = parse(source, &ReadOptions::default());
        let doc = doc.unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.completions["x"].body, "b");
        assert_eq!(
            diagnostics.count(|k| matches!(k, DiagnosticKind::DuplicateTrigger(_))),
            1
        );

        let strict = ReadOptions {
            duplicates: DuplicatePolicy::Strict,
            ..ReadOptions::default()
        };
        let (doc, _) = parse(source, &strict);
        assert!(matches!(doc, Err(FormatError::DuplicateTrigger { .. })));
    }

    #[test]
    fn missing_trigger_is_a_parse_error() {
        let source = "<snippet><content>a</content><scope>source.js</scope></snippet>";
        let (doc, _) = parse(source, &ReadOptions::default());
        assert!(matches!(doc, Err(FormatError::Parse { .. })));
    }

    #[test]
    fn missing_scope_without_override_fails() {
        let source = "<snippet><content>a</content><tabTrigger>x</tabTrigger></snippet>";
        let (doc, _) = parse(source, &ReadOptions::default());
        assert!(matches!(doc, Err(FormatError::MissingScope(_))));
    }
}
