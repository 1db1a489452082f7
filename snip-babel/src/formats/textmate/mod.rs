//! TextMate snippet format (`.tmSnippet`)
//!
//! A property list holding one snippet as a flat `dict` of alternating
//! `key`/`string` elements:
//!
//! ```text
//! <plist version="1.0">
//! <dict>
//!     <key>content</key>
//!     <string>console.log($1);</string>
//!     <key>name</key>
//!     <string>Log</string>
//!     <key>scope</key>
//!     <string>source.js</string>
//!     <key>tabTrigger</key>
//!     <string>log</string>
//! </dict>
//! </plist>
//! ```

use crate::document::{CompletionEntry, Document};
use crate::error::FormatError;
use crate::filters::{self, BODY, PREFIX, TITLE};
use crate::format::{Format, ReadContext};
use crate::formats::{parse_markup, text_content};

#[derive(Debug, Default)]
struct PlistFields {
    scope: Option<String>,
    name: Option<String>,
    trigger: Option<String>,
    content: Option<String>,
}

impl PlistFields {
    fn collect(xml: &roxmltree::Document<'_>) -> Self {
        let mut fields = Self::default();
        for dict in xml.descendants().filter(|n| n.has_tag_name("dict")) {
            let children: Vec<_> = dict.children().filter(|n| n.is_element()).collect();
            for pair in children.chunks(2) {
                let value = pair.get(1).map(|n| text_content(*n)).unwrap_or_default();
                match text_content(pair[0]).as_str() {
                    "scope" => fields.scope = Some(value),
                    "name" => fields.name = Some(value),
                    "tabTrigger" => fields.trigger = Some(value),
                    "content" => fields.content = Some(value),
                    _ => continue,
                }
            }
        }
        fields
    }
}

/// Format implementation for TextMate property-list snippets
pub struct TextMateFormat;

impl Format for TextMateFormat {
    fn name(&self) -> &str {
        "textmate"
    }

    fn description(&self) -> &str {
        "TextMate property-list snippet (one snippet per file)"
    }

    fn extensions(&self) -> &[&str] {
        &["tmSnippet"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, ctx: &mut ReadContext<'_>) -> Result<Document, FormatError> {
        let xml = parse_markup(source, ctx)?;
        let fields = PlistFields::collect(&xml);

        let scope = ctx.resolve_scope(fields.scope.as_deref())?;
        let mut doc = Document::new(scope);

        let Some(trigger) = fields.trigger else {
            ctx.skip(format!("{:?} (no tabTrigger)", fields.name.unwrap_or_default()));
            return Ok(doc);
        };

        let title = filters::apply(fields.name.as_deref().unwrap_or(&trigger), &TITLE);
        let entry = CompletionEntry {
            prefix: filters::apply(&trigger, &PREFIX),
            body: filters::apply(fields.content.unwrap_or_default().trim(), &BODY),
        };
        ctx.insert(&mut doc, title, entry)?;
        Ok(doc)
    }
}
