//! Field filter pipelines
//!
//! Each snippet field passes through exactly one pipeline before it reaches a
//! writer. A pipeline is an ordered list of regex rules; every rule replaces all
//! non-overlapping matches, and rules run in declaration order.
//!
//! All pipelines are idempotent: running one over its own output is a no-op.
//! For the escaping pipelines this means an existing escape pair (`\\`, `\'`,
//! `\"`) is left alone and only bare quotes and lone backslashes are escaped.

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

/// What a rule puts in place of each match
#[derive(Clone, Copy)]
pub enum Replacement {
    Text(&'static str),
    With(fn(&Captures) -> String),
}

pub struct Rule {
    pattern: Regex,
    replacement: Replacement,
}

impl Rule {
    fn text(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement: Replacement::Text(replacement),
        }
    }

    fn with(pattern: &str, replacement: fn(&Captures) -> String) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement: Replacement::With(replacement),
        }
    }

    fn run(&self, input: &str) -> String {
        match self.replacement {
            Replacement::Text(text) => self.pattern.replace_all(input, NoExpand(text)).into_owned(),
            Replacement::With(f) => self.pattern.replace_all(input, f).into_owned(),
        }
    }
}

/// A named, ordered list of rules
pub struct Pipeline {
    name: &'static str,
    rules: Vec<Rule>,
}

impl Pipeline {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Characters that are illegal or awkward in file names
pub static FILENAME: Lazy<Pipeline> = Lazy::new(|| Pipeline {
    name: "filename",
    rules: vec![
        Rule::text(r#"[\x00/\\:*?"$<>|]"#, "_"),
        Rule::text(r"\t", "-"),
    ],
});

/// Display titles, embedded in single-quoted output literals
pub static TITLE: Lazy<Pipeline> = Lazy::new(|| Pipeline {
    name: "title",
    rules: vec![Rule::with(ESCAPABLE, escape_quoted)],
});

/// Trigger tokens; anything that would need quoting is dropped
pub static PREFIX: Lazy<Pipeline> = Lazy::new(|| Pipeline {
    name: "prefix",
    rules: vec![Rule::text(r#"[\x00"'/\\:*?$<>{}|]"#, "")],
});

/// Snippet bodies; placeholder syntax is left untouched
pub static BODY: Lazy<Pipeline> = Lazy::new(|| Pipeline {
    name: "body",
    rules: vec![Rule::with(ESCAPABLE, escape_quoted)],
});

/// Scope selectors, including the alias table for renamed grammars
pub static SCOPE: Lazy<Pipeline> = Lazy::new(|| Pipeline {
    name: "scope",
    rules: vec![
        Rule::text(",", ""),
        Rule::text(r"\.?source\.c\+\+", ".source.cpp"),
        Rule::text(r"\.?source\.java-props", ".source.java-properties"),
        Rule::text(r"\.?source\.objc\+\+", ".source.objcpp"),
        Rule::text(r"\.?source\.php", ".text.html.php"),
        Rule::text(r"\.?source\.scss", ".source.css.scss"),
        Rule::text(r"\.?source\.todo", ".text.todo"),
        Rule::text(r"\.?text\.html\.markdown", ".source.gfm"),
    ],
});

// An existing escape pair is tried first so it is consumed as a unit.
const ESCAPABLE: &str = r#"\\[\\'"]|[\\'"]"#;

fn escape_quoted(caps: &Captures) -> String {
    let matched = &caps[0];
    if matched.len() == 2 {
        matched.to_string()
    } else {
        format!("\\{matched}")
    }
}

/// Run `input` through every rule of `pipeline`.
pub fn apply(input: &str, pipeline: &Pipeline) -> String {
    pipeline
        .rules
        .iter()
        .fold(input.to_string(), |acc, rule| rule.run(&acc))
}
