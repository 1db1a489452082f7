//! Scope resolution
//!
//! A document's scope is resolved once, from either the source file or the
//! configured override (never both), filtered through the scope aliases, and
//! normalized to start with a single `.`.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::FormatError;
use crate::filters::{self, SCOPE};
use std::path::Path;

/// Pick, filter and normalize the scope for one source.
///
/// A scope that is absent, blank, or filters down to nothing is a
/// [`FormatError::MissingScope`], whether it came from the source or the override.
pub fn resolve_scope(
    parsed: Option<&str>,
    override_scope: Option<&str>,
    origin: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<String, FormatError> {
    let (raw, overridden) = match override_scope {
        Some(scope) => (Some(scope), true),
        None => (parsed, false),
    };
    let scope = raw
        .map(|s| fix_scope(&filters::apply(s, &SCOPE)))
        .filter(|s| s.len() > 1)
        .ok_or_else(|| FormatError::MissingScope(origin.to_path_buf()))?;

    let kind = if overridden {
        DiagnosticKind::OverrideScope(scope.clone())
    } else {
        DiagnosticKind::DefaultScope(scope.clone())
    };
    diagnostics.report(origin, kind);
    Ok(scope)
}

/// Normalize to exactly one leading dot. A scope with no name left is just `.`.
pub fn fix_scope(scope: &str) -> String {
    let name = scope
        .trim()
        .trim_start_matches(|c: char| c == '.' || c.is_whitespace());
    format!(".{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(parsed: Option<&str>, override_scope: Option<&str>) -> (String, Diagnostics) {
        let mut diagnostics = Diagnostics::new(true);
        let scope =
            resolve_scope(parsed, override_scope, Path::new("x"), &mut diagnostics).unwrap();
        (scope, diagnostics)
    }

    #[test]
    fn adds_leading_dot() {
        assert_eq!(resolve(Some("source.js"), None).0, ".source.js");
        assert_eq!(resolve(Some(".source.js"), None).0, ".source.js");
        assert_eq!(resolve(Some("..source.js"), None).0, ".source.js");
    }

    #[test]
    fn alias_does_not_double_the_dot() {
        assert_eq!(resolve(Some(".source.c++"), None).0, ".source.cpp");
        assert_eq!(resolve(Some("source.c++"), None).0, ".source.cpp");
    }

    #[test]
    fn override_wins_and_is_filtered() {
        let (scope, diagnostics) = resolve(Some("source.js"), Some("source.scss"));
        assert_eq!(scope, ".source.css.scss");
        assert_eq!(
            diagnostics.entries()[0].kind,
            DiagnosticKind::OverrideScope(".source.css.scss".into())
        );
    }

    #[test]
    fn override_applies_without_parsed_scope() {
        assert_eq!(resolve(None, Some("text.plain")).0, ".text.plain");
    }

    #[test]
    fn missing_scope_is_an_error() {
        let mut diagnostics = Diagnostics::new(true);
        let err = resolve_scope(Some("  "), None, Path::new("x"), &mut diagnostics).unwrap_err();
        assert!(matches!(err, FormatError::MissingScope(_)));
    }

    #[test]
    fn scope_filtered_to_nothing_is_missing() {
        for raw in [",", ".", " . ", ",.,"] {
            let mut diagnostics = Diagnostics::new(true);
            let err = resolve_scope(Some(raw), None, Path::new("x"), &mut diagnostics).unwrap_err();
            assert!(matches!(err, FormatError::MissingScope(_)), "{raw:?}");
            assert!(diagnostics.entries().is_empty());
        }
    }

    #[test]
    fn empty_override_is_missing() {
        let mut diagnostics = Diagnostics::new(true);
        let err = resolve_scope(Some("source.js"), Some(","), Path::new("x"), &mut diagnostics)
            .unwrap_err();
        assert!(matches!(err, FormatError::MissingScope(_)));
    }

    #[test]
    fn fix_scope_trims_whitespace_around_dots() {
        assert_eq!(fix_scope(" . source.js "), ".source.js");
        assert_eq!(fix_scope(" . "), ".");
    }

    #[test]
    fn reports_default_scope() {
        let (_, diagnostics) = resolve(Some("source.python"), None);
        assert_eq!(
            diagnostics.entries()[0].kind,
            DiagnosticKind::DefaultScope(".source.python".into())
        );
    }
}
