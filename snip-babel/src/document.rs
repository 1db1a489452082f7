//! Canonical snippet document
//!
//! Every reader produces a [`Document`] and every writer consumes one. Titles
//! are unique within a document and keep their first-insertion order, which
//! is also the order entries are written in.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::FormatError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One trigger → expansion mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub prefix: String,
    pub body: String,
}

impl CompletionEntry {
    pub fn new(prefix: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            body: body.into(),
        }
    }
}

/// What happens when a title is inserted twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Report the duplicate and let the later entry replace the earlier one.
    /// The entry keeps the position of the first insertion.
    #[default]
    Warn,
    /// Abort the run.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub scope: String,
    pub completions: IndexMap<String, CompletionEntry>,
}

impl Document {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            completions: IndexMap::new(),
        }
    }

    /// Insert an entry under `title`, applying the duplicate policy.
    pub fn insert(
        &mut self,
        title: String,
        entry: CompletionEntry,
        policy: DuplicatePolicy,
        origin: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), FormatError> {
        if self.completions.contains_key(&title) {
            match policy {
                DuplicatePolicy::Strict => {
                    return Err(FormatError::DuplicateTrigger {
                        title,
                        path: origin.to_path_buf(),
                    })
                }
                DuplicatePolicy::Warn => {
                    diagnostics.report(origin, DiagnosticKind::DuplicateTrigger(title.clone()));
                }
            }
        }
        self.completions.insert(title, entry);
        Ok(())
    }

    /// Fold every completion of `other` into `self`, in order.
    ///
    /// The scope of `self` is kept; a different scope in `other` is reported.
    pub fn absorb(
        &mut self,
        other: Document,
        policy: DuplicatePolicy,
        origin: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), FormatError> {
        if other.scope != self.scope {
            diagnostics.report(
                origin,
                DiagnosticKind::ScopeMismatch {
                    kept: self.scope.clone(),
                    ignored: other.scope,
                },
            );
        }
        for (title, entry) in other.completions {
            self.insert(title, entry, policy, origin, diagnostics)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.completions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }
}
