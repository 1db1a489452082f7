//! Non-fatal notices produced while converting
//!
//! Every notice is recorded so callers can inspect what happened during a run.
//! Unless the sink is silent, notices are also emitted as `tracing` events.

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An input file is about to be read
    Reading,
    /// The scope came from the source file
    DefaultScope(String),
    /// The scope came from the configured override
    OverrideScope(String),
    /// A trigger was seen twice; the later entry replaced the earlier one
    DuplicateTrigger(String),
    /// An entry without a usable trigger was dropped
    SkippedEntry(String),
    /// A merged input declared a scope different from the merged document's
    ScopeMismatch { kept: String, ignored: String },
    /// An output file was written
    Writing(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: PathBuf,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.kind {
            DiagnosticKind::Reading => write!(f, "Reading snippet file '{path}'"),
            DiagnosticKind::DefaultScope(scope) => write!(f, "Using default scope '{scope}'"),
            DiagnosticKind::OverrideScope(scope) => write!(f, "Override scope using '{scope}'"),
            DiagnosticKind::DuplicateTrigger(title) => {
                write!(f, "Duplicate trigger {title:?} in '{path}'")
            }
            DiagnosticKind::SkippedEntry(entry) => write!(f, "Ignoring entry {entry} in '{path}'"),
            DiagnosticKind::ScopeMismatch { kept, ignored } => write!(
                f,
                "Scope '{ignored}' of '{path}' differs from merged scope '{kept}', keeping '{kept}'"
            ),
            DiagnosticKind::Writing(out) => write!(f, "Writing '{}'", out.display()),
        }
    }
}

/// Collects diagnostics for one conversion run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    silent: bool,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(silent: bool) -> Self {
        Self {
            silent,
            entries: Vec::new(),
        }
    }

    pub fn report(&mut self, path: &Path, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            kind,
            path: path.to_path_buf(),
        };
        if !self.silent {
            match diagnostic.kind {
                DiagnosticKind::DuplicateTrigger(_)
                | DiagnosticKind::SkippedEntry(_)
                | DiagnosticKind::ScopeMismatch { .. } => tracing::warn!("{diagnostic}"),
                _ => tracing::info!("{diagnostic}"),
            }
        }
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    /// Count notices matching a predicate on their kind.
    pub fn count(&self, pred: impl Fn(&DiagnosticKind) -> bool) -> usize {
        self.entries.iter().filter(|d| pred(&d.kind)).count()
    }
}
