//! Input classification
//!
//! Each input is classified once into a [`SourceKind`], either from an explicit
//! selection or from its file extension, and the matching reader is used.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// TextMate property list (`.tmSnippet`)
    Plist,
    /// Sublime Text XML snippet (`.sublime-snippet`)
    Xml,
    /// Sublime completions or a JSON snippet mapping
    Json,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Plist, SourceKind::Xml, SourceKind::Json];

    /// Name of the registered reader for this kind
    pub fn format_name(self) -> &'static str {
        match self {
            SourceKind::Plist => "textmate",
            SourceKind::Xml => "sublime",
            SourceKind::Json => "json",
        }
    }

    /// Classify by file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "tmsnippet" => Some(SourceKind::Plist),
            "sublime-snippet" | "xml" => Some(SourceKind::Xml),
            "sublime-completions" | "json" => Some(SourceKind::Json),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_name())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "textmate" | "tmsnippet" | "plist" => Ok(SourceKind::Plist),
            "sublime" | "sublime-snippet" | "xml" => Ok(SourceKind::Xml),
            "json" | "sublime-completions" | "completions" => Ok(SourceKind::Json),
            other => Err(format!(
                "unknown input format '{other}' (expected textmate, sublime or json)"
            )),
        }
    }
}

/// One input file plus what is known about how it was selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// The file was found by expanding a directory argument
    pub from_directory: bool,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            from_directory: false,
        }
    }

    pub fn from_directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            from_directory: true,
        }
    }

    /// Stem used to name non-split output
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snippets".to_string())
    }
}
