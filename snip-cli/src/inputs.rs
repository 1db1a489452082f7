//! Expansion of command-line inputs into source files
//!
//! An input is a directory (every snippet file directly inside it), a glob
//! pattern, or a plain path. Order is deterministic: directory entries are
//! sorted and glob matches keep the enumeration order of `glob`.

use anyhow::{bail, Context, Result};
use snip_babel::{SourceFile, SourceKind};
use std::fs;
use std::path::{Path, PathBuf};

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

fn is_candidate(path: &Path, forced: Option<SourceKind>) -> bool {
    path.is_file() && (forced.is_some() || SourceKind::from_path(path).is_some())
}

fn expand_directory(dir: &Path, forced: Option<SourceKind>) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory '{}'", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory '{}'", dir.display()))?
            .path();
        if is_candidate(&path, forced) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files.into_iter().map(SourceFile::from_directory).collect())
}

fn expand_pattern(pattern: &str) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern '{pattern}'"))? {
        let path: PathBuf = entry?;
        if path.is_file() {
            files.push(SourceFile::new(path));
        }
    }
    if files.is_empty() {
        bail!("No files match '{pattern}'");
    }
    Ok(files)
}

pub fn expand_inputs(args: &[String], forced: Option<SourceKind>) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    for arg in args {
        let path = Path::new(arg);
        if path.is_dir() {
            let files = expand_directory(path, forced)?;
            if files.is_empty() {
                bail!("No snippet files found in '{arg}'");
            }
            sources.extend(files);
        } else if is_pattern(arg) {
            sources.extend(expand_pattern(arg)?);
        } else {
            sources.push(SourceFile::new(path));
        }
    }
    Ok(sources)
}
