//! Conversion runs
//!
//! A [`Conversion`] owns all state of one run: options, the format registry,
//! diagnostics, the input/output counters and, in merge mode, the document
//! being accumulated. Inputs are processed strictly in the order given.
//!
//! Without merge mode every input is written as soon as it is read. In merge
//! mode every input is folded into one document (through the same duplicate
//! policy) and [`Conversion::finish`] writes it once.

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::document::{Document, DuplicatePolicy};
use crate::error::FormatError;
use crate::format::{ReadContext, ReadOptions, WriteOptions};
use crate::publish;
use crate::registry::FormatRegistry;
use crate::source::{SourceFile, SourceKind};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Cson,
}

impl OutputFormat {
    /// Name of the registered writer for this format
    pub fn format_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Cson => "cson",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "cson" => Ok(OutputFormat::Cson),
            other => Err(format!(
                "unknown output format '{other}' (expected json or cson)"
            )),
        }
    }
}

/// Everything a run needs to know, flattened from CLI and config
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Forces a reader instead of classifying by extension
    pub input_format: Option<SourceKind>,
    pub output_format: OutputFormat,
    pub output_dir: PathBuf,
    pub split: bool,
    pub merge: bool,
    /// File stem of the single merged output
    pub merge_name: String,
    pub scope_override: Option<String>,
    pub strict_duplicates: bool,
    pub validate: bool,
    pub auto_tabstops: bool,
    pub comment_header: bool,
    pub silent: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input_format: None,
            output_format: OutputFormat::default(),
            output_dir: PathBuf::from("."),
            split: false,
            merge: false,
            merge_name: "snippets".to_string(),
            scope_override: None,
            strict_duplicates: false,
            validate: true,
            auto_tabstops: true,
            comment_header: true,
            silent: false,
        }
    }
}

impl ConvertOptions {
    fn read_options(&self) -> ReadOptions {
        ReadOptions {
            scope_override: self.scope_override.clone(),
            duplicates: if self.strict_duplicates {
                DuplicatePolicy::Strict
            } else {
                DuplicatePolicy::Warn
            },
            validate: self.validate,
        }
    }
}

/// Outcome of a finished run
#[derive(Debug)]
pub struct RunSummary {
    pub inputs_read: usize,
    pub outputs_written: usize,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Conversion {
    options: ConvertOptions,
    read_options: ReadOptions,
    registry: FormatRegistry,
    diagnostics: Diagnostics,
    inputs_read: usize,
    outputs_written: usize,
    merged: Option<Document>,
    merged_from_directory: bool,
}

impl Conversion {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            read_options: options.read_options(),
            diagnostics: Diagnostics::new(options.silent),
            registry: FormatRegistry::with_defaults(),
            inputs_read: 0,
            outputs_written: 0,
            merged: None,
            merged_from_directory: false,
            options,
        }
    }

    /// Read one input and either write it or fold it into the merged document.
    pub fn convert(&mut self, source: &SourceFile) -> Result<(), FormatError> {
        let doc = self.read(source)?;

        if !self.options.merge {
            return self.write(&doc, source.stem(), source.from_directory);
        }

        self.merged_from_directory |= source.from_directory;
        if let Some(merged) = self.merged.as_mut() {
            return merged.absorb(
                doc,
                self.read_options.duplicates,
                &source.path,
                &mut self.diagnostics,
            );
        }
        self.merged = Some(doc);
        Ok(())
    }

    /// Classify and parse one input into a document.
    pub fn read(&mut self, source: &SourceFile) -> Result<Document, FormatError> {
        let kind = self
            .options
            .input_format
            .or_else(|| SourceKind::from_path(&source.path))
            .ok_or_else(|| FormatError::UnsupportedInput(source.path.clone()))?;

        self.diagnostics.report(&source.path, DiagnosticKind::Reading);
        let raw = fs::read_to_string(&source.path)
            .map_err(|err| FormatError::io(&source.path, err))?;

        let mut ctx = ReadContext::new(&source.path, &self.read_options, &mut self.diagnostics);
        let doc = self.registry.parse(&raw, kind.format_name(), &mut ctx)?;
        self.inputs_read += 1;
        Ok(doc)
    }

    fn write(
        &mut self,
        doc: &Document,
        base_name: String,
        from_directory: bool,
    ) -> Result<(), FormatError> {
        let options = WriteOptions {
            split: self.options.split,
            comment_header: self.options.comment_header,
            auto_tabstops: self.options.auto_tabstops,
            base_name,
            package_layout: from_directory,
        };
        let files = self
            .registry
            .serialize(doc, self.options.output_format.format_name(), &options)?;
        self.outputs_written +=
            publish::write_files(&self.options.output_dir, &files, &mut self.diagnostics)?;
        Ok(())
    }

    /// Write the merged document, if any, and report the run's totals.
    pub fn finish(mut self) -> Result<RunSummary, FormatError> {
        if let Some(doc) = self.merged.take() {
            let name = self.options.merge_name.clone();
            self.write(&doc, name, self.merged_from_directory)?;
        }
        Ok(RunSummary {
            inputs_read: self.inputs_read,
            outputs_written: self.outputs_written,
            diagnostics: self.diagnostics.into_entries(),
        })
    }

    pub fn inputs_read(&self) -> usize {
        self.inputs_read
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.entries()
    }

    /// The document accumulated so far in merge mode
    pub fn merged(&self) -> Option<&Document> {
        self.merged.as_ref()
    }
}

/// Convert every input in order, stopping at the first fatal error.
pub fn run<I>(options: ConvertOptions, inputs: I) -> Result<RunSummary, FormatError>
where
    I: IntoIterator<Item = SourceFile>,
{
    let mut conversion = Conversion::new(options);
    for source in inputs {
        conversion.convert(&source)?;
    }
    conversion.finish()
}
