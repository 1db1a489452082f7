//! Shared configuration loader for the snip toolchain.
//!
//! `defaults/snip.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`SnipConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use snip_babel::{ConvertOptions, OutputFormat, SourceKind};
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/snip.default.toml");

/// Top-level configuration consumed by snip applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SnipConfig {
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

/// Conversion behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub output_format: OutputKind,
    pub input_format: Option<InputKind>,
    pub split: bool,
    pub merge: bool,
    pub scope: Option<String>,
    pub strict_duplicates: bool,
    pub validate: bool,
    pub auto_tabstops: bool,
    pub comment_header: bool,
    pub silent: bool,
}

/// Where and under which name files are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub merge_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    Json,
    Cson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    Textmate,
    Sublime,
    Json,
}

impl From<OutputKind> for OutputFormat {
    fn from(kind: OutputKind) -> Self {
        match kind {
            OutputKind::Json => OutputFormat::Json,
            OutputKind::Cson => OutputFormat::Cson,
        }
    }
}

impl From<InputKind> for SourceKind {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::Textmate => SourceKind::Plist,
            InputKind::Sublime => SourceKind::Xml,
            InputKind::Json => SourceKind::Json,
        }
    }
}

impl SnipConfig {
    /// Flatten into the options a conversion run consumes.
    pub fn to_options(&self) -> ConvertOptions {
        let convert = &self.convert;
        ConvertOptions {
            input_format: convert.input_format.map(SourceKind::from),
            output_format: convert.output_format.into(),
            output_dir: self.output.directory.clone(),
            split: convert.split,
            merge: convert.merge,
            merge_name: self.output.merge_name.clone(),
            scope_override: convert.scope.clone().filter(|s| !s.trim().is_empty()),
            strict_duplicates: convert.strict_duplicates,
            validate: convert.validate,
            auto_tabstops: convert.auto_tabstops,
            comment_header: convert.comment_header,
            silent: convert.silent,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SnipConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SnipConfig, ConfigError> {
    Loader::new().build()
}
