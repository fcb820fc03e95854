//! Shared configuration loader for the sane snippets toolchain.
//!
//! `defaults/snip.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`SnipConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use snip_core::{CompileOptions, ExtractOptions, TemplateDefaults};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/snip.default.toml");

/// Top-level configuration consumed by snippet applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SnipConfig {
    pub extract: ExtractConfig,
    pub template: TemplateConfig,
    pub compile: CompileConfig,
}

/// Extraction knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub placeholder_base: usize,
    /// Tab width for buffers that do not carry their own.
    pub tab_width: usize,
}

impl From<&ExtractConfig> for ExtractOptions {
    fn from(config: &ExtractConfig) -> Self {
        ExtractOptions {
            placeholder_base: config.placeholder_base,
        }
    }
}

/// Header defaults for new snippet templates.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    pub description: String,
    pub tab_trigger: String,
    pub scope: String,
}

impl From<TemplateConfig> for TemplateDefaults {
    fn from(config: TemplateConfig) -> Self {
        TemplateDefaults {
            description: config.description,
            tab_trigger: config.tab_trigger,
            scope: config.scope,
        }
    }
}

/// Definition discovery and artifact layout.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    pub output_dir: String,
    pub source_extension: String,
    pub artifact_extension: String,
}

impl From<CompileConfig> for CompileOptions {
    fn from(config: CompileConfig) -> Self {
        CompileOptions {
            output_dir: config.output_dir,
            source_extension: trim_dot(config.source_extension),
            artifact_extension: trim_dot(config.artifact_extension),
        }
    }
}

fn trim_dot(extension: String) -> String {
    match extension.strip_prefix('.') {
        Some(stripped) => stripped.to_string(),
        None => extension,
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
