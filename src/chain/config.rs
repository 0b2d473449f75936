//! Configuration loading for chainfold.
//!
//! `defaults/chainfold.default.toml` is embedded into the library so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top of those
//! defaults via [`Loader`] before deserializing into [`ChainfoldConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/chainfold.default.toml");

/// Name of the optional per-directory configuration file
pub const LOCAL_CONFIG_FILE: &str = "chainfold.toml";

/// Top-level configuration consumed by chainfold applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainfoldConfig {
    pub compile: CompileConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Controls the compile pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    pub simplify: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Processor format string, e.g. `canonical-simple` or `ast-json`
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter directive
    pub level: String,
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
    pub fn build(self) -> Result<ChainfoldConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}
