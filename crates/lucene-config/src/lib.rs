//! Field schema configuration for Lucene query tooling.
//!
//! Schemas live in TOML files named `.lucene.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.lucene.toml`
//! files found, then loading `~/.lucene.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{
    CONFIG_FILENAME, DiscoveredConfig, discover_config_files, discover_configs, global_config_path,
};
pub use error::ConfigError;
use lucene_query::FieldSchema;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawEditorSettings, RawField, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::local_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.lucene.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Field schema offered to completion, in display order.
    pub fields: Vec<FieldSchema>,
    /// Editor adapter settings.
    pub editor: EditorSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.lucene.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers and parses all `.lucene.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.lucene.toml` if it exists
    /// 3. Fails on the first file that could not be read or parsed
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let parsed = discover_configs(cwd)
            .into_iter()
            .map(|discovered| {
                Ok(ParsedConfig {
                    config: discovered.parsed?,
                    path: discovered.path,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective schema and settings to TOML.
    ///
    /// The output has the same shape as a `.lucene.toml` file, so it can be copied into
    /// one.
    pub fn schema_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableConfig {
            field: &self.fields,
            editor: &self.editor,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Settings for the editor adapter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Whether to offer the built-in query snippets.
    pub snippets: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self { snippets: true }
    }
}

/// Internal struct for TOML serialization of the effective configuration.
#[derive(Serialize)]
struct SerializableConfig<'a> {
    /// Fields, written as `[[field]]` tables.
    field: &'a [FieldSchema],
    /// Editor settings.
    editor: &'a EditorSettings,
}
