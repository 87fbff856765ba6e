//! Configuration file parsing.
//!
//! Parses individual `.lucene.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Field definitions, in file order.
    pub field: Option<Vec<RawField>>,
    /// Editor settings section.
    pub editor: Option<RawEditorSettings>,
}

/// Raw field definition from a `[[field]]` table.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    /// Field name.
    pub key: String,
    /// Allowed values. Accepts either a single string or an array of strings.
    #[serde_as(as = "OneOrMany<_>")]
    #[serde(default)]
    pub values: Vec<String>,
}

/// Raw editor settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEditorSettings {
    /// Whether to offer the built-in query snippets.
    pub snippets: Option<bool>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}
