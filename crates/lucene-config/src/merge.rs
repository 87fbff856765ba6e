//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules.

use std::path::{Path, PathBuf};

use lucene_query::FieldSchema;
use tracing::debug;

use crate::{
    Config, EditorSettings,
    parse::{RawConfig, RawEditorSettings, RawField},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Fields: merged by key, the highest-precedence definition wins completely. Keys keep the
///   order in which they first appear, reading the lowest-precedence file first.
/// - Editor settings: first defined value wins for each setting.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    let fields = merge_fields(configs);
    let editor = merge_editor_settings(configs);
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    debug!(files = configs.len(), fields = fields.len(), "merged configuration");

    Config {
        fields,
        editor,
        config_root,
    }
}

/// Merges field definitions from all configs.
fn merge_fields(configs: &[ParsedConfig]) -> Vec<FieldSchema> {
    let mut result: Vec<FieldSchema> = Vec::new();

    // Lowest precedence first so later definitions overwrite in place.
    for parsed in configs.iter().rev() {
        for raw in parsed.config.field.iter().flatten() {
            apply_raw_field(&mut result, raw);
        }
    }

    result
}

/// Inserts a field, or replaces the values of an existing field with the same key.
fn apply_raw_field(result: &mut Vec<FieldSchema>, raw: &RawField) {
    match result.iter_mut().find(|f| f.key == raw.key) {
        Some(existing) => existing.values.clone_from(&raw.values),
        None => result.push(FieldSchema::new(raw.key.as_str(), raw.values.iter().cloned())),
    }
}

/// Merges editor settings.
fn merge_editor_settings(configs: &[ParsedConfig]) -> EditorSettings {
    let mut result = EditorSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref editor) = parsed.config.editor {
            apply_raw_editor(&mut result, editor);
        }
    }

    result
}

/// Applies raw editor settings to result, overwriting any present values.
fn apply_raw_editor(result: &mut EditorSettings, raw: &RawEditorSettings) {
    if let Some(v) = raw.snippets {
        result.snippets = v;
    }
}
