//! Configuration file discovery.
//!
//! Discovers `.lucene.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.lucene.toml` if present. Each file is read and parsed
//! once, while walking; the parse result both decides whether the walk stops and is what
//! [`Config::load`](crate::Config::load) merges.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::{debug, trace};

use crate::{
    ConfigError,
    parse::{RawConfig, parse_config_file},
};

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".lucene.toml";

/// A configuration file found during discovery.
#[derive(Debug)]
pub struct DiscoveredConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// The parsed file, or why it could not be read or parsed.
    pub parsed: Result<RawConfig, ConfigError>,
}

impl DiscoveredConfig {
    /// Reads and parses the file at `path`.
    fn read(path: PathBuf) -> Self {
        let parsed = parse_config_file(&path);
        Self { path, parsed }
    }

    /// True if the file parsed and sets `root = true`.
    ///
    /// A file that fails to parse never stops discovery.
    pub fn is_root(&self) -> bool {
        self.parsed
            .as_ref()
            .is_ok_and(|config| config.root == Some(true))
    }
}

/// Discovers and parses all configuration files relevant to the given directory.
///
/// Returns files in precedence order: closest to `cwd` first, global (`~/.lucene.toml`)
/// last. Files closer to `cwd` have higher precedence during merging.
///
/// The function:
/// 1. Walks up from `cwd` to the filesystem root, parsing any `.lucene.toml` file found
/// 2. Stops after a file that parses with `root = true`
/// 3. Appends `~/.lucene.toml` if it exists and no root config was found (lowest precedence)
///
/// Parse failures are kept in [`DiscoveredConfig::parsed`] rather than aborting the walk.
pub fn discover_configs(cwd: &Path) -> Vec<DiscoveredConfig> {
    let mut configs: Vec<DiscoveredConfig> = Vec::new();

    for dir in cwd.ancestors() {
        let config_path = dir.join(CONFIG_FILENAME);
        trace!(path = %config_path.display(), "probing");
        if !config_path.is_file() {
            continue;
        }

        let config = DiscoveredConfig::read(config_path);
        let is_root = config.is_root();
        debug!(
            path = %config.path.display(),
            is_root,
            parsed = config.parsed.is_ok(),
            "found config file"
        );
        configs.push(config);
        if is_root {
            return configs;
        }
    }

    if let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.iter().any(|c| c.path == global_path)
    {
        debug!(path = %global_path.display(), "found global config file");
        configs.push(DiscoveredConfig::read(global_path));
    }

    configs
}

/// Discovers the paths of all configuration files relevant to the given directory.
///
/// Same walk and order as [`discover_configs`].
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    discover_configs(cwd).into_iter().map(|c| c.path).collect()
}

/// Returns the path to the global configuration file (`~/.lucene.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}
