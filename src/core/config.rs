use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// The stripper's own script name. Excluded by default so that running the
/// tool over its own checkout never rewrites the file holding the patterns.
pub const SELF_SCRIPT_NAME: &str = "comment_remover.py";

pub const DEFAULT_EXCLUDED_DIRS: [&str; 4] = [".git", ".venv", "node_modules", "__pycache__"];

pub const CONFIG_VERSION: &str = "1.0";

/// The exclusion rules for one traversal.
///
/// Every field is optional in the TOML file; missing fields keep their
/// defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StripperConfig {
    pub version: String,
    /// Directory names. An entry is skipped when any of its path components
    /// below the root equals one of these.
    pub excluded_dirs: BTreeSet<String>,
    /// Exact base names of files that are never processed.
    pub excluded_files: BTreeSet<String>,
}

impl Default for StripperConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            excluded_files: BTreeSet::from([SELF_SCRIPT_NAME.to_string()]),
        }
    }
}

impl StripperConfig {
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.excluded_files.contains(name)
    }

    /// Adds names given on the command line to the configured sets.
    pub fn extend<I, J>(&mut self, dirs: I, files: J)
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        self.excluded_dirs.extend(dirs);
        self.excluded_files.extend(files);
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<StripperConfig>;
    fn get_config_path(&self) -> &Path;
}

/// Reads the exclusion config from a file named on the command line.
///
/// There is no implicit lookup: without `--config` a run uses
/// `StripperConfig::default()`, so a file lying in the target tree never
/// changes what gets rewritten.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<StripperConfig> {
        let content = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file {}", self.config_path.display())
        })?;

        toml::from_str(&content).with_context(|| {
            format!("Failed to parse config file {}", self.config_path.display())
        })
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
