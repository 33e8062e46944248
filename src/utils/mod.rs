use anyhow::Result;
use std::path::PathBuf;

use crate::builders::reporter::{ConsoleReporter, RunReporter, RunSummary};
use crate::builders::validator::{ConfigValidator, StandardValidator};
use crate::core::config::{ConfigManager, ConfigProvider, StripperConfig};
use crate::core::engine::StripEngine;
use crate::core::source::DiskTree;

/// Everything the binary needs to perform a run, already parsed.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub root: PathBuf,
    /// Config file given with `--config`. When `None` the defaults apply.
    pub config: Option<PathBuf>,
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub dry_run: bool,
    pub json: bool,
}

/// Builds the exclusion config for a run: the `--config` file (or the
/// defaults) plus the names given on the command line. Validation issues are
/// logged as warnings and never stop the run.
pub fn resolve_config(options: &RunOptions) -> Result<StripperConfig> {
    let mut config = match &options.config {
        Some(path) => {
            let manager = ConfigManager::new(path.clone());
            tracing::debug!("Config path: {}", manager.get_config_path().display());
            manager.load_config()?
        }
        None => StripperConfig::default(),
    };
    config.extend(
        options.exclude_dirs.iter().cloned(),
        options.exclude_files.iter().cloned(),
    );

    for issue in StandardValidator::new().validate_config(&config)? {
        tracing::warn!("Exclusion config: {issue}");
    }
    Ok(config)
}

/// Strips comments from every file under `options.root`, printing progress to
/// standard output.
pub fn strip_directory(options: &RunOptions) -> Result<RunSummary> {
    let mut reporter = ConsoleReporter::new(options.json);
    strip_directory_with(options, &mut reporter)
}

pub fn strip_directory_with(
    options: &RunOptions,
    reporter: &mut dyn RunReporter,
) -> Result<RunSummary> {
    let config = resolve_config(options)?;
    tracing::info!(
        "Excluding directories {:?} and files {:?}",
        config.excluded_dirs,
        config.excluded_files
    );

    let mut engine = StripEngine::new(DiskTree::new(), config).with_dry_run(options.dry_run);
    let summary = engine.process_directory(&options.root, reporter)?;

    if summary.files_failed > 0 {
        tracing::warn!("{} file(s) could not be processed", summary.files_failed);
    }
    Ok(summary)
}
