use anyhow::Result;
use std::path::{Component, Path, PathBuf};

use crate::builders::patterns::{CommentStripper, ExtensionClass};
use crate::builders::reporter::{FileOutcome, RunReporter, RunSummary};
use crate::core::config::StripperConfig;
use crate::core::source::SourceTree;

/// What `apply` will do with a planned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Strip(ExtensionClass),
    SkipUnsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub action: FileAction,
}

/// Walks a tree, decides what to do with every file, and rewrites the files
/// whose comments were removed.
///
/// The walk (`plan`) never reads file contents; `apply` is the only step that
/// touches them. Both go through the injected `SourceTree`.
pub struct StripEngine<T: SourceTree> {
    tree: T,
    config: StripperConfig,
    dry_run: bool,
}

impl<T: SourceTree> StripEngine<T> {
    pub fn new(tree: T, config: StripperConfig) -> Self {
        Self {
            tree,
            config,
            dry_run: false,
        }
    }

    /// In dry-run mode every file is still read and transformed, but nothing
    /// is written back.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Lists the files under `root` that survive the exclusions, in traversal
    /// order, with the action for each.
    ///
    /// Fails only when the tree itself cannot be listed (e.g. the root does
    /// not exist).
    pub fn plan(&self, root: &Path) -> Result<Vec<PlannedFile>> {
        let prune = |name: &str| self.config.is_excluded_dir(name);
        let files = self.tree.list_files(root, &prune)?;

        let mut plan = Vec::with_capacity(files.len());
        for path in files {
            if self.has_excluded_component(root, &path) {
                tracing::debug!("Excluded by directory: {}", path.display());
                continue;
            }

            let file_name = path.file_name().map(|n| n.to_string_lossy());
            if file_name.is_some_and(|name| self.config.is_excluded_file(&name)) {
                tracing::debug!("Excluded by file name: {}", path.display());
                continue;
            }

            let action = match ExtensionClass::classify(&path) {
                ExtensionClass::Unsupported => FileAction::SkipUnsupported,
                class => FileAction::Strip(class),
            };
            tracing::trace!("Planned {:?} for {}", action, path.display());
            plan.push(PlannedFile { path, action });
        }

        Ok(plan)
    }

    // Checks every component below the root, the file name included, so a
    // file literally named `.git` is excluded like the directory would be.
    fn has_excluded_component(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        relative.components().any(|component| match component {
            Component::Normal(name) => self.config.is_excluded_dir(&name.to_string_lossy()),
            _ => false,
        })
    }

    /// Strips one file and writes it back if its length changed.
    ///
    /// Unsupported files are reported without being read. Read and write
    /// errors are returned to the caller.
    pub fn process_file(&mut self, path: &Path, class: ExtensionClass) -> Result<FileOutcome> {
        if !class.is_supported() {
            return Ok(FileOutcome::Unsupported);
        }

        tracing::debug!("Stripping {} as {class}", path.display());
        let content = self.tree.read_file(path)?;
        let original_len = content.chars().count();

        let stripped = class.strip(&content);
        let stripped_len = stripped.chars().count();

        if stripped_len == original_len {
            return Ok(FileOutcome::NoComments);
        }

        if self.dry_run {
            tracing::debug!("Dry run, not writing {}", path.display());
        } else {
            self.tree.write_file(path, &stripped)?;
        }

        Ok(FileOutcome::Stripped {
            removed: original_len.saturating_sub(stripped_len),
        })
    }

    /// Processes every planned file in order. A failing file is reported and
    /// counted; it never stops the run.
    pub fn apply(&mut self, plan: &[PlannedFile], reporter: &mut dyn RunReporter) -> RunSummary {
        let mut summary = RunSummary {
            dry_run: self.dry_run,
            ..Default::default()
        };

        for planned in plan {
            let class = match planned.action {
                FileAction::Strip(class) => class,
                FileAction::SkipUnsupported => ExtensionClass::Unsupported,
            };

            match self.process_file(&planned.path, class) {
                Ok(outcome) => {
                    reporter.file_processed(&planned.path, &outcome, self.dry_run);
                    summary.record(&outcome);
                }
                Err(e) => {
                    tracing::debug!("Processing {} failed: {e:?}", planned.path.display());
                    reporter.file_failed(&planned.path, &e);
                    summary.record_failure();
                }
            }
        }

        summary
    }

    /// Plans and applies a whole run over `root`, bracketed by the start and
    /// completion notices. Nothing is reported when the plan itself fails.
    pub fn process_directory(
        &mut self,
        root: &Path,
        reporter: &mut dyn RunReporter,
    ) -> Result<RunSummary> {
        let plan = self.plan(root)?;
        reporter.run_started(root);
        let summary = self.apply(&plan, reporter);
        reporter.run_finished(&summary)?;
        Ok(summary)
    }
}
