use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// The result of processing a single planned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Comments were found. `removed` is the number of characters deleted.
    Stripped { removed: usize },
    /// The transform left the length unchanged; the file was not written.
    NoComments,
    /// The extension has no comment syntax; the file was not opened.
    Unsupported,
}

/// Counters for one run, printed at the end with `--json`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub dry_run: bool,
    /// Files in the plan, i.e. everything that survived the exclusions.
    pub files_visited: usize,
    pub files_stripped: usize,
    pub files_unchanged: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub chars_removed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_visited += 1;
        match outcome {
            FileOutcome::Stripped { removed } => {
                self.files_stripped += 1;
                self.chars_removed += removed;
            }
            FileOutcome::NoComments => self.files_unchanged += 1,
            FileOutcome::Unsupported => self.files_skipped += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.files_visited += 1;
        self.files_failed += 1;
    }
}

/// Receives the progress of a run, one call per planned file.
pub trait RunReporter {
    fn run_started(&mut self, root: &Path);
    fn file_processed(&mut self, path: &Path, outcome: &FileOutcome, dry_run: bool);
    fn file_failed(&mut self, path: &Path, error: &anyhow::Error);
    fn run_finished(&mut self, summary: &RunSummary) -> Result<()>;
}

/// Formats the status line for a processed file.
pub fn format_outcome(path: &Path, outcome: &FileOutcome, dry_run: bool) -> String {
    let path = path.display();
    match outcome {
        FileOutcome::Stripped { removed } if dry_run => {
            format!("Would remove {removed} bytes of comments from {path}")
        }
        FileOutcome::Stripped { removed } => {
            format!("Removed {removed} bytes of comments from {path}")
        }
        FileOutcome::NoComments => format!("No comments found in {path}"),
        FileOutcome::Unsupported => format!("Skipping {path}: unsupported file type"),
    }
}

pub fn format_failure(path: &Path, error: &anyhow::Error) -> String {
    // `{:#}` keeps the whole context chain on one line.
    format!("Error processing {}: {error:#}", path.display())
}

pub fn format_start(root: &Path) -> String {
    format!("Removing comments from all files in {}", root.display())
}

pub const COMPLETION_LINE: &str = "Comment removal complete!";

/// Prints every line to standard output.
///
/// This is the reporter used by the binary.
pub struct ConsoleReporter {
    json: bool,
}

impl ConsoleReporter {
    /// With `json` set, the summary is printed as JSON after the completion
    /// line.
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl RunReporter for ConsoleReporter {
    fn run_started(&mut self, root: &Path) {
        println!("{}", format_start(root));
    }

    fn file_processed(&mut self, path: &Path, outcome: &FileOutcome, dry_run: bool) {
        println!("{}", format_outcome(path, outcome, dry_run));
    }

    fn file_failed(&mut self, path: &Path, error: &anyhow::Error) {
        println!("{}", format_failure(path, error));
    }

    fn run_finished(&mut self, summary: &RunSummary) -> Result<()> {
        println!("{COMPLETION_LINE}");
        if self.json {
            let rendered =
                serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
            println!("{rendered}");
        }
        Ok(())
    }
}

/// Collects the lines a `ConsoleReporter` would print.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub lines: Vec<String>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunReporter for MemoryReporter {
    fn run_started(&mut self, root: &Path) {
        self.lines.push(format_start(root));
    }

    fn file_processed(&mut self, path: &Path, outcome: &FileOutcome, dry_run: bool) {
        self.lines.push(format_outcome(path, outcome, dry_run));
    }

    fn file_failed(&mut self, path: &Path, error: &anyhow::Error) {
        self.lines.push(format_failure(path, error));
    }

    fn run_finished(&mut self, _summary: &RunSummary) -> Result<()> {
        self.lines.push(COMPLETION_LINE.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_lines() {
        let path = Path::new("src/app.js");
        assert_eq!(
            format_outcome(path, &FileOutcome::Stripped { removed: 12 }, false),
            "Removed 12 bytes of comments from src/app.js"
        );
        assert_eq!(
            format_outcome(path, &FileOutcome::Stripped { removed: 12 }, true),
            "Would remove 12 bytes of comments from src/app.js"
        );
        assert_eq!(
            format_outcome(path, &FileOutcome::NoComments, false),
            "No comments found in src/app.js"
        );
        assert_eq!(
            format_outcome(Path::new("a.exe"), &FileOutcome::Unsupported, false),
            "Skipping a.exe: unsupported file type"
        );
    }

    #[test]
    fn test_failure_line_keeps_context() {
        let error = anyhow::anyhow!("Permission denied").context("Failed to write a.js");
        assert_eq!(
            format_failure(Path::new("a.js"), &error),
            "Error processing a.js: Failed to write a.js: Permission denied"
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::default();
        summary.record(&FileOutcome::Stripped { removed: 5 });
        summary.record(&FileOutcome::Stripped { removed: 3 });
        summary.record(&FileOutcome::NoComments);
        summary.record(&FileOutcome::Unsupported);
        summary.record_failure();

        assert_eq!(summary.files_visited, 5);
        assert_eq!(summary.files_stripped, 2);
        assert_eq!(summary.chars_removed, 8);
        assert_eq!(summary.files_unchanged, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.files_failed, 1);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = RunSummary {
            files_visited: 1,
            files_stripped: 1,
            chars_removed: 4,
            ..Default::default()
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["files_stripped"], 1);
        assert_eq!(value["chars_removed"], 4);
        assert_eq!(value["dry_run"], false);
    }
}
