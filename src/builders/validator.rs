use anyhow::Result;

use crate::core::config::{self, StripperConfig};

/// The `ConfigValidator` trait defines the public interface for checking an
/// exclusion configuration before a run.
pub trait ConfigValidator {
    /// Performs a full validation of the `StripperConfig` and returns a list
    /// of issues found.
    ///
    /// # Arguments
    /// * `config`: The `StripperConfig` to be validated.
    ///
    /// # Returns
    /// A `Result<Vec<String>>` where each string describes one issue. An empty
    /// vector means the configuration is clean.
    fn validate_config(&self, config: &StripperConfig) -> Result<Vec<String>>;

    /// Validates a single exclusion name.
    ///
    /// # Arguments
    /// * `kind`: Either `"directory"` or `"file"`, used in the messages.
    /// * `name`: The configured name.
    fn validate_name(&self, kind: &str, name: &str) -> Vec<String>;
}

/// The `StandardValidator` is the validator used by `ConfigManager`.
///
/// Exclusions are matched against single path components, so anything that
/// cannot be a component is flagged.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Names listed both as a directory and as a file exclusion. Not wrong,
    /// but usually a sign of a misplaced entry.
    fn check_overlap(&self, config: &StripperConfig) -> Vec<String> {
        config
            .excluded_dirs
            .intersection(&config.excluded_files)
            .map(|name| format!("'{name}' is excluded both as a directory and as a file"))
            .collect()
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for StandardValidator {
    fn validate_config(&self, config: &StripperConfig) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if config.version != config::CONFIG_VERSION {
            issues.push(format!("Unsupported config version: {}", config.version));
        }

        for name in &config.excluded_dirs {
            issues.extend(self.validate_name("directory", name));
        }
        for name in &config.excluded_files {
            issues.extend(self.validate_name("file", name));
        }

        issues.extend(self.check_overlap(config));

        Ok(issues)
    }

    fn validate_name(&self, kind: &str, name: &str) -> Vec<String> {
        let mut issues = Vec::new();

        if name.trim().is_empty() {
            issues.push(format!("Empty {kind} exclusion will match nothing"));
        } else if name.contains(['/', '\\']) {
            issues.push(format!(
                "{kind} exclusion '{name}' contains a path separator and will never match a single path component"
            ));
        } else if name == "." || name == ".." {
            issues.push(format!("{kind} exclusion '{name}' will never match"));
        }

        issues
    }
}
