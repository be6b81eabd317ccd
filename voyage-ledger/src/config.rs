//! Options for a batch run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Error loading a [`RunConfig`] file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Configuration for a batch run.
///
/// Missing fields in a config file take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Print a notice in place of voyages when a Z report is empty.
    pub empty_report_notice: bool,

    /// Append a Z report when the input does not end with one.
    pub closing_report: bool,

    /// Drop the final newline of the transcript.
    pub trim_trailing_newline: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            empty_report_notice: true,
            closing_report: true,
            trim_trailing_newline: true,
        }
    }
}

impl RunConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set whether an empty Z report prints a notice.
    pub fn with_empty_report_notice(mut self, enabled: bool) -> Self {
        self.empty_report_notice = enabled;
        self
    }

    /// Set whether a closing Z report is appended.
    pub fn with_closing_report(mut self, enabled: bool) -> Self {
        self.closing_report = enabled;
        self
    }

    /// Set whether the final newline is dropped.
    pub fn with_trim_trailing_newline(mut self, enabled: bool) -> Self {
        self.trim_trailing_newline = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_enable_everything() {
        let config = RunConfig::new();
        assert!(config.empty_report_notice);
        assert!(config.closing_report);
        assert!(config.trim_trailing_newline);
    }

    #[test]
    fn builders_override_defaults() {
        let config = RunConfig::new()
            .with_closing_report(false)
            .with_trim_trailing_newline(false);
        assert!(config.empty_report_notice);
        assert!(!config.closing_report);
        assert!(!config.trim_trailing_newline);
    }

    #[test]
    fn load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "empty_report_notice": false }"#).unwrap();

        let config = RunConfig::load(&path).unwrap();

        assert_eq!(config, RunConfig::new().with_empty_report_notice(false));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempdir().unwrap();
        let result = RunConfig::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "closing_reprot": false }"#).unwrap();

        let result = RunConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
