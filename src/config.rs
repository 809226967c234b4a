//! Configuration loading for the accuracy viewer.
//!
//! Every value has a built-in default. An optional `accuracy_viewer.toml` in the
//! working directory may override any of them.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analyzer::AnalysisError;

/// Fixed location of the optional config file.
pub const CONFIG_FILE_NAME: &str = "accuracy_viewer.toml";

/// Log file read when no config overrides it.
pub const DEFAULT_LOG_PATH: &str = "performance_log.csv";

/// How rows beyond the last full ground-truth cycle are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemainderPolicy {
    /// Label the remaining rows with the leading part of the cycle.
    #[default]
    PartialCycle,
    /// Drop the remaining rows from the analysis.
    Truncate,
}

/// Analyzer and window configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ViewerConfig {
    /// Path of the performance log to analyse.
    pub log_path: PathBuf,
    /// Labels assigned to consecutive rows, repeated over the whole log.
    pub ground_truth_cycle: Vec<u32>,
    pub remainder_policy: RemainderPolicy,
    /// Display names indexed by class label.
    pub class_names: Vec<String>,
    pub window_title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            ground_truth_cycle: vec![0, 1, 2, 3, 4, 5],
            remainder_policy: RemainderPolicy::default(),
            class_names: ["Relax", "Grip Object", "Lift Arm", "Extend Arm", "Rotate Wrist", "Bend Elbow"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            window_title: "Accuracy Over Time".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(ViewerConfig)` with defaults applied to every missing key
    /// * `Err(AnalysisError::InvalidConfig)` if the file exists but cannot be read, parsed or validated
    pub fn load_or_default(config_path: &Path) -> Result<Self, AnalysisError> {
        if !config_path.exists() {
            log::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .map_err(|e| AnalysisError::InvalidConfig(format!("Failed to read config file {}: {}", config_path.display(), e)))?;

        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, AnalysisError> {
        let config: Self = toml::from_str(content).map_err(|e| AnalysisError::InvalidConfig(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AnalysisError> {
        if self.ground_truth_cycle.is_empty() {
            return Err(AnalysisError::InvalidConfig("ground-truth-cycle must contain at least one label".to_string()));
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(AnalysisError::InvalidConfig("log-path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Display name for a class label, `Class N` when none is configured.
    pub fn class_name(&self, label: u32) -> String {
        self.class_names
            .get(label as usize)
            .cloned()
            .unwrap_or_else(|| format!("Class {}", label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config.log_path, PathBuf::from("performance_log.csv"));
        assert_eq!(config.ground_truth_cycle, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(config.remainder_policy, RemainderPolicy::PartialCycle);
        assert_eq!(config.window_title, "Accuracy Over Time");
    }

    #[test]
    fn kebab_case_keys_override_defaults() {
        let text = r#"
log-path = "runs/session2.csv"
ground-truth-cycle = [2, 0, 1]
remainder-policy = "truncate"
class-names = ["Rest", "Fist", "Open"]
"#;
        let config = ViewerConfig::from_toml_str(text).unwrap();
        assert_eq!(config.log_path, PathBuf::from("runs/session2.csv"));
        assert_eq!(config.ground_truth_cycle, vec![2, 0, 1]);
        assert_eq!(config.remainder_policy, RemainderPolicy::Truncate);
        assert_eq!(config.class_name(1), "Fist");
        // Untouched keys keep their defaults
        assert_eq!(config.window_title, "Accuracy Over Time");
    }

    #[test]
    fn empty_cycle_is_rejected() {
        let result = ViewerConfig::from_toml_str("ground-truth-cycle = []");
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result = ViewerConfig::from_toml_str("remainder-policy = \"wrap\"");
        assert!(matches!(result, Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ViewerConfig::load_or_default(Path::new("definitely/not/here/accuracy_viewer.toml")).unwrap();
        assert_eq!(config.ground_truth_cycle.len(), 6);
    }

    #[test]
    fn unnamed_classes_get_generic_label() {
        let config = ViewerConfig::default();
        assert_eq!(config.class_name(0), "Relax");
        assert_eq!(config.class_name(5), "Bend Elbow");
        assert_eq!(config.class_name(9), "Class 9");
    }
}
