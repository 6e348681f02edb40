//! Driver and help-layout settings.
//!
//! Settings shape how commands are presented and how the driver reports
//! failures. They never supply option values.
//!
//! # Example YAML
//!
//! ```yaml
//! left_column_width: 24
//! help_switches:
//!   - -h
//!   - --help
//! usage_error_exit_code: 64
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Presentation and exit-status settings.
///
/// Missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use clasp_core::Settings;
///
/// let settings = Settings::from_yaml_str("left_column_width: 30").unwrap();
/// assert_eq!(settings.left_column_width, 30);
/// assert!(settings.is_help_switch("--help"));
/// assert_eq!(settings.usage_error_exit_code, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Width of the left help column.
    pub left_column_width: usize,
    /// Switches that request help when the definition does not declare them.
    pub help_switches: Vec<String>,
    /// Exit status after a usage error.
    pub usage_error_exit_code: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            left_column_width: 20,
            help_switches: vec!["-h".to_string(), "--help".to_string()],
            usage_error_exit_code: 1,
        }
    }
}

impl Settings {
    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](SettingsError::IoError) if the file cannot be
    /// read, or [`YamlError`](SettingsError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let settings = serde_yaml::from_reader(reader)?;
        Ok(settings)
    }

    /// Parses settings from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](SettingsError::YamlError) if parsing fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Returns `true` if `switch` requests help.
    pub fn is_help_switch(&self, switch: &str) -> bool {
        self.help_switches.iter().any(|s| s == switch)
    }
}
