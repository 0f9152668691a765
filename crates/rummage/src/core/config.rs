//! Configuration loading and management.
//!
//! Configuration can be built programmatically, loaded from TOML or JSON, or
//! discovered as `rummage.toml` in the current directory or any parent.

use crate::core::sniff::DEFAULT_SNIFF_WINDOW;
use crate::{Result, RummageError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard ceiling on PDF object-number probes, whatever the configuration says.
pub const MAX_OBJECT_PROBES: u32 = 1000;

/// File name searched for by [`ExtractionConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "rummage.toml";

/// Main extraction configuration.
///
/// # Example
///
/// ```rust
/// use rummage::core::config::ExtractionConfig;
///
/// let config: ExtractionConfig = toml::from_str("[pdf]\nmax_object_probes = 200\n").unwrap();
/// assert_eq!(config.pdf.probe_limit(), 200);
/// assert_eq!(config.detection.sniff_window, 512);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Format detection options
    #[serde(default)]
    pub detection: DetectionConfig,

    /// PDF recovery options
    #[serde(default)]
    pub pdf: PdfConfig,
}

/// Format detection options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Number of leading bytes inspected by the content-heuristic fallback
    #[serde(default = "default_sniff_window")]
    pub sniff_window: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sniff_window: default_sniff_window(),
        }
    }
}

/// PDF recovery options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Maximum object numbers probed by the object dump pass (capped at 1000)
    #[serde(default = "default_max_object_probes")]
    pub max_object_probes: u32,
}

impl PdfConfig {
    /// Probe limit actually applied: the configured value, never above [`MAX_OBJECT_PROBES`].
    pub fn probe_limit(&self) -> u32 {
        self.max_object_probes.min(MAX_OBJECT_PROBES)
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_object_probes: default_max_object_probes(),
        }
    }
}

fn default_sniff_window() -> usize {
    DEFAULT_SNIFF_WINDOW
}

fn default_max_object_probes() -> u32 {
    MAX_OBJECT_PROBES
}

impl ExtractionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `RummageError::Validation` if the file cannot be read, is invalid TOML,
    /// or holds invalid values.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RummageError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| RummageError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RummageError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| RummageError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, choosing the format by extension
    /// (`.json` is JSON, anything else TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Discover `rummage.toml` in the current directory or its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(RummageError::Io)?;
        Self::discover_from(&current)
    }

    /// Discover `rummage.toml` starting at `start` and walking up.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
        }

        Ok(None)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.detection.sniff_window == 0 {
            return Err(RummageError::validation("detection.sniff_window must be greater than zero"));
        }
        Ok(())
    }
}
