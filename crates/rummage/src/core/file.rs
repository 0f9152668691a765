//! The loaded input file and its extraction results.

use crate::core::config::ExtractionConfig;
use crate::core::dispatch::{ExtractionStrategy, select_strategy};
use crate::core::mime::{DetectedFormat, detect_format_with_window};
use crate::core::sniff::DEFAULT_SNIFF_WINDOW;
use crate::extraction::text::escape_for_display;
use crate::extraction::urls::extract_urls;
use crate::Result;
use std::path::Path;

/// An input file: its bytes, detected format and the strings recovered from it.
///
/// The format and strategy are derived from the bytes once, at construction, and
/// never change. `strings` is empty until [`File::parse`] runs and is replaced
/// wholesale by every call.
///
/// # Example
///
/// ```rust
/// use rummage::File;
///
/// let mut file = File::load(b"see https://example.com/docs".to_vec(), "note.txt");
/// file.parse().unwrap();
/// assert_eq!(file.url_extract(), vec!["https://example.com/docs".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct File {
    bytes: Vec<u8>,
    name: String,
    format: DetectedFormat,
    strategy: ExtractionStrategy,
    strings: Vec<String>,
}

impl File {
    /// Classify `bytes` and bind the extraction strategy. `name` is kept for
    /// diagnostics and plays no part in classification.
    pub fn load(bytes: Vec<u8>, name: impl Into<String>) -> Self {
        Self::load_with_config(bytes, name, &ExtractionConfig::default())
    }

    /// Like [`File::load`], sniffing with the configured window.
    pub fn load_with_config(bytes: Vec<u8>, name: impl Into<String>, config: &ExtractionConfig) -> Self {
        let window = if config.detection.sniff_window == 0 {
            DEFAULT_SNIFF_WINDOW
        } else {
            config.detection.sniff_window
        };
        let format = detect_format_with_window(&bytes, window);
        let strategy = select_strategy(&format.mime_type);
        let name = name.into();

        tracing::debug!(
            file = %name,
            mime_type = %format.mime_type,
            extension = %format.extension,
            %strategy,
            "file classified"
        );

        Self {
            bytes,
            name,
            format,
            strategy,
            strings: Vec::new(),
        }
    }

    /// Read a file from disk. The file name component becomes the name.
    ///
    /// # Errors
    ///
    /// `RummageError::Io` if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_config(path, &ExtractionConfig::default())
    }

    /// Read a file from disk, detecting its format under `config`.
    ///
    /// The sniff window comes from `config.detection`. Strings stay empty
    /// until [`File::parse_with_config`] runs.
    ///
    /// # Errors
    ///
    /// `RummageError::Io` if the file cannot be read.
    pub fn from_path_with_config(path: impl AsRef<Path>, config: &ExtractionConfig) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::load_with_config(bytes, name, config))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> &DetectedFormat {
        &self.format
    }

    pub fn mime_type(&self) -> &str {
        &self.format.mime_type
    }

    pub fn extension(&self) -> &str {
        &self.format.extension
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        self.strategy
    }

    /// Strings recovered by the last successful [`File::parse`].
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Every string escaped for single-line display.
    pub fn escaped_strings(&self) -> Vec<String> {
        self.strings.iter().map(|s| escape_for_display(s)).collect()
    }

    /// The concatenation of all strings, escaped for single-line display.
    pub fn escaped_string(&self) -> String {
        escape_for_display(&self.strings.concat())
    }

    /// Run the bound strategy with the default configuration.
    pub fn parse(&mut self) -> Result<&[String]> {
        self.parse_with_config(&ExtractionConfig::default())
    }

    /// Run the bound strategy, replacing any previous results.
    ///
    /// # Errors
    ///
    /// `RummageError::Parsing` when a container cannot be opened or read. The
    /// string list is left empty in that case.
    pub fn parse_with_config(&mut self, config: &ExtractionConfig) -> Result<&[String]> {
        self.strings.clear();

        match self.strategy.run(&self.bytes, &self.format, config) {
            Ok(strings) => {
                tracing::debug!(file = %self.name, strings = strings.len(), "parse complete");
                self.strings = strings;
                Ok(&self.strings)
            }
            Err(e) => {
                tracing::warn!(file = %self.name, strategy = %self.strategy, error = %e, "parse failed");
                Err(e)
            }
        }
    }

    /// Unique URLs found in the recovered strings, in first-seen order.
    pub fn url_extract(&self) -> Vec<String> {
        extract_urls(&self.strings)
    }
}
