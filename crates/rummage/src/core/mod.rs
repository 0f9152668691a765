//! Core detection, dispatch and the `File` entry point.
//!
//! - [`mime`]: content-based format detection
//! - [`sniff`]: heuristic fallback used by detection
//! - [`dispatch`]: MIME prefix registry and extraction strategies
//! - [`file`]: the loaded file and its parse results
//! - [`config`]: extraction configuration

pub mod config;
pub mod dispatch;
pub mod file;
pub mod mime;
pub mod sniff;

pub use config::ExtractionConfig;
pub use dispatch::{ExtractionStrategy, select_strategy};
pub use file::File;
pub use mime::{DetectedFormat, detect_format, detect_format_with_window};
