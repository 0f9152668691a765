//! MIME-prefix registry and extraction strategies.
//!
//! The registry is a process-wide, read-only table built on first use. Lookup
//! picks the longest registered prefix that the MIME type starts with; anything
//! unmatched falls back to [`ExtractionStrategy::Raw`].

use crate::core::config::ExtractionConfig;
use crate::core::mime::DetectedFormat;
use crate::extraction::text::extract_strings;
use crate::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a detected format is turned into strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Legacy binary office documents (doc, xls, ppt); raw strings only
    LegacyBinary,
    /// Zip containers, zip-based office and e-book formats included
    Zip,
    /// Plain, gzip or bzip2 compressed tar streams
    TarFamily,
    /// Three-pass PDF recovery
    Pdf,
    /// Raw string recovery over the whole buffer
    Raw,
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LegacyBinary => "legacy_binary",
            Self::Zip => "zip",
            Self::TarFamily => "tar_family",
            Self::Pdf => "pdf",
            Self::Raw => "raw",
        };
        f.write_str(name)
    }
}

static REGISTRY: Lazy<Vec<(&'static str, ExtractionStrategy)>> = Lazy::new(|| {
    use ExtractionStrategy::*;

    vec![
        ("application/msword", LegacyBinary),
        ("application/vnd.ms-excel", LegacyBinary),
        ("application/vnd.ms-powerpoint", LegacyBinary),
        ("application/vnd.openxmlformats-officedocument.", Zip),
        ("application/vnd.oasis.opendocument.", Zip),
        ("application/epub+zip", Zip),
        ("application/java-archive", Zip),
        ("application/zip", Zip),
        ("application/pdf", Pdf),
        ("application/gzip", TarFamily),
        ("application/x-bzip2", TarFamily),
        ("application/x-tar", TarFamily),
        ("text/html", Raw),
    ]
});

/// Registered `(prefix, strategy)` pairs, in registration order.
pub fn registered_prefixes() -> &'static [(&'static str, ExtractionStrategy)] {
    &REGISTRY
}

/// Select the strategy for `mime_type`. The longest matching prefix wins.
pub fn select_strategy(mime_type: &str) -> ExtractionStrategy {
    REGISTRY
        .iter()
        .filter(|(prefix, _)| mime_type.starts_with(prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, strategy)| *strategy)
        .unwrap_or(ExtractionStrategy::Raw)
}

impl ExtractionStrategy {
    /// Run this strategy over `bytes`.
    ///
    /// Strategies whose cargo feature is disabled fall back to raw string recovery.
    pub fn run(&self, bytes: &[u8], format: &DetectedFormat, config: &ExtractionConfig) -> Result<Vec<String>> {
        tracing::debug!(strategy = %self, mime_type = %format.mime_type, size = bytes.len(), "running extraction strategy");

        match self {
            Self::LegacyBinary | Self::Raw => Ok(extract_strings(bytes)),

            #[cfg(feature = "archives")]
            Self::Zip => crate::extraction::archive::extract_zip(bytes),

            #[cfg(feature = "archives")]
            Self::TarFamily => {
                let compression = crate::extraction::archive::TarCompression::from_extension(&format.extension);
                crate::extraction::archive::extract_tar_family(bytes, compression)
            }

            #[cfg(not(feature = "archives"))]
            Self::Zip | Self::TarFamily => Ok(extract_strings(bytes)),

            #[cfg(feature = "pdf")]
            Self::Pdf => Ok(crate::pdf::extract_pdf(bytes, config)),

            #[cfg(not(feature = "pdf"))]
            Self::Pdf => {
                let _ = config;
                Ok(extract_strings(bytes))
            }
        }
    }
}
