//! Format detection from byte content.
//!
//! Classification never looks at a file name. Binary signatures are matched first
//! with the `infer` crate; when nothing matches, the leading bytes are sniffed with
//! the heuristics in [`crate::core::sniff`]. Detection is total: an empty buffer
//! reports [`UNKNOWN`] rather than failing.

use crate::core::sniff::{DEFAULT_SNIFF_WINDOW, sniff_content_type};
use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const ZIP_MIME_TYPE: &str = "application/zip";
pub const TAR_MIME_TYPE: &str = "application/x-tar";
pub const GZIP_MIME_TYPE: &str = "application/gzip";
pub const BZIP2_MIME_TYPE: &str = "application/x-bzip2";
pub const HTML_MIME_TYPE: &str = "text/html";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const EXCEL_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const POWER_POINT_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const LEGACY_WORD_MIME_TYPE: &str = "application/msword";
pub const LEGACY_EXCEL_MIME_TYPE: &str = "application/vnd.ms-excel";
pub const LEGACY_POWERPOINT_MIME_TYPE: &str = "application/vnd.ms-powerpoint";

/// Marker used for both MIME type and extension when nothing is known.
pub const UNKNOWN: &str = "unknown";

/// Result of format detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedFormat {
    /// MIME type, possibly with parameters (e.g. `text/plain; charset=utf-8`)
    pub mime_type: String,
    /// Extension reported by the matching signature, or `unknown`
    pub extension: String,
}

impl DetectedFormat {
    fn unknown() -> Self {
        Self {
            mime_type: UNKNOWN.to_string(),
            extension: UNKNOWN.to_string(),
        }
    }

    /// Whether detection had nothing to classify (empty input).
    pub fn is_unknown(&self) -> bool {
        self.mime_type == UNKNOWN
    }
}

/// Detect the format of `bytes` with the default sniffing window.
pub fn detect_format(bytes: &[u8]) -> DetectedFormat {
    detect_format_with_window(bytes, DEFAULT_SNIFF_WINDOW)
}

/// Detect the format of `bytes`, sniffing at most `sniff_window` leading bytes
/// when no signature matches.
pub fn detect_format_with_window(bytes: &[u8], sniff_window: usize) -> DetectedFormat {
    if bytes.is_empty() {
        return DetectedFormat::unknown();
    }

    if let Some(kind) = infer::get(bytes) {
        return DetectedFormat {
            mime_type: kind.mime_type().to_string(),
            extension: kind.extension().to_string(),
        };
    }

    DetectedFormat {
        mime_type: sniff_content_type(bytes, sniff_window).to_string(),
        extension: UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_unknown() {
        let detected = detect_format(b"");
        assert!(detected.is_unknown());
        assert_eq!(detected.extension, UNKNOWN);
    }

    #[test]
    fn test_pdf_signature() {
        let detected = detect_format(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n");
        assert_eq!(detected.mime_type, PDF_MIME_TYPE);
        assert_eq!(detected.extension, "pdf");
    }

    #[test]
    fn test_gzip_and_bzip2_signatures() {
        let gz = detect_format(b"\x1f\x8b\x08\x00\x00\x00\x00\x00\x00\x03");
        assert_eq!(gz.mime_type, GZIP_MIME_TYPE);
        assert_eq!(gz.extension, "gz");

        let bz = detect_format(b"BZh91AY&SY\x00\x00\x00\x00");
        assert_eq!(bz.mime_type, BZIP2_MIME_TYPE);
        assert_eq!(bz.extension, "bz2");
    }

    #[test]
    fn test_png_signature() {
        let detected = detect_format(b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR");
        assert_eq!(detected.mime_type, "image/png");
        assert_eq!(detected.extension, "png");
    }

    #[test]
    fn test_plain_text_falls_back_to_sniffing() {
        let detected = detect_format(b"The quick brown fox jumps over the lazy dog.");
        assert_eq!(detected.mime_type, "text/plain; charset=utf-8");
        assert_eq!(detected.extension, UNKNOWN);
    }

    #[test]
    fn test_html_detected() {
        let detected = detect_format(b"<!DOCTYPE html><html><body>x</body></html>");
        assert!(detected.mime_type.starts_with(HTML_MIME_TYPE));
    }

    #[test]
    fn test_binary_garbage_is_octet_stream() {
        let detected = detect_format(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(detected.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_detection_is_deterministic() {
        let inputs: [&[u8]; 4] = [b"", b"hello", b"%PDF-1.7", &[0xff, 0x00, 0x13]];
        for input in inputs {
            assert_eq!(detect_format(input), detect_format(input));
        }
    }
}
