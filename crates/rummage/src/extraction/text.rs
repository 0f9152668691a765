//! Raw string recovery from arbitrary bytes.
//!
//! This is the terminal extractor for every other strategy: archive members, the
//! PDF raw pass and any unrecognised input all end up here. The buffer is checked
//! as UTF-8; when it is not valid, invalid byte runs are dropped and every valid
//! sequence (multi-byte ones included) is kept as-is.
//!
//! # Example
//!
//! ```rust
//! use rummage::extraction::text::extract_strings;
//!
//! let cleaned = extract_strings(b"caf\xc3\xa9 \xff ok");
//! assert_eq!(cleaned, vec!["café  ok".to_string()]);
//!
//! assert!(extract_strings(b"").is_empty());
//! ```

#[cfg(feature = "simd-utf8")]
use simdutf8::compat::from_utf8;
#[cfg(not(feature = "simd-utf8"))]
use std::str::from_utf8;

/// Clean `bytes` into valid text.
///
/// Returns an empty list when the cleaned text is empty, otherwise exactly one
/// string.
pub fn extract_strings(bytes: &[u8]) -> Vec<String> {
    let text = clean_utf8(bytes);
    if text.is_empty() { Vec::new() } else { vec![text] }
}

/// Drop invalid UTF-8 byte runs from `bytes`, keeping every valid sequence.
pub fn clean_utf8(bytes: &[u8]) -> String {
    if let Ok(valid) = from_utf8(bytes) {
        return valid.to_string();
    }

    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;

    while !rest.is_empty() {
        match from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                // The prefix was just validated by from_utf8.
                if let Ok(valid) = std::str::from_utf8(&rest[..valid_up_to]) {
                    out.push_str(valid);
                }
                let skip = err.error_len().unwrap_or(rest.len() - valid_up_to);
                rest = &rest[valid_up_to + skip..];
            }
        }
    }

    out
}

/// Escape a string for safe single-line display.
///
/// The result is double-quoted; quotes, backslashes, control characters and
/// every non-ASCII character are escaped.
pub fn escape_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\'' => out.push('\''),
            _ => out.extend(ch.escape_default()),
        }
    }
    out.push('"');
    out
}
