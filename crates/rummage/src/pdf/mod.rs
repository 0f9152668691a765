//! PDF text recovery.
//!
//! [`extract_pdf`] runs three independent passes and concatenates their output:
//!
//! 1. visible text, one string per page ([`text::extract_visible_text`])
//! 2. every object reachable by probing object numbers ([`objects::dump_objects`])
//! 3. the raw bytes of the whole file ([`crate::extraction::text::extract_strings`])
//!
//! A pass that fails is logged and contributes nothing; the remaining passes
//! still run.

pub mod content;
pub mod encoding;
pub mod error;
pub mod font;
pub mod objects;
pub mod text;

#[cfg(test)]
mod fixtures;

pub use content::{FontResolver, ScanState, interpret, step};
pub use error::PdfError;
pub use font::{Font, GlyphDecoder, ToUnicodeMap};
pub use objects::{ObjectSource, dump_objects};
pub use text::extract_visible_text;

use crate::core::config::ExtractionConfig;
use crate::extraction::text::extract_strings;
use lopdf::Document;

/// Recover every string a PDF yields, in pass order.
pub fn extract_pdf(bytes: &[u8], config: &ExtractionConfig) -> Vec<String> {
    recover(Document::load_mem(bytes).map_err(PdfError::from), bytes, config)
}

fn recover(loaded: Result<Document, PdfError>, bytes: &[u8], config: &ExtractionConfig) -> Vec<String> {
    let mut strings = Vec::new();

    match loaded {
        Ok(mut document) => {
            match extract_visible_text(&mut document) {
                Ok(pages) => {
                    tracing::debug!(pass = "visible_text", pages = pages.len(), "PDF pass complete");
                    strings.extend(pages);
                }
                Err(e) => tracing::warn!(pass = "visible_text", error = %e, "PDF pass failed"),
            }

            let objects = dump_objects(&document, config.pdf.probe_limit());
            tracing::debug!(pass = "objects", objects = objects.len(), "PDF pass complete");
            strings.extend(objects);
        }
        Err(e) => {
            tracing::warn!(pass = "visible_text", error = %e, "PDF pass failed");
            tracing::warn!(pass = "objects", error = %e, "PDF pass failed");
        }
    }

    strings.extend(extract_strings(bytes));
    strings
}
