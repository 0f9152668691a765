//! Rummage - Text and URL Recovery for Arbitrary Files
//!
//! Rummage takes a file whose type is not known in advance, classifies it from its
//! bytes, and pulls out every piece of readable text it can find: the members of
//! zip and tar-family archives, the visible text and object tree of PDFs, and the
//! raw valid UTF-8 of everything else. URLs found in the recovered text can be
//! extracted and deduplicated.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rummage::File;
//!
//! # fn main() -> rummage::Result<()> {
//! let mut file = File::from_path("unknown.bin")?;
//! println!("{} ({})", file.mime_type(), file.strategy());
//!
//! for line in file.parse()? {
//!     println!("{}", line);
//! }
//! for url in file.url_extract() {
//!     println!("{}", url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): format detection, strategy dispatch, configuration, [`File`]
//! - **Extraction** (`extraction`): raw string recovery, URL discovery, archive members
//! - **PDF** (`pdf`): three-pass PDF text recovery
//! - **Tools** (`tools`): companion utilities (JSON flattening, time windows, HTTP fetch, ...)

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "tools")]
pub mod tools;

pub use error::{Result, RummageError};

pub use core::config::{DetectionConfig, ExtractionConfig, PdfConfig};
pub use core::dispatch::{ExtractionStrategy, select_strategy};
pub use core::file::File;
pub use core::mime::{DetectedFormat, detect_format, detect_format_with_window};

pub use extraction::text::extract_strings;
pub use extraction::urls::extract_urls;
