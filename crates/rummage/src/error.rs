//! Error types for Rummage.
//!
//! All fallible library operations return [`RummageError`]. Errors are built with
//! `thiserror` and keep their source chain through `#[source]` attributes.
//!
//! # Error Handling Policy
//!
//! **System errors bubble up unchanged:**
//! - `RummageError::Io` (from `std::io::Error`) covers file system failures at the
//!   edges of the library (reading an input file, writing tool output).
//!
//! **Application errors carry context:**
//! - `Parsing` - a container or document could not be opened, or a reader failed
//!   mid-stream. For archives this aborts the whole parse.
//! - `Validation` - invalid configuration or caller input
//! - `Serialization` - JSON encode/decode failures in the companion tools
//! - `Network` - transport failures in the HTTP fetch helper
//!
//! Per-entry, per-page and per-object failures are *not* errors: they are logged
//! with `tracing::warn!` and skipped by the loop that encountered them.
//!
//! # Example
//!
//! ```rust
//! use rummage::{RummageError, Result};
//!
//! fn read_input(path: &str) -> Result<Vec<u8>> {
//!     let bytes = std::fs::read(path)?;
//!
//!     if bytes.is_empty() {
//!         return Err(RummageError::validation(format!("Input is empty: {}", path)));
//!     }
//!
//!     Ok(bytes)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `RummageError`.
pub type Result<T> = std::result::Result<T, RummageError>;

/// Main error type for all Rummage operations.
///
/// # Variants
///
/// - `Io` - File system and I/O errors (always bubble up)
/// - `Parsing` - Structural failures: unreadable containers, corrupt streams
/// - `Validation` - Invalid configuration or parameters
/// - `Serialization` - JSON serialization errors
/// - `Network` - HTTP transport errors
#[derive(Debug, Error)]
pub enum RummageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<serde_json::Error> for RummageError {
    fn from(err: serde_json::Error) -> Self {
        RummageError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "pdf")]
impl From<crate::pdf::error::PdfError> for RummageError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        RummageError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl RummageError {
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);
    error_constructor!(network, Network);
}
