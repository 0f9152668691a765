//! Blocking HTTP download to a file.

use crate::{Result, RummageError};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::path::Path;
use std::time::Duration;

/// Overall request timeout used by the CLI.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// GET `url` and stream a `200 OK` body into `out`.
///
/// Certificate verification is disabled. Returns `Ok(false)` without creating
/// `out` for any other status.
///
/// # Errors
///
/// `RummageError::Network` when the client cannot be built or the request fails
/// in transport, `RummageError::Io` when `out` cannot be written.
pub fn fetch_to_file(url: &str, out: impl AsRef<Path>, timeout: Duration) -> Result<bool> {
    let out = out.as_ref();

    let client = Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(timeout)
        .build()
        .map_err(|e| RummageError::network_with_source("Failed to build HTTP client", e))?;

    tracing::debug!(url, "request sent");
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| RummageError::network_with_source(format!("Request to {} failed", url), e))?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!(url, status = status.as_u16(), "HTTP request failed");
        return Ok(false);
    }

    let mut file = std::fs::File::create(out)?;
    let written = response
        .copy_to(&mut file)
        .map_err(|e| RummageError::network_with_source(format!("Failed to read body from {}", url), e))?;

    tracing::debug!(url, output = %out.display(), bytes = written, "response body saved");
    Ok(true)
}
