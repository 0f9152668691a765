//! Contents of a bzip2-compressed tar archive.

use crate::Result;
use crate::extraction::archive::{TarCompression, extract_tar_family};
use std::path::Path;

/// Recovered text of every regular file in a `.tar.bz2` buffer.
pub fn list_bzip2_tar(bytes: &[u8]) -> Result<Vec<String>> {
    extract_tar_family(bytes, TarCompression::Bzip2)
}

/// Read `path` and list it with [`list_bzip2_tar`].
pub fn list_bzip2_tar_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let bytes = std::fs::read(path.as_ref())?;
    tracing::debug!(path = %path.as_ref().display(), size = bytes.len(), "listing bzip2 tar");
    list_bzip2_tar(&bytes)
}
