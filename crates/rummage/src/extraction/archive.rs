//! Archive extraction for zip and tar-family containers.
//!
//! Both families share one algorithm: a container reader produces
//! [`ArchiveMember`]s through a forward-only iterator, and every member is passed
//! to [`extract_member`]. Members are never re-classified, so a zip inside a zip
//! yields the raw strings of the inner archive bytes.
//!
//! Failure rules:
//!
//! - the container itself cannot be opened: error
//! - a zip entry cannot be opened: logged and skipped
//! - a member body cannot be read, or the tar stream breaks mid-way: error
//! - tar entries that are neither directories nor regular files: logged and skipped

use crate::error::{Result, RummageError};
use crate::extraction::text::extract_strings;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fmt;
use std::io::{Cursor, Read, Seek};
use tar::Archive as TarArchive;
use zip::ZipArchive;

/// A single file pulled out of a container.
#[derive(Debug, Clone)]
pub struct ArchiveMember {
    /// Path of the member inside the container
    pub name: String,
    /// Zero-based position of the entry in the container, directories included
    pub position: usize,
    /// Uncompressed member contents
    pub bytes: Vec<u8>,
}

/// Compression wrapped around a tar stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TarCompression {
    /// Uncompressed TAR
    #[default]
    None,
    /// Gzip compressed (.tar.gz, .tgz)
    Gzip,
    /// Bzip2 compressed (.tar.bz2, .tbz2)
    Bzip2,
}

impl TarCompression {
    /// Pick the compression from a detected extension (`gz`, `bz2`, ...).
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "gz" | "tgz" => Self::Gzip,
            "bz2" | "tbz2" | "tbz" => Self::Bzip2,
            _ => Self::None,
        }
    }
}

impl fmt::Display for TarCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
        };
        write!(f, "{s}")
    }
}

/// Recover text from one archive member.
pub fn extract_member(bytes: &[u8]) -> Vec<String> {
    extract_strings(bytes)
}

/// Run [`extract_member`] over every member, stopping at the first error.
pub fn drain_members<I>(members: I) -> Result<Vec<String>>
where
    I: Iterator<Item = Result<ArchiveMember>>,
{
    let mut strings = Vec::new();
    for member in members {
        let member = member?;
        tracing::debug!(
            entry = %member.name,
            position = member.position,
            size = member.bytes.len(),
            "extracting archive member"
        );
        strings.extend(extract_member(&member.bytes));
    }
    Ok(strings)
}

/// Extract strings from every member of a zip archive (zip-based office formats included).
pub fn extract_zip(bytes: &[u8]) -> Result<Vec<String>> {
    let members = ZipMembers::new(Cursor::new(bytes))?;
    drain_members(members)
}

/// Extract strings from every regular file of a tar stream.
pub fn extract_tar_family(bytes: &[u8], compression: TarCompression) -> Result<Vec<String>> {
    tracing::debug!(%compression, size = bytes.len(), "opening tar stream");
    let cursor = Cursor::new(bytes);
    match compression {
        TarCompression::None => extract_tar_stream(cursor),
        TarCompression::Gzip => extract_tar_stream(GzDecoder::new(cursor)),
        TarCompression::Bzip2 => extract_tar_stream(BzDecoder::new(cursor)),
    }
}

fn extract_tar_stream<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut archive = TarArchive::new(reader);
    let members = TarMembers::new(&mut archive)?;
    drain_members(members)
}

/// Members of a zip archive, in central directory order.
pub struct ZipMembers<R: Read + Seek> {
    archive: ZipArchive<R>,
    next_index: usize,
}

impl<R: Read + Seek> ZipMembers<R> {
    /// Open the zip central directory.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| RummageError::parsing_with_source("Failed to read ZIP archive", e))?;
        Ok(Self { archive, next_index: 0 })
    }
}

impl<R: Read + Seek> Iterator for ZipMembers<R> {
    type Item = Result<ArchiveMember>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.archive.len();
        while self.next_index < len {
            let position = self.next_index;
            self.next_index += 1;

            let mut file = match self.archive.by_index(position) {
                Ok(file) => file,
                Err(e) => {
                    tracing::warn!(position, error = %e, "skipping ZIP entry that could not be opened");
                    continue;
                }
            };

            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let mut bytes = Vec::new();
            if let Err(e) = file.read_to_end(&mut bytes) {
                self.next_index = len;
                return Some(Err(RummageError::parsing_with_source(
                    format!("Failed to read ZIP entry '{}'", name),
                    e,
                )));
            }

            return Some(Ok(ArchiveMember { name, position, bytes }));
        }

        None
    }
}

/// Members of a tar stream, in stream order.
pub struct TarMembers<'a, R: 'a + Read> {
    entries: tar::Entries<'a, R>,
    position: usize,
    finished: bool,
}

impl<'a, R: 'a + Read> TarMembers<'a, R> {
    /// Start iterating the entries of `archive`.
    pub fn new(archive: &'a mut TarArchive<R>) -> Result<Self> {
        let entries = archive
            .entries()
            .map_err(|e| RummageError::parsing_with_source("Failed to read TAR archive", e))?;
        Ok(Self {
            entries,
            position: 0,
            finished: false,
        })
    }
}

impl<'a, R: 'a + Read> Iterator for TarMembers<'a, R> {
    type Item = Result<ArchiveMember>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let mut entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(RummageError::parsing_with_source("Failed to read TAR entry", e)));
                }
            };

            let position = self.position;
            self.position += 1;

            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let entry_type = entry.header().entry_type();

            if entry_type.is_dir() {
                continue;
            }

            if !entry_type.is_file() {
                tracing::warn!(
                    entry = %name,
                    type_flag = entry_type.as_byte(),
                    "skipping unsupported TAR entry type"
                );
                continue;
            }

            let mut bytes = Vec::new();
            if let Err(e) = entry.read_to_end(&mut bytes) {
                self.finished = true;
                return Some(Err(RummageError::parsing_with_source(
                    format!("Failed to read TAR entry '{}'", name),
                    e,
                )));
            }

            return Some(Ok(ArchiveMember { name, position, bytes }));
        }
    }
}
