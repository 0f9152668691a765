pub mod text;
pub mod urls;

#[cfg(feature = "archives")]
pub mod archive;

pub use text::{clean_utf8, escape_for_display, extract_strings};
pub use urls::extract_urls;

#[cfg(feature = "archives")]
pub use archive::{ArchiveMember, TarCompression, extract_member, extract_tar_family, extract_zip};
