//! Companion utilities shipped alongside the extraction core.
//!
//! None of these share state with the core. [`bz2list`] is a thin wrapper over
//! the tar-family archive algorithm.

pub mod bz2list;
pub mod creds;
pub mod fetch;
pub mod flatten;
pub mod timewindow;

pub use bz2list::{list_bzip2_tar, list_bzip2_tar_file};
pub use creds::credentials_to_csv;
pub use fetch::{DEFAULT_FETCH_TIMEOUT, fetch_to_file};
pub use flatten::{FlatRecord, flatten_json, flatten_json_file};
pub use timewindow::{TimeWindow, TimeWindows};
