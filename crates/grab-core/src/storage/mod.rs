//! Disk I/O and file lifecycle.
//!
//! Bodies are written to a uniquely named staging file in the working
//! directory, decoded there if gzip-compressed, then renamed onto the
//! destination in one step. Staging paths are `tempfile::TempPath`s, so a
//! failure anywhere removes them when they go out of scope.

mod finalize;
mod gzip;
mod staging;

pub use finalize::{apply_last_modified, ensure_parent_dir, move_into_place};
pub use gzip::{gunzip_bytes, gunzip_in_place};
pub use staging::StagingFile;

/// Prefix of every staging file name (`.grab-XXXXXX.part`).
pub const STAGING_PREFIX: &str = ".grab-";

/// Suffix of every staging file name.
pub const STAGING_SUFFIX: &str = ".part";

fn staging_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(STAGING_PREFIX).suffix(STAGING_SUFFIX);
    builder
}
