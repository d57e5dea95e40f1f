//! Make the staged file visible at its destination.

use super::staging_builder;
use crate::error::DownloadError;
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tempfile::TempPath;

/// Create the parent directory of `dest` (and all missing ancestors).
/// Directories created here are not removed if a later step fails.
pub fn ensure_parent_dir(dest: &Path) -> Result<(), DownloadError> {
    match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir).map_err(|e| DownloadError::storage("create directory", dir, e))?;
            tracing::debug!(dir = %dir.display(), "created destination directory");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Atomically rename `staged` onto `dest`, replacing any previous file.
///
/// A plain rename fails when the working directory and `dest` are on
/// different filesystems; then the data is copied into a staging file next to
/// `dest` first, and that one is renamed.
pub fn move_into_place(staged: TempPath, dest: &Path) -> Result<(), DownloadError> {
    let err = match staged.persist(dest) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    tracing::debug!(
        "rename {} -> {} failed ({}), copying next to destination",
        err.path.display(),
        dest.display(),
        err.error
    );
    copy_then_rename(&err.path, dest).map_err(|e| DownloadError::storage("move file to", dest, e))
}

fn copy_then_rename(src: &Path, dest: &Path) -> io::Result<()> {
    let dir = match dest.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut local = staging_builder().tempfile_in(dir)?;
    io::copy(&mut File::open(src)?, local.as_file_mut())?;
    local.as_file().sync_all()?;
    local.into_temp_path().persist(dest).map_err(|e| e.error)
}

/// Set atime and mtime of `dest` from a `Last-Modified` header value.
///
/// Returns `Ok(false)` (timestamps untouched) when the header is absent or not
/// a valid HTTP date.
pub fn apply_last_modified(dest: &Path, last_modified: Option<&str>) -> Result<bool, DownloadError> {
    let Some(raw) = last_modified else {
        return Ok(false);
    };
    let mtime: SystemTime = match httpdate::parse_http_date(raw.trim()) {
        Ok(t) => t,
        Err(_) => {
            tracing::debug!(value = raw, "ignoring unparseable Last-Modified");
            return Ok(false);
        }
    };
    let times = FileTimes::new().set_accessed(mtime).set_modified(mtime);
    File::options()
        .write(true)
        .open(dest)
        .and_then(|f| f.set_times(times))
        .map_err(|e| DownloadError::storage("set timestamps on", dest, e))?;
    Ok(true)
}
