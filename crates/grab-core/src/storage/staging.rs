//! Staging file that receives the raw response body.

use super::staging_builder;
use crate::error::DownloadError;
use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::{NamedTempFile, TempPath};

/// Open staging file. Deleted on drop unless turned into a `TempPath` and persisted.
pub struct StagingFile {
    file: NamedTempFile,
}

impl StagingFile {
    /// Create a new, uniquely named staging file in `dir`.
    pub fn create_in(dir: &Path) -> Result<Self, DownloadError> {
        let file = staging_builder()
            .tempfile_in(dir)
            .map_err(|e| DownloadError::storage("create staging file in", dir, e))?;
        tracing::debug!(path = %file.path().display(), "staging file created");
        Ok(StagingFile { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Drop anything written so far; the next attempt starts from byte 0.
    pub fn rewind(&mut self) -> io::Result<()> {
        let f = self.file.as_file_mut();
        f.set_len(0)?;
        f.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Sink for the response body.
    pub fn writer(&mut self) -> &mut File {
        self.file.as_file_mut()
    }

    /// Flush and close the handle. The returned path still removes itself on drop.
    pub fn close(mut self) -> Result<TempPath, DownloadError> {
        let path = self.file.path().to_path_buf();
        self.file
            .as_file_mut()
            .flush()
            .map_err(|e| DownloadError::storage("flush staging file", path, e))?;
        Ok(self.file.into_temp_path())
    }
}
