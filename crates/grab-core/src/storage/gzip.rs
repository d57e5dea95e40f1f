//! Gzip decoding of response bodies, in memory or in the staging file.

use super::staging_builder;
use crate::error::DownloadError;
use crate::transport::CHUNK_SIZE;
use flate2::read::MultiGzDecoder;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::TempPath;

/// Decode a complete gzip buffer (all members).
pub fn gunzip_bytes(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len().saturating_mul(2));
    MultiGzDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

/// Replace the content of `staged` with its gunzipped form.
///
/// Decodes into a second staging file in `work_dir`, then renames it over
/// `staged`. An invalid stream or an empty result is an error; on error the
/// second file is removed and `staged` is left as it was.
pub fn gunzip_in_place(staged: &Path, work_dir: &Path) -> Result<(), DownloadError> {
    let decompress_err = |source: io::Error| DownloadError::Decompress {
        path: Some(staged.to_path_buf()),
        source,
    };

    let input = File::open(staged).map_err(|e| DownloadError::storage("open", staged, e))?;
    let mut decoded = staging_builder()
        .tempfile_in(work_dir)
        .map_err(|e| DownloadError::storage("create staging file in", work_dir, e))?;
    let decoded_path = decoded.path().to_path_buf();

    let written = {
        let mut gz = MultiGzDecoder::new(input);
        let out = decoded.as_file_mut();
        let mut buf = [0u8; CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let n = gz.read(&mut buf).map_err(decompress_err)?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n])
                .map_err(|e| DownloadError::storage("write", &decoded_path, e))?;
            total += n as u64;
        }
        total
    };
    if written == 0 {
        return Err(decompress_err(io::Error::new(
            io::ErrorKind::InvalidData,
            "gzip stream decoded to nothing",
        )));
    }

    let decoded = decoded.into_temp_path();
    replace(decoded, staged).map_err(|e| DownloadError::storage("replace", staged, e))?;
    tracing::debug!(path = %staged.display(), bytes = written, "gunzipped staging file");
    Ok(())
}

/// Rename `src` onto `dst`. Where renaming onto an existing path is refused,
/// remove `dst` and try once more.
fn replace(src: TempPath, dst: &Path) -> io::Result<()> {
    match src.persist(dst) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!(
                "rename onto {} failed ({}), removing it first",
                dst.display(),
                e.error
            );
            fs::remove_file(dst)?;
            e.path.persist(dst).map_err(|e| e.error)
        }
    }
}
