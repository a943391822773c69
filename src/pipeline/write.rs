//! Disk output: target-directory creation and per-page writes.
//!
//! Writes are plain `fs::write` calls — same-named files are silently
//! overwritten, and a failure (disk full, permission denied) propagates as
//! a fatal [`Pdf2PagesError::OutputWriteFailed`]. Pages written before the
//! failure stay on disk; there is no rollback.

use crate::error::Pdf2PagesError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Create the target directory (and parents) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<(), Pdf2PagesError> {
    fs::create_dir_all(dir).map_err(|e| Pdf2PagesError::OutputWriteFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;
    debug!("Output directory ready: {}", dir.display());
    Ok(())
}

/// Write one encoded page image, overwriting any existing file at `path`.
pub fn write_page(bytes: &[u8], path: &Path) -> Result<(), Pdf2PagesError> {
    fs::write(path, bytes).map_err(|e| Pdf2PagesError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
