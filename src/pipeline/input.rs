//! Input validation: check a user-supplied path points at a readable PDF.
//!
//! The magic-byte check exists so callers get a meaningful error rather
//! than a pdfium parse failure when someone points the tool at a Word
//! document renamed `.pdf`. Validation runs twice on purpose: once at
//! prompt time, so the user hears about a typo immediately, and once at
//! the top of the conversion flow, so the render loop can never start
//! against a file that disappeared in between.

use crate::error::Pdf2PagesError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate a local PDF path: existence, readability, `%PDF` magic bytes.
///
/// Returns the path unchanged on success so callers can chain it.
pub fn resolve_local(path: &Path) -> Result<PathBuf, Pdf2PagesError> {
    if !path.exists() {
        return Err(Pdf2PagesError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(Pdf2PagesError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2PagesError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Pdf2PagesError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path.to_path_buf())
}
