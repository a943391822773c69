//! Error types for the pdf2pages library.
//!
//! Everything here is **fatal**: the conversion stops, the message is shown
//! to the user, and the process exits nonzero. The one recoverable input —
//! an unparseable DPI answer — never becomes an error value at all; the
//! prompt layer logs a warning and substitutes the default instead (see
//! [`crate::prompt::parse_dpi`]).
//!
//! There is deliberately no page-level error type: the loop is sequential
//! and has no retry or partial-failure policy, so the first failing page
//! aborts the run. Pages written before the failure stay on disk.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2pages library.
#[derive(Debug, Error)]
pub enum Pdf2PagesError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// The requested image format token is not recognised.
    #[error("Unsupported image format '{token}'\nSupported formats: png, jpeg (alias: jpg)")]
    InvalidImageFormat { token: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password; pdf2pages does not handle encrypted documents.
    #[error("PDF '{path}' is encrypted.\nDecrypt it first, e.g.: qpdf --decrypt --password=PW input.pdf output.pdf")]
    PasswordRequired { path: PathBuf },

    /// A page outside [1, total] was requested from the renderer.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// pdfium returned an error while rendering a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory or write a page image.
    #[error("Failed to write output '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not read or rewrite the persisted defaults file.
    #[error("Failed to access defaults file '{path}': {source}")]
    DefaultsStoreFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an interactive answer from the terminal failed.
    #[error("Failed to read interactive input: {source}")]
    PromptFailed {
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
pdf2pages needs the pdfium shared library at runtime. You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/dir containing libpdfium.\n\
  • Place libpdfium.so / libpdfium.dylib / pdfium.dll next to the binary.\n\
  • Install pdfium system-wide so the dynamic linker finds it.\n"
    )]
    PdfiumBindingFailed(String),
}
