//! Pipeline stages for PDF-to-image conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets the
//! conversion loop run against a fake rendering backend without touching
//! the other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ encode ──▶ write
//! (path)    (pdfium)   (png/jpeg)  (disk)
//! ```
//!
//! 1. [`input`]  — validate the user-supplied path points at a readable PDF
//! 2. [`render`] — rasterise one page at a time at the requested DPI
//! 3. [`encode`] — encode each `DynamicImage` as PNG or JPEG bytes
//! 4. [`write`]  — create the target directory and write each page file

pub mod encode;
pub mod input;
pub mod render;
pub mod write;
