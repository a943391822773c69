//! # pdf2pages
//!
//! Convert a PDF document into a sequence of per-page raster images
//! (PNG or JPEG).
//!
//! ## Why this crate?
//!
//! Downstream tooling — OCR pipelines, vision models, thumbnailers,
//! archival systems — frequently wants "one image per page" rather than
//! the PDF itself. This crate is the thin, predictable glue for that job:
//! pdfium does all the parsing and rasterisation; pdf2pages contributes
//! configuration resolution, a deterministic naming scheme, and a
//! sequential render-encode-write loop whose memory use is bounded by one
//! page's raster.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Resolve  persisted defaults + prompts → ConversionConfig
//!  ├─ 2. Count    page-count query via pdfium (no rendering)
//!  ├─ 3. Check    skip question if matching page images already exist
//!  ├─ 4. Loop     per page: render (pdfium) → encode (png/jpeg) → write
//!  └─ 5. Output   {root}/{subfolder}/{stem}_p001.png … _pNNN.png
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2pages::{convert, ConversionConfig, NoopProgressCallback, PdfiumEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder("document.pdf")
//!         .output_root("out")
//!         .dpi(150)
//!         .build()?;
//!     let engine = PdfiumEngine::new()?;
//!     let stats = convert(&config, &engine, &NoopProgressCallback)?;
//!     println!("{} pages written", stats.saved_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2pages` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2pages = { version = "0.2", default-features = false }
//! ```
//!
//! ## Testing without pdfium
//!
//! The rendering backend is the [`RenderEngine`] trait — two operations,
//! `page_count` and `render_page`. Conversion logic is tested against a
//! fake implementation; only [`PdfiumEngine`] touches the native library.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod defaults;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompt;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ImageFormat, DEFAULT_DPI, DEFAULT_OUTPUT_ROOT};
pub use convert::{convert, run, ConversionOutcome};
pub use defaults::{DefaultsStore, SavedDefaults, DEFAULTS_FILE_NAME};
pub use error::Pdf2PagesError;
pub use output::{existing_outputs, page_file_name, ConversionStats, DocumentMetadata};
pub use pipeline::render::{PdfiumEngine, RenderEngine};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use prompt::{parse_dpi, resolve_config, AcceptDefaults, Prompter, ResolveOverrides, StdinPrompter};
