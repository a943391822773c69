//! The conversion flow: page count, then a sequential per-page loop.
//!
//! Per run the flow moves through a fixed state machine:
//!
//! ```text
//! Resolving config → Checking existing outputs → { Skipped
//!                                                | Converting (page 1 … N, sequential)
//!                                                  → Completed }
//! ```
//!
//! [`run`] is the full machine including the skip question; [`convert`] is
//! just the loop and is what tests drive directly with a pre-built
//! configuration. One page is rendered, encoded, and written to completion
//! before the next begins — memory stays bounded by a single page's raster,
//! and a failure on page k leaves pages 1..k-1 on disk with no rollback.

use crate::config::ConversionConfig;
use crate::error::Pdf2PagesError;
use crate::output::{self, ConversionStats};
use crate::pipeline::{encode, input, render::RenderEngine, write};
use crate::progress::ConversionProgressCallback;
use crate::prompt::Prompter;
use std::time::Instant;
use tracing::{debug, info};

/// How a run ended: either the user chose to keep existing outputs, or the
/// loop completed.
#[derive(Debug)]
pub enum ConversionOutcome {
    /// Existing page images were found and the user chose to skip; nothing
    /// was rendered or written.
    Skipped { existing: usize },
    /// All pages were converted.
    Completed(ConversionStats),
}

/// Run the full state machine: check for existing outputs, ask whether to
/// skip, then convert.
///
/// The skip question is only asked when matching page images already exist
/// in the target directory; the default answer is "do not skip". Both the
/// question and its default reach the user through the same [`Prompter`]
/// seam as configuration resolution, so non-interactive runs overwrite.
pub fn run(
    config: &ConversionConfig,
    engine: &dyn RenderEngine,
    prompter: &mut dyn Prompter,
    progress: &dyn ConversionProgressCallback,
) -> Result<ConversionOutcome, Pdf2PagesError> {
    let dir = config.target_dir();
    let existing = output::existing_outputs(&dir, &config.pdf_stem(), config.format).map_err(
        |e| Pdf2PagesError::OutputWriteFailed {
            path: dir.clone(),
            source: e,
        },
    )?;

    if !existing.is_empty() {
        info!(
            "{} existing page image(s) found in {}",
            existing.len(),
            dir.display()
        );
        let question = format!(
            "{} matching image(s) already exist in '{}'. Skip conversion?",
            existing.len(),
            dir.display()
        );
        if prompter.confirm(&question, false)? {
            info!("Conversion skipped; existing files left untouched");
            return Ok(ConversionOutcome::Skipped {
                existing: existing.len(),
            });
        }
        debug!("Overwriting existing page images");
    }

    convert(config, engine, progress).map(ConversionOutcome::Completed)
}

/// Convert every page of the configured PDF to an image file.
///
/// Same-named files are silently overwritten. Any failure — page count,
/// render, encode, write — aborts the loop and propagates; pages already
/// written stay on disk.
pub fn convert(
    config: &ConversionConfig,
    engine: &dyn RenderEngine,
    progress: &dyn ConversionProgressCallback,
) -> Result<ConversionStats, Pdf2PagesError> {
    let start = Instant::now();

    // Re-validate even though resolution already did: the file may have
    // moved between the prompt and now, and the loop must never start
    // against an unreadable document.
    let pdf_path = input::resolve_local(&config.pdf_path)?;

    let total_pages = engine.page_count(&pdf_path)?;
    info!(
        "Converting '{}': {} pages at {} DPI → {}",
        pdf_path.display(),
        total_pages,
        config.dpi,
        config.target_dir().display()
    );

    let dir = config.target_dir();
    write::ensure_output_dir(&dir)?;

    progress.on_conversion_start(total_pages);

    let stem = config.pdf_stem();
    let mut bytes_written: u64 = 0;

    for page in 1..=total_pages {
        progress.on_page_start(page, total_pages);

        let image = engine.render_page(&pdf_path, page, config.dpi)?;
        let bytes = encode::encode_image(&image, config.format).map_err(|e| {
            Pdf2PagesError::RasterisationFailed {
                page,
                detail: format!("image encoding failed: {e}"),
            }
        })?;

        let path = dir.join(output::page_file_name(&stem, page, config.format));
        write::write_page(&bytes, &path)?;
        bytes_written += bytes.len() as u64;

        info!("Saved: {}", path.display());
        progress.on_page_saved(page, total_pages, &path, bytes.len());
    }

    let stats = ConversionStats {
        total_pages,
        saved_pages: total_pages,
        bytes_written,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} pages, {} bytes in {}ms",
        stats.saved_pages, stats.bytes_written, stats.duration_ms
    );
    progress.on_conversion_complete(total_pages, stats.saved_pages);

    Ok(stats)
}
