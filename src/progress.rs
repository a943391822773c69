//! Progress-callback trait for per-page conversion events.
//!
//! The callback approach is the least-invasive integration point: the
//! binary forwards events to an indicatif progress bar, tests count them
//! with atomics, and library embedders can route them anywhere — without
//! the conversion loop knowing how the host application communicates.
//!
//! The loop is strictly sequential, so events always arrive in page order
//! from a single thread; implementations still need `Send + Sync` so a
//! shared `Arc<dyn ConversionProgressCallback>` can move across threads in
//! host applications.

use std::path::Path;
use std::sync::Arc;

/// Called by the conversion loop as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the page count is known, before any page is rendered.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before a page is rendered.
    ///
    /// `page` is 1-indexed.
    fn on_page_start(&self, page: usize, total_pages: usize) {
        let _ = (page, total_pages);
    }

    /// Called after a page image has been written to disk.
    ///
    /// `path` is the file just written, `bytes` its encoded size.
    fn on_page_saved(&self, page: usize, total_pages: usize, path: &Path, bytes: usize) {
        let _ = (page, total_pages, path, bytes);
    }

    /// Called once after the last page has been written.
    fn on_conversion_complete(&self, total_pages: usize, saved_pages: usize) {
        let _ = (total_pages, saved_pages);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias for a shared callback handle.
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
