//! PDF rasterisation: page counting and single-page rendering via pdfium.
//!
//! ## Why a trait?
//!
//! The conversion loop only ever needs two operations from the rendering
//! engine — "how many pages?" and "give me page N as pixels". Putting them
//! behind [`RenderEngine`] lets the flow and writer be tested against a
//! fake implementation that fabricates images, without pdfium present.
//!
//! ## Why one page per call?
//!
//! `render_page` loads, renders, and releases exactly one page. Peak memory
//! is therefore one page's raster regardless of document size — the whole
//! reason the tool converts page-by-page instead of rendering the document
//! in one go.

use crate::error::Pdf2PagesError;
use crate::output::DocumentMetadata;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// The two operations the conversion flow needs from a PDF renderer.
pub trait RenderEngine {
    /// Total page count for the document at `pdf_path`.
    ///
    /// Must not decode or render page content; this runs once before the
    /// conversion loop and its cost must stay far below a full render.
    fn page_count(&self, pdf_path: &Path) -> Result<usize, Pdf2PagesError>;

    /// Rasterise a single page (1-indexed) at the given DPI.
    ///
    /// `page` outside `[1, page_count]` is a [`Pdf2PagesError::PageOutOfRange`].
    fn render_page(
        &self,
        pdf_path: &Path,
        page: usize,
        dpi: u32,
    ) -> Result<DynamicImage, Pdf2PagesError>;
}

/// Production [`RenderEngine`] backed by the pdfium shared library.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind to a pdfium library.
    ///
    /// Resolution order: the directory named by `PDFIUM_LIB_PATH`, then the
    /// executable's own directory, then the current directory, then the
    /// system library.
    pub fn new() -> Result<Self, Pdf2PagesError> {
        let bindings = bind_pdfium()
            .map_err(|e| Pdf2PagesError::PdfiumBindingFailed(format!("{e:?}")))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn load_document(&self, pdf_path: &Path) -> Result<PdfDocument<'_>, Pdf2PagesError> {
        self.pdfium.load_pdf_from_file(pdf_path, None).map_err(|e| {
            let detail = format!("{e:?}");
            if detail.to_ascii_lowercase().contains("password") {
                Pdf2PagesError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                Pdf2PagesError::CorruptPdf {
                    path: pdf_path.to_path_buf(),
                    detail,
                }
            }
        })
    }

    /// Document properties without rendering any page content.
    ///
    /// Backs the `--inspect-only` mode; not part of [`RenderEngine`]
    /// because the conversion flow never needs it.
    pub fn metadata(&self, pdf_path: &Path) -> Result<DocumentMetadata, Pdf2PagesError> {
        let document = self.load_document(pdf_path)?;
        let metadata = document.metadata();
        let pages = document.pages();

        let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
            metadata.get(tag).and_then(|t| {
                let v = t.value().to_string();
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            })
        };

        Ok(DocumentMetadata {
            title: get_meta(PdfDocumentMetadataTagType::Title),
            author: get_meta(PdfDocumentMetadataTagType::Author),
            subject: get_meta(PdfDocumentMetadataTagType::Subject),
            creator: get_meta(PdfDocumentMetadataTagType::Creator),
            producer: get_meta(PdfDocumentMetadataTagType::Producer),
            page_count: pages.len() as usize,
            pdf_version: format!("{:?}", document.version()),
        })
    }
}

impl RenderEngine for PdfiumEngine {
    fn page_count(&self, pdf_path: &Path) -> Result<usize, Pdf2PagesError> {
        let document = self.load_document(pdf_path)?;
        Ok(document.pages().len() as usize)
    }

    fn render_page(
        &self,
        pdf_path: &Path,
        page: usize,
        dpi: u32,
    ) -> Result<DynamicImage, Pdf2PagesError> {
        let document = self.load_document(pdf_path)?;
        let pages = document.pages();
        let total = pages.len() as usize;

        if page == 0 || page > total {
            return Err(Pdf2PagesError::PageOutOfRange { page, total });
        }

        let pdf_page =
            pages
                .get((page - 1) as u16)
                .map_err(|e| Pdf2PagesError::RasterisationFailed {
                    page,
                    detail: format!("{e:?}"),
                })?;

        // Page geometry is in PDF points (1 pt = 1/72 inch); the requested
        // DPI fixes the pixel size of each dimension.
        let width_px = (pdf_page.width().value * dpi as f32 / 72.0).round() as i32;
        let height_px = (pdf_page.height().value * dpi as f32 / 72.0).round() as i32;

        let render_config = PdfRenderConfig::new()
            .set_target_width(width_px.max(1))
            .set_target_height(height_px.max(1));

        let bitmap =
            pdf_page
                .render_with_config(&render_config)
                .map_err(|e| Pdf2PagesError::RasterisationFailed {
                    page,
                    detail: format!("{e:?}"),
                })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px at {} DPI",
            page,
            image.width(),
            image.height(),
            dpi
        );

        Ok(image)
    }
}

/// Locate and bind a pdfium shared library.
fn bind_pdfium() -> Result<Box<dyn PdfiumLibraryBindings>, PdfiumError> {
    if let Ok(dir) = std::env::var("PDFIUM_LIB_PATH") {
        if !dir.is_empty() {
            return Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir));
        }
    }

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
    {
        if let Ok(bindings) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&exe_dir))
        {
            return Ok(bindings);
        }
    }

    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
}
