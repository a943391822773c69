//! Configuration types for PDF-to-image conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], an
//! explicit struct threaded through function arguments — never implicit
//! global state. Persistence is a separate, explicit concern: the
//! [`crate::defaults::DefaultsStore`] loads previous values at the start of
//! configuration resolution and saves the final ones at the end, and nothing
//! else touches the file.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on the
//! documented defaults for the rest, with validation collected in one
//! `build()` call.

use crate::error::Pdf2PagesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default output root when neither the defaults file nor the user supplies one.
pub const DEFAULT_OUTPUT_ROOT: &str = "converted_pdfs";

/// Default rendering DPI, also the fallback when the user's DPI answer does
/// not parse as a positive integer.
pub const DEFAULT_DPI: u32 = 300;

/// Raster format for the page images.
///
/// Parsed from user input with [`FromStr`]; `jpg` is accepted as an alias
/// for JPEG. Any other token is a fatal
/// [`Pdf2PagesError::InvalidImageFormat`] — there is no fallback format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Lossless PNG, default encoder settings. (default)
    #[default]
    Png,
    /// JPEG at quality 95.
    Jpeg,
}

impl ImageFormat {
    /// Canonical token, as persisted in the defaults file.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    /// File extension used for output files.
    ///
    /// JPEG files get the conventional `jpg` extension even though the
    /// format token is `jpeg`.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = Pdf2PagesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpeg" | "jpg" => Ok(ImageFormat::Jpeg),
            other => Err(Pdf2PagesError::InvalidImageFormat {
                token: other.to_string(),
            }),
        }
    }
}

/// Configuration for one PDF-to-images run.
///
/// Built via [`ConversionConfig::builder()`], usually by
/// [`crate::prompt::resolve_config`] from persisted defaults and prompt
/// answers, or directly in tests.
///
/// # Example
/// ```rust
/// use pdf2pages::{ConversionConfig, ImageFormat};
///
/// let config = ConversionConfig::builder("report.pdf")
///     .output_root("out")
///     .format(ImageFormat::Png)
///     .dpi(150)
///     .build()
///     .unwrap();
/// assert_eq!(config.subfolder, "report");
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Path to the input PDF.
    pub pdf_path: PathBuf,

    /// Root directory under which the subfolder is created. Default:
    /// `converted_pdfs`.
    pub output_root: PathBuf,

    /// Name of the directory under `output_root` receiving the page images.
    /// Defaults to the PDF's file stem.
    pub subfolder: String,

    /// Raster format for the page images. Default: PNG.
    pub format: ImageFormat,

    /// Rendering DPI. Must be positive. Default: 300.
    ///
    /// 300 DPI reproduces print-quality text; 150 halves the pixel count in
    /// each dimension and is plenty for on-screen reading.
    pub dpi: u32,
}

impl ConversionConfig {
    /// Create a new builder for the given input PDF.
    pub fn builder(pdf_path: impl Into<PathBuf>) -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            pdf_path: pdf_path.into(),
            output_root: None,
            subfolder: None,
            format: ImageFormat::default(),
            dpi: DEFAULT_DPI,
        }
    }

    /// The directory all page images are written to:
    /// `{output_root}/{subfolder}`.
    pub fn target_dir(&self) -> PathBuf {
        self.output_root.join(&self.subfolder)
    }

    /// The PDF's file stem, used in output filenames.
    pub fn pdf_stem(&self) -> String {
        pdf_stem(&self.pdf_path)
    }
}

/// File stem of a PDF path, falling back to `"document"` for degenerate
/// paths with no stem.
pub(crate) fn pdf_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    pdf_path: PathBuf,
    output_root: Option<PathBuf>,
    subfolder: Option<String>,
    format: ImageFormat,
    dpi: u32,
}

impl ConversionConfigBuilder {
    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(root.into());
        self
    }

    pub fn subfolder(mut self, name: impl Into<String>) -> Self {
        self.subfolder = Some(name.into());
        self
    }

    pub fn format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2PagesError> {
        if self.pdf_path.as_os_str().is_empty() {
            return Err(Pdf2PagesError::InvalidConfig(
                "PDF path must not be empty".into(),
            ));
        }
        if self.dpi == 0 {
            return Err(Pdf2PagesError::InvalidConfig(
                "DPI must be a positive integer".into(),
            ));
        }

        let subfolder = match self.subfolder {
            Some(s) if !s.trim().is_empty() => s,
            _ => pdf_stem(&self.pdf_path),
        };

        Ok(ConversionConfig {
            subfolder,
            output_root: self
                .output_root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT)),
            pdf_path: self.pdf_path,
            format: self.format,
            dpi: self.dpi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_accepted_tokens() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("jpeg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("jpg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("  PNG ".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("JPeg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn format_rejects_unknown_tokens() {
        for token in ["gif", "bmp", "webp", "", "pngg"] {
            let err = token.parse::<ImageFormat>().unwrap_err();
            assert!(
                matches!(err, Pdf2PagesError::InvalidImageFormat { .. }),
                "token {token:?} should be rejected"
            );
        }
    }

    #[test]
    fn jpeg_uses_jpg_extension() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Jpeg.as_str(), "jpeg");
        assert_eq!(ImageFormat::Png.extension(), "png");
    }

    #[test]
    fn builder_defaults() {
        let config = ConversionConfig::builder("docs/report.pdf").build().unwrap();
        assert_eq!(config.output_root, PathBuf::from(DEFAULT_OUTPUT_ROOT));
        assert_eq!(config.subfolder, "report");
        assert_eq!(config.format, ImageFormat::Png);
        assert_eq!(config.dpi, DEFAULT_DPI);
        assert_eq!(config.target_dir(), PathBuf::from("converted_pdfs/report"));
    }

    #[test]
    fn builder_rejects_zero_dpi() {
        let err = ConversionConfig::builder("a.pdf").dpi(0).build().unwrap_err();
        assert!(matches!(err, Pdf2PagesError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_empty_path() {
        let err = ConversionConfig::builder("").build().unwrap_err();
        assert!(matches!(err, Pdf2PagesError::InvalidConfig(_)));
    }

    #[test]
    fn blank_subfolder_falls_back_to_stem() {
        let config = ConversionConfig::builder("report.pdf")
            .subfolder("  ")
            .build()
            .unwrap();
        assert_eq!(config.subfolder, "report");
    }
}
