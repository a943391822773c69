//! Persisted defaults: the `KEY=value` file remembered between runs.
//!
//! The file holds the last run's answers so the next run can offer them as
//! prompt defaults. It is rewritten completely on every successful
//! configuration resolution — last run wins, no merging, no history. A
//! missing file is not an error; resolution simply starts from the
//! hard-coded defaults.
//!
//! Values are kept as the raw strings the user entered (including the DPI),
//! because their only consumer is the prompt layer, which re-validates
//! every answer on the way in.

use crate::config::ConversionConfig;
use crate::error::Pdf2PagesError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default name of the defaults file, created in the working directory.
pub const DEFAULTS_FILE_NAME: &str = "pdf2pages.env";

pub const KEY_PDF_FILE: &str = "PDF_FILE";
pub const KEY_ROOT_OUTPUT_DIR: &str = "ROOT_OUTPUT_DIR";
pub const KEY_IMAGE_FORMAT: &str = "IMAGE_FORMAT";
pub const KEY_IMAGE_DPI: &str = "IMAGE_DPI";

/// Values loaded from the defaults file. `None` means the key was absent
/// (or the file does not exist yet) and the hard-coded default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedDefaults {
    pub pdf_file: Option<String>,
    pub output_root: Option<String>,
    pub image_format: Option<String>,
    pub image_dpi: Option<String>,
}

/// Handle on the defaults file.
#[derive(Debug, Clone)]
pub struct DefaultsStore {
    path: PathBuf,
}

impl DefaultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location: `pdf2pages.env` in the current
    /// working directory.
    pub fn in_current_dir() -> Self {
        Self::new(DEFAULTS_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved defaults. A missing file yields empty defaults; any other
    /// I/O failure is an error.
    pub fn load(&self) -> Result<SavedDefaults, Pdf2PagesError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No defaults file at {}", self.path.display());
                Ok(SavedDefaults::default())
            }
            Err(e) => Err(Pdf2PagesError::DefaultsStoreFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Persist the resolved configuration, replacing the file's previous
    /// contents entirely.
    pub fn save(&self, config: &ConversionConfig) -> Result<(), Pdf2PagesError> {
        let body = format!(
            "{KEY_PDF_FILE}={}\n{KEY_ROOT_OUTPUT_DIR}={}\n{KEY_IMAGE_FORMAT}={}\n{KEY_IMAGE_DPI}={}\n",
            config.pdf_path.display(),
            config.output_root.display(),
            config.format,
            config.dpi,
        );
        fs::write(&self.path, body).map_err(|e| Pdf2PagesError::DefaultsStoreFailed {
            path: self.path.clone(),
            source: e,
        })?;
        debug!("Saved defaults to {}", self.path.display());
        Ok(())
    }
}

/// Parse `KEY=value` lines. Blank lines, `#` comments, lines without `=`,
/// and unrecognised keys are ignored.
fn parse(content: &str) -> SavedDefaults {
    let mut defaults = SavedDefaults::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            KEY_PDF_FILE => defaults.pdf_file = Some(value.to_string()),
            KEY_ROOT_OUTPUT_DIR => defaults.output_root = Some(value.to_string()),
            KEY_IMAGE_FORMAT => defaults.image_format = Some(value.to_string()),
            KEY_IMAGE_DPI => defaults.image_dpi = Some(value.to_string()),
            other => debug!("Ignoring unknown defaults key '{other}'"),
        }
    }

    defaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionConfig;
    use crate::config::ImageFormat;

    #[test]
    fn missing_file_yields_empty_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = DefaultsStore::new(dir.path().join("pdf2pages.env"));
        assert_eq!(store.load().unwrap(), SavedDefaults::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = DefaultsStore::new(dir.path().join("pdf2pages.env"));

        let config = ConversionConfig::builder("report.pdf")
            .output_root("out")
            .format(ImageFormat::Jpeg)
            .dpi(150)
            .build()
            .unwrap();
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.pdf_file.as_deref(), Some("report.pdf"));
        assert_eq!(loaded.output_root.as_deref(), Some("out"));
        assert_eq!(loaded.image_format.as_deref(), Some("jpeg"));
        assert_eq!(loaded.image_dpi.as_deref(), Some("150"));
    }

    #[test]
    fn save_overwrites_previous_contents_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdf2pages.env");
        std::fs::write(&path, "PDF_FILE=old.pdf\nSTALE_KEY=whatever\n").unwrap();

        let store = DefaultsStore::new(&path);
        let config = ConversionConfig::builder("new.pdf").build().unwrap();
        store.save(&config).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("PDF_FILE=new.pdf"));
        assert!(!content.contains("STALE_KEY"), "stale keys must not survive");
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn parse_tolerates_comments_blanks_and_junk() {
        let content = "\n# last run\nPDF_FILE = my doc.pdf \nnot a kv line\nIMAGE_DPI=300\nUNKNOWN=1\nIMAGE_FORMAT=\n";
        let d = parse(content);
        assert_eq!(d.pdf_file.as_deref(), Some("my doc.pdf"));
        assert_eq!(d.image_dpi.as_deref(), Some("300"));
        assert_eq!(d.image_format, None, "empty values are treated as absent");
        assert_eq!(d.output_root, None);
    }
}
