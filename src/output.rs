//! Output naming, the pre-existence scan, and result types.
//!
//! The naming scheme is the tool's only durable contract:
//! `{stem}_p{page:03}.{ext}`. Zero-padding to three digits makes a plain
//! directory listing sort in page order for documents up to 999 pages;
//! beyond that the width grows naturally and uniqueness still holds.

use crate::config::ImageFormat;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Filename for one page image: `{stem}_p{page:03}.{ext}`.
pub fn page_file_name(stem: &str, page: usize, format: ImageFormat) -> String {
    format!("{stem}_p{page:03}.{ext}", ext = format.extension())
}

/// Page images already present in `dir` for the given PDF stem and format.
///
/// Matches `{stem}_p*.{ext}` by prefix and extension; a missing directory
/// yields an empty list (nothing has been converted yet). Results are
/// sorted, which by the naming invariant is page order.
pub fn existing_outputs(
    dir: &Path,
    stem: &str,
    format: ImageFormat,
) -> io::Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let prefix = format!("{stem}_p");
    let suffix = format!(".{}", format.extension());

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(&prefix) && name.ends_with(&suffix)
        })
        .map(|entry| entry.path())
        .collect();
    matches.sort();
    Ok(matches)
}

/// Summary of one completed conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionStats {
    /// Pages in the source document.
    pub total_pages: usize,
    /// Page images written (equals `total_pages` on success; the loop
    /// aborts on the first failure).
    pub saved_pages: usize,
    /// Total encoded bytes written to disk.
    pub bytes_written: u64,
    /// Wall-clock duration of the whole run.
    pub duration_ms: u64,
}

/// Document properties reported by `--inspect-only`, read without rendering
/// any page content.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_file_name_zero_pads_to_three_digits() {
        assert_eq!(page_file_name("report", 1, ImageFormat::Png), "report_p001.png");
        assert_eq!(page_file_name("report", 42, ImageFormat::Png), "report_p042.png");
        assert_eq!(page_file_name("report", 999, ImageFormat::Png), "report_p999.png");
        assert_eq!(page_file_name("scan", 7, ImageFormat::Jpeg), "scan_p007.jpg");
    }

    #[test]
    fn page_file_name_grows_past_three_digits() {
        assert_eq!(
            page_file_name("book", 1000, ImageFormat::Png),
            "book_p1000.png"
        );
    }

    #[test]
    fn names_sort_in_page_order() {
        let mut names: Vec<String> = [3, 1, 12, 2]
            .iter()
            .map(|&p| page_file_name("doc", p, ImageFormat::Png))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["doc_p001.png", "doc_p002.png", "doc_p003.png", "doc_p012.png"]
        );
    }

    #[test]
    fn existing_outputs_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found =
            existing_outputs(&dir.path().join("nope"), "report", ImageFormat::Png).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn existing_outputs_matches_stem_and_extension_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "report_p001.png",
            "report_p002.png",
            "report_p001.jpg",  // other format
            "other_p001.png",   // other stem
            "report_notes.txt", // unrelated
        ] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let found = existing_outputs(dir.path(), "report", ImageFormat::Png).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["report_p001.png", "report_p002.png"]);
    }
}
