//! Interactive configuration resolution, separated from the conversion flow.
//!
//! Input-gathering lives behind the [`Prompter`] trait so the conversion
//! flow never touches a terminal: the binary wires in [`StdinPrompter`],
//! non-interactive runs use [`AcceptDefaults`], and tests script the
//! answers. [`resolve_config`] is the only place the precedence chain
//! lives, from most- to least-specific:
//!
//! 1. command-line override — a field given as a flag is never prompted for
//! 2. interactive answer — prompt rendered as `"<question> [<default>]: "`,
//!    empty input means "use default"
//! 3. persisted default — the previous run's value from the defaults file
//! 4. hard-coded default — `converted_pdfs` / `png` / 300 DPI
//!
//! Validation severity differs per field: a bad PDF path or format token
//! aborts the run; a bad DPI answer only costs a warning and falls back
//! to 300.

use crate::config::{ConversionConfig, ImageFormat, DEFAULT_DPI, DEFAULT_OUTPUT_ROOT};
use crate::defaults::DefaultsStore;
use crate::error::Pdf2PagesError;
use crate::pipeline::input;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Source of interactive answers.
pub trait Prompter {
    /// Ask a free-form question, showing `default`; an empty answer selects
    /// the default.
    fn input(&mut self, question: &str, default: &str) -> Result<String, Pdf2PagesError>;

    /// Ask a yes/no question. Affirmative answers are `y`/`yes`
    /// (case-insensitive); an empty answer selects `default_yes`.
    fn confirm(&mut self, question: &str, default_yes: bool) -> Result<bool, Pdf2PagesError>;
}

/// Terminal prompter reading answers from stdin.
pub struct StdinPrompter;

impl StdinPrompter {
    fn read_answer(&self, rendered: &str) -> Result<String, Pdf2PagesError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(rendered.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| Pdf2PagesError::PromptFailed { source: e })?;

        let mut answer = String::new();
        std::io::stdin()
            .read_line(&mut answer)
            .map_err(|e| Pdf2PagesError::PromptFailed { source: e })?;
        Ok(answer.trim().to_string())
    }
}

impl Prompter for StdinPrompter {
    fn input(&mut self, question: &str, default: &str) -> Result<String, Pdf2PagesError> {
        let answer = self.read_answer(&format!("{question} [{default}]: "))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn confirm(&mut self, question: &str, default_yes: bool) -> Result<bool, Pdf2PagesError> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let answer = self.read_answer(&format!("{question} [{hint}]: "))?;
        if answer.is_empty() {
            Ok(default_yes)
        } else {
            Ok(is_affirmative(&answer))
        }
    }
}

/// Prompter that answers every question with its default. Used for
/// `--no-input` runs and anywhere a terminal is unavailable.
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn input(&mut self, _question: &str, default: &str) -> Result<String, Pdf2PagesError> {
        Ok(default.to_string())
    }

    fn confirm(&mut self, _question: &str, default_yes: bool) -> Result<bool, Pdf2PagesError> {
        Ok(default_yes)
    }
}

/// `y` / `yes`, case-insensitive. Everything else — including `true`,
/// `1`, `ja` — means no.
pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Parse a DPI answer; invalid or non-positive input falls back to
/// [`DEFAULT_DPI`] with a warning instead of failing the run.
pub fn parse_dpi(answer: &str) -> u32 {
    match answer.trim().parse::<u32>() {
        Ok(dpi) if dpi > 0 => dpi,
        _ => {
            warn!(
                "Invalid DPI '{}', falling back to {}",
                answer.trim(),
                DEFAULT_DPI
            );
            DEFAULT_DPI
        }
    }
}

/// Fields pre-answered on the command line. A `Some` here suppresses the
/// corresponding prompt entirely.
#[derive(Debug, Default, Clone)]
pub struct ResolveOverrides {
    pub pdf: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    pub subfolder: Option<String>,
    pub format: Option<String>,
    pub dpi: Option<u32>,
}

/// Produce a complete, validated [`ConversionConfig`] and persist it back
/// to the defaults store.
///
/// # Errors
/// Fatal: missing/unreadable/non-PDF input path, unrecognised format
/// token, defaults-store write failure, prompt I/O failure.
pub fn resolve_config(
    store: &DefaultsStore,
    overrides: &ResolveOverrides,
    prompter: &mut dyn Prompter,
) -> Result<ConversionConfig, Pdf2PagesError> {
    let saved = store.load()?;

    let pdf_answer = match &overrides.pdf {
        Some(path) => path.display().to_string(),
        None => prompter.input(
            "Path to the PDF file",
            saved.pdf_file.as_deref().unwrap_or(""),
        )?,
    };
    let pdf_path = input::resolve_local(&PathBuf::from(pdf_answer))?;

    let output_root = match &overrides.output_root {
        Some(root) => root.clone(),
        None => PathBuf::from(prompter.input(
            "Output directory",
            saved.output_root.as_deref().unwrap_or(DEFAULT_OUTPUT_ROOT),
        )?),
    };

    let stem = crate::config::pdf_stem(&pdf_path);
    let subfolder = match &overrides.subfolder {
        Some(name) => name.clone(),
        None => prompter.input("Subfolder name", &stem)?,
    };

    let format_answer = match &overrides.format {
        Some(token) => token.clone(),
        None => prompter.input(
            "Image format (png/jpeg)",
            saved.image_format.as_deref().unwrap_or("png"),
        )?,
    };
    let format: ImageFormat = format_answer.parse()?;

    let dpi = match overrides.dpi {
        Some(dpi) => dpi,
        None => {
            let default_dpi = saved
                .image_dpi
                .clone()
                .unwrap_or_else(|| DEFAULT_DPI.to_string());
            parse_dpi(&prompter.input("Render DPI", &default_dpi)?)
        }
    };

    let config = ConversionConfig::builder(pdf_path)
        .output_root(output_root)
        .subfolder(subfolder)
        .format(format)
        .dpi(dpi)
        .build()?;

    store.save(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Prompter fed from a queue of canned answers; panics if the flow asks
    /// more questions than the test scripted.
    pub struct ScriptedPrompter {
        answers: VecDeque<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&mut self, question: &str, default: &str) -> Result<String, Pdf2PagesError> {
            let answer = self
                .answers
                .pop_front()
                .unwrap_or_else(|| panic!("unscripted prompt: {question}"));
            if answer.is_empty() {
                Ok(default.to_string())
            } else {
                Ok(answer)
            }
        }

        fn confirm(&mut self, question: &str, default_yes: bool) -> Result<bool, Pdf2PagesError> {
            let answer = self
                .answers
                .pop_front()
                .unwrap_or_else(|| panic!("unscripted confirm: {question}"));
            if answer.is_empty() {
                Ok(default_yes)
            } else {
                Ok(is_affirmative(&answer))
            }
        }
    }

    fn fake_pdf(dir: &std::path::Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"%PDF-1.7\nfake body").unwrap();
        path
    }

    #[test]
    fn parse_dpi_accepts_positive_integers() {
        assert_eq!(parse_dpi("150"), 150);
        assert_eq!(parse_dpi(" 72 "), 72);
    }

    #[test]
    fn parse_dpi_falls_back_on_garbage() {
        assert_eq!(parse_dpi("abc"), DEFAULT_DPI);
        assert_eq!(parse_dpi("-5"), DEFAULT_DPI);
        assert_eq!(parse_dpi("0"), DEFAULT_DPI);
        assert_eq!(parse_dpi(""), DEFAULT_DPI);
        assert_eq!(parse_dpi("3.5"), DEFAULT_DPI);
    }

    #[test]
    fn affirmative_tokens() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("true"));
        assert!(!is_affirmative("yess"));
    }

    #[test]
    fn resolve_prompts_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "report.pdf");
        let store = DefaultsStore::new(dir.path().join("pdf2pages.env"));

        let mut prompter = ScriptedPrompter::new(&[
            &pdf.display().to_string(), // PDF path
            "out",                      // output root
            "",                         // subfolder → default (stem)
            "jpeg",                     // format
            "150",                      // dpi
        ]);
        let config =
            resolve_config(&store, &ResolveOverrides::default(), &mut prompter).unwrap();

        assert_eq!(config.pdf_path, pdf);
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert_eq!(config.subfolder, "report");
        assert_eq!(config.format, ImageFormat::Jpeg);
        assert_eq!(config.dpi, 150);

        let saved = store.load().unwrap();
        assert_eq!(saved.image_format.as_deref(), Some("jpeg"));
        assert_eq!(saved.image_dpi.as_deref(), Some("150"));
    }

    #[test]
    fn resolve_bad_dpi_answer_becomes_300() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "doc.pdf");
        let store = DefaultsStore::new(dir.path().join("pdf2pages.env"));

        for bad in ["abc", "-5"] {
            let mut prompter = ScriptedPrompter::new(&[
                &pdf.display().to_string(),
                "",
                "",
                "",
                bad,
            ]);
            let config =
                resolve_config(&store, &ResolveOverrides::default(), &mut prompter).unwrap();
            assert_eq!(config.dpi, 300, "answer {bad:?} must resolve to 300");
        }
    }

    #[test]
    fn resolve_bad_format_is_fatal_and_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "doc.pdf");
        let store_path = dir.path().join("pdf2pages.env");
        let store = DefaultsStore::new(&store_path);

        let mut prompter =
            ScriptedPrompter::new(&[&pdf.display().to_string(), "", "", "gif"]);
        let err =
            resolve_config(&store, &ResolveOverrides::default(), &mut prompter).unwrap_err();
        assert!(matches!(err, Pdf2PagesError::InvalidImageFormat { .. }));
        assert!(!store_path.exists(), "failed resolution must not persist");
    }

    #[test]
    fn resolve_missing_pdf_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = DefaultsStore::new(dir.path().join("pdf2pages.env"));

        let mut prompter = ScriptedPrompter::new(&["/no/such/file.pdf"]);
        let err =
            resolve_config(&store, &ResolveOverrides::default(), &mut prompter).unwrap_err();
        assert!(matches!(err, Pdf2PagesError::FileNotFound { .. }));
    }

    #[test]
    fn overrides_suppress_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "slides.pdf");
        let store = DefaultsStore::new(dir.path().join("pdf2pages.env"));

        let overrides = ResolveOverrides {
            pdf: Some(pdf.clone()),
            output_root: Some(dir.path().join("out")),
            subfolder: Some("deck".into()),
            format: Some("png".into()),
            dpi: Some(96),
        };
        // No scripted answers: any prompt would panic.
        let mut prompter = ScriptedPrompter::new(&[]);
        let config = resolve_config(&store, &overrides, &mut prompter).unwrap();
        assert_eq!(config.subfolder, "deck");
        assert_eq!(config.dpi, 96);
    }

    #[test]
    fn saved_defaults_feed_prompt_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "doc.pdf");
        let store = DefaultsStore::new(dir.path().join("pdf2pages.env"));

        // First run establishes defaults.
        let mut first = ScriptedPrompter::new(&[&pdf.display().to_string(), "out", "", "jpeg", "200"]);
        resolve_config(&store, &ResolveOverrides::default(), &mut first).unwrap();

        // Second run answers everything with "" — the persisted values win.
        let mut second = ScriptedPrompter::new(&["", "", "", "", ""]);
        let config =
            resolve_config(&store, &ResolveOverrides::default(), &mut second).unwrap();
        assert_eq!(config.pdf_path, pdf);
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert_eq!(config.format, ImageFormat::Jpeg);
        assert_eq!(config.dpi, 200);
    }
}
