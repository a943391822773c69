//! CLI binary for pdf2pages.
//!
//! A thin shim over the library crate: clap flags become
//! `ResolveOverrides`, prompts fill in the rest, and an indicatif progress
//! bar renders per-page feedback.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2pages::{
    resolve_config, run, AcceptDefaults, ConversionOutcome, ConversionProgressCallback,
    DefaultsStore, NoopProgressCallback, PdfiumEngine, Prompter, ResolveOverrides, StdinPrompter,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live progress bar plus one `✓` line per
/// saved page image.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set by
    /// `on_conversion_start` once the page count is known.
    fn new() -> Self {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_pages} pages…"))
        ));
    }

    fn on_page_start(&self, page: usize, _total_pages: usize) {
        self.bar.set_message(format!("page {page}"));
    }

    fn on_page_saved(&self, _page: usize, _total_pages: usize, path: &Path, bytes: usize) {
        self.bar.println(format!(
            "  {} Saved: {}  {}",
            green("✓"),
            path.display(),
            dim(&format_bytes(bytes as u64)),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, _total_pages: usize, _saved_pages: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Fully interactive: prompts show the previous run's answers as defaults
  pdf2pages

  # Non-interactive: flags pre-answer the prompts
  pdf2pages report.pdf -o out --subfolder report --format png --dpi 150

  # Reuse the saved defaults without prompting at all
  pdf2pages --no-input

  # Overwrite existing page images without asking
  pdf2pages report.pdf --overwrite

  # Print page count and document metadata, no conversion
  pdf2pages --inspect-only report.pdf
  pdf2pages --inspect-only --json report.pdf

OUTPUT NAMING:
  {output-root}/{subfolder}/{pdf-stem}_p001.{ext} … _pNNN.{ext}
  Page numbers are zero-padded to 3 digits, so a plain directory listing
  is in page order for documents up to 999 pages.

DEFAULTS FILE:
  The last run's PDF path, output root, format, and DPI are saved to
  pdf2pages.env in the working directory (override with --config) and
  offered as prompt defaults on the next run. The file is plain KEY=value
  lines and is rewritten completely after each successful run.

ENVIRONMENT VARIABLES:
  PDF2PAGES_OUTPUT_ROOT   Default for --output-root
  PDF2PAGES_FORMAT        Default for --format
  PDF2PAGES_DPI           Default for --dpi
  PDF2PAGES_CONFIG        Default for --config
  PDFIUM_LIB_PATH         Directory containing the pdfium shared library

SETUP:
  pdf2pages needs the pdfium shared library at runtime. Either install it
  system-wide, place libpdfium.so / libpdfium.dylib / pdfium.dll next to
  the binary, or point PDFIUM_LIB_PATH at its directory.
"#;

/// Convert a PDF document to per-page PNG or JPEG images.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2pages",
    version,
    about = "Convert a PDF document to per-page PNG or JPEG images",
    long_about = "Convert a PDF document into one raster image per page using pdfium.\n\
Values not given as flags are prompted for interactively, with the previous \
run's answers offered as defaults.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file to convert. Prompted for when omitted.
    input: Option<PathBuf>,

    /// Root directory for output; page images land in {root}/{subfolder}/.
    #[arg(short, long, env = "PDF2PAGES_OUTPUT_ROOT")]
    output_root: Option<PathBuf>,

    /// Subfolder name under the output root. Defaults to the PDF's stem.
    #[arg(long)]
    subfolder: Option<String>,

    /// Image format: png, jpeg (alias: jpg).
    #[arg(short, long, env = "PDF2PAGES_FORMAT")]
    format: Option<String>,

    /// Rendering DPI.
    #[arg(long, env = "PDF2PAGES_DPI",
          value_parser = clap::value_parser!(u32).range(1..))]
    dpi: Option<u32>,

    /// Path of the defaults file.
    #[arg(long, env = "PDF2PAGES_CONFIG")]
    config: Option<PathBuf>,

    /// Never prompt; use flags, saved defaults, and built-in defaults.
    #[arg(long)]
    no_input: bool,

    /// Overwrite existing page images without asking.
    #[arg(short = 'y', long)]
    overwrite: bool,

    /// Print page count and document metadata, then exit.
    #[arg(long)]
    inspect_only: bool,

    /// With --inspect-only: print metadata as JSON.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the progress bar is active;
    // the bar prints the per-page lines itself.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let engine = PdfiumEngine::new().context("Failed to initialise the PDF rendering engine")?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let input = cli
            .input
            .clone()
            .context("--inspect-only requires a PDF path")?;
        let meta = engine
            .metadata(&input)
            .context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Resolve configuration ────────────────────────────────────────────
    let store = cli
        .config
        .clone()
        .map(DefaultsStore::new)
        .unwrap_or_else(DefaultsStore::in_current_dir);

    let overrides = ResolveOverrides {
        pdf: cli.input.clone(),
        output_root: cli.output_root.clone(),
        subfolder: cli.subfolder.clone(),
        format: cli.format.clone(),
        dpi: cli.dpi,
    };

    let mut resolve_prompter: Box<dyn Prompter> = if cli.no_input {
        Box::new(AcceptDefaults)
    } else {
        Box::new(StdinPrompter)
    };
    let config = resolve_config(&store, &overrides, resolve_prompter.as_mut())?;

    // ── Run conversion ───────────────────────────────────────────────────
    // The skip question defaults to "no"; --overwrite and --no-input answer
    // it with the default instead of asking.
    let mut run_prompter: Box<dyn Prompter> = if cli.overwrite || cli.no_input {
        Box::new(AcceptDefaults)
    } else {
        Box::new(StdinPrompter)
    };

    let progress: Box<dyn ConversionProgressCallback> = if show_progress {
        Box::new(CliProgressCallback::new())
    } else {
        Box::new(NoopProgressCallback)
    };

    match run(&config, &engine, run_prompter.as_mut(), progress.as_ref())? {
        ConversionOutcome::Skipped { existing } => {
            if !cli.quiet {
                eprintln!(
                    "{} Skipped — {} existing image(s) in '{}' left untouched",
                    cyan("◆"),
                    existing,
                    config.target_dir().display()
                );
            }
        }
        ConversionOutcome::Completed(stats) => {
            if !cli.quiet {
                eprintln!(
                    "{} {} pages  {}  {}ms  →  {}",
                    green("✔"),
                    bold(&stats.saved_pages.to_string()),
                    dim(&format_bytes(stats.bytes_written)),
                    stats.duration_ms,
                    bold(&config.target_dir().display().to_string()),
                );
            }
        }
    }

    Ok(())
}
