//! CLI binary for pdf2pptx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, renders a progress bar, and turns errors into
//! stable process exit codes.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2pptx::{
    convert, inspect, ConversionConfig, ConversionProgressCallback, Pdf2PptxError, ProgressCallback,
    Resolution,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar that counts slides as they land.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically by
    /// `on_conversion_start` (called once the PDF has been opened).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.reset_eta();
    }

    fn on_page_rendered(&self, page_num: usize, _total_pages: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_slide_added(&self, _page_num: usize, _total_pages: usize) {
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, slide_count: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} slides assembled",
            green("✔"),
            bold(&slide_count.to_string())
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (writes document.pptx next to the PDF)
  pdf2pptx document.pdf

  # Choose the output path
  pdf2pptx document.pdf -o slides/deck.pptx

  # Render pages at a higher resolution for sharper slides
  pdf2pptx -r 2560x1440 paper.pdf

  # Encrypted PDF
  pdf2pptx --password hunter2 report.pdf

  # Inspect PDF metadata, no conversion
  pdf2pptx --inspect-only document.pdf

  # Structured JSON result (placements + timings)
  pdf2pptx --json document.pdf

EXIT CODES:
  0  success
  1  input file missing, or the conversion itself failed
  2  malformed --resolution (not WIDTHxHEIGHT)
  3  non-numeric or zero --resolution component
  4  workspace directory could not be created (permission denied)
  5  workspace directory could not be created (other error)

ENVIRONMENT VARIABLES:
  PDFIUM_DYNAMIC_LIB_PATH  Path to the pdfium shared library
  RUST_LOG                 Override the tracing filter (e.g. pdf2pptx=debug)
"#;

/// Convert PDF files to PowerPoint presentations, one slide per page.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2pptx",
    version,
    about = "Convert PDF files to PowerPoint presentations, one slide per page",
    long_about = "Convert a PDF document into a .pptx presentation. Each page is rasterised \
via pdfium at a resolution-derived scale, then scaled down (never up) and centered on its \
own 20in x 11.25in slide.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the source PDF.
    input: PathBuf,

    /// Write the presentation here instead of next to the input.
    #[arg(short, long, env = "PDF2PPTX_OUTPUT")]
    output: Option<PathBuf>,

    /// Target render resolution as WIDTHxHEIGHT.
    #[arg(
        short,
        long,
        env = "PDF2PPTX_RESOLUTION",
        default_value = "1920x1080",
        long_help = "Target pixel resolution for page rasterisation, e.g. 1920x1080.\n\
          Each page is scaled by min(W/pageW, H/pageH), so the raster fills the\n\
          target box along its tighter axis. Higher values give sharper slides\n\
          and larger files."
    )]
    resolution: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2PPTX_PASSWORD")]
    password: Option<String>,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Output structured JSON (ConversionOutput) instead of a summary line.
    #[arg(long, env = "PDF2PPTX_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2PPTX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2PPTX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2PPTX_QUIET")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
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

    if let Err(e) = run(&cli, show_progress) {
        eprintln!("{} {e:#}", red("✘"));
        let code = e
            .downcast_ref::<Pdf2PptxError>()
            .map(Pdf2PptxError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: &Cli, show_progress: bool) -> Result<()> {
    // ── Pre-pipeline validation ──────────────────────────────────────────
    // Both checks happen before anything touches the filesystem so a bad
    // invocation leaves no artifacts and exits with its own code.
    if !cli.input.exists() {
        return Err(Pdf2PptxError::FileNotFound {
            path: cli.input.clone(),
        }
        .into());
    }
    let resolution: Resolution = cli
        .resolution
        .parse()
        .map_err(Pdf2PptxError::InvalidResolution)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input, cli.password.as_deref())?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
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

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder().resolution(resolution);
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build();

    // ── Run conversion ───────────────────────────────────────────────────
    let output = convert(&cli.input, cli.output.as_deref(), &config)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
    } else if !cli.quiet {
        println!(
            "{}  {} slides  {}ms  →  {}",
            green("✔"),
            output.stats.total_pages,
            output.stats.total_duration_ms,
            bold(&output.pptx_path.display().to_string()),
        );
        eprintln!(
            "   {} render  /  {} assemble",
            dim(&format!("{}ms", output.stats.render_duration_ms)),
            dim(&format!("{}ms", output.stats.assemble_duration_ms)),
        );
    }

    Ok(())
}
