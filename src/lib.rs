//! # pdf2pptx
//!
//! Convert PDF documents to PowerPoint presentations, one slide per page.
//!
//! ## Why this crate?
//!
//! Presenting a PDF directly is awkward — viewers lack presenter tools, and
//! mixing PDF pages into an existing deck means screenshots. This crate
//! rasterises each page into a PNG via pdfium and places it scaled and
//! centered on its own slide, so any PDF becomes a deck that opens in
//! PowerPoint, Keynote, or LibreOffice Impress with its layout intact.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      validate the path and %PDF magic bytes
//!  ├─ 2. Workspace  create a temporary .converted/ directory for images
//!  ├─ 3. Render     rasterise pages via pdfium, one PNG per page
//!  ├─ 4. Assemble   fit each image onto a 20in x 11.25in slide canvas
//!  └─ 5. Output     saved .pptx + per-slide placements and stats
//! ```
//!
//! The workspace is removed again after every run, successful or not.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2pptx::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert("document.pdf", None, &config)?;
//!     println!("{} slides → {}", output.slides.len(), output.pptx_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2pptx` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdf2pptx = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod output;
pub mod pipeline;
pub mod pptx;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, Resolution, ResolutionError, SlideSize};
pub use convert::{convert, default_output_path, inspect};
pub use error::Pdf2PptxError;
pub use output::{ConversionOutput, ConversionStats, DocumentMetadata, SlidePlacement};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
