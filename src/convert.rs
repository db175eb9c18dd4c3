//! Full-document conversion entry points.
//!
//! [`convert`] owns the pipeline lifecycle: it validates the input, creates
//! the temporary workspace, drives rasterisation and assembly, and
//! guarantees the workspace is removed again whether the run succeeded or
//! failed. The stages themselves live in [`crate::pipeline`].

use crate::config::ConversionConfig;
use crate::error::Pdf2PptxError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata};
use crate::pipeline::workspace::Workspace;
use crate::pipeline::{assemble, input, render};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Default destination for a source PDF: same directory and stem, with the
/// extension swapped for `.pptx`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("pptx")
}

/// Convert a PDF file to a PowerPoint presentation.
///
/// This is the primary entry point for the library. One slide is produced
/// per source page, in page order, with the page's raster scaled and
/// centered on a fixed-size canvas.
///
/// # Arguments
/// * `input`  — Path to the source PDF
/// * `output` — Where to save the .pptx; `None` derives it from `input`
/// * `config` — Conversion configuration
///
/// # Errors
/// Any failure aborts the whole run; there is no partial output. The
/// temporary image workspace is removed in every case.
pub fn convert(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2PptxError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    info!("Starting conversion: {}", input.display());

    // ── Step 1: Validate input ───────────────────────────────────────────
    let pdf_path = input::resolve(input)?;
    let pptx_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(&pdf_path));

    // ── Step 2: Bind pdfium ──────────────────────────────────────────────
    let pdfium = render::bind_pdfium()?;

    // ── Step 3: Create workspace ─────────────────────────────────────────
    // The guard removes the directory on every exit path from here on.
    let workspace = Workspace::create(&pdf_path)?;

    // ── Step 4: Open document and rasterise/assemble ─────────────────────
    let pages = render::RenderedPages::open(&pdfium, &pdf_path, config, &workspace)?;
    let total_pages = pages.total_pages();

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_pages);
    }

    let assembled = assemble::assemble_deck(
        pages,
        config.slide_size,
        &pptx_path,
        total_pages,
        config.progress_callback.as_ref(),
    )?;
    debug!(
        "Rendered in {}ms, assembled in {}ms",
        assembled.render_time.as_millis(),
        assembled.assemble_time.as_millis()
    );

    // ── Step 5: Compute stats ────────────────────────────────────────────
    let stats = ConversionStats {
        total_pages,
        render_duration_ms: assembled.render_time.as_millis() as u64,
        assemble_duration_ms: assembled.assemble_time.as_millis() as u64,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} slides → {} in {}ms",
        total_pages,
        pptx_path.display(),
        stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(assembled.placements.len());
    }

    Ok(ConversionOutput {
        pptx_path,
        slides: assembled.placements,
        stats,
    })
}

/// Extract PDF metadata without converting content.
///
/// Creates no workspace and writes nothing to disk.
pub fn inspect(
    input: impl AsRef<Path>,
    password: Option<&str>,
) -> Result<DocumentMetadata, Pdf2PptxError> {
    let pdf_path = input::resolve(input.as_ref())?;
    let pdfium = render::bind_pdfium()?;
    render::extract_metadata(&pdfium, &pdf_path, password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_swaps_extension() {
        assert_eq!(
            default_output_path(Path::new("/docs/report.pdf")),
            PathBuf::from("/docs/report.pptx")
        );
        assert_eq!(
            default_output_path(Path::new("slides")),
            PathBuf::from("slides.pptx")
        );
    }

    #[test]
    fn convert_rejects_missing_input_before_touching_disk() {
        let err = convert("definitely-missing.pdf", None, &ConversionConfig::default())
            .unwrap_err();
        assert!(matches!(err, Pdf2PptxError::FileNotFound { .. }));
        assert!(!Path::new(".converted").exists());
    }

    #[test]
    fn convert_rejects_non_pdf_input() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("fake.pdf");
        std::fs::write(&path, b"plain text").unwrap();

        let err = convert(&path, None, &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, Pdf2PptxError::NotAPdf { .. }));
        assert!(!tmp.path().join(".converted").exists());
    }
}
