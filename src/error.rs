//! Error types for the pdf2pptx library.
//!
//! One enum covers every failure the pipeline can produce. Variants fall
//! into three layers with different handling at the CLI boundary:
//!
//! * **Pre-pipeline validation** (bad input path, malformed resolution) —
//!   detected before any file is written; each class maps to its own
//!   process exit code via [`Pdf2PptxError::exit_code`].
//! * **Pipeline failures** (rasterisation, assembly, persistence) — caught
//!   at the orchestrator boundary, logged to stderr, and resolved to a
//!   non-zero exit after the workspace has been cleaned up.
//! * **Cleanup warnings** are deliberately NOT an error variant: a failed
//!   workspace removal is logged via `tracing::warn!` and must never mask
//!   the error that preceded it.

use crate::config::ResolutionError;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2pptx library.
#[derive(Debug, Error)]
pub enum Pdf2PptxError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// The `--resolution` argument could not be parsed.
    #[error("Invalid resolution argument: {0}")]
    InvalidResolution(#[from] ResolutionError),

    // ── Workspace errors ──────────────────────────────────────────────────
    /// Could not create the temporary workspace directory.
    ///
    /// Raised before rasterisation begins; there is nothing to clean up.
    #[error("Failed to create workspace directory '{path}': {source}")]
    WorkspaceCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// pdfium could not open the document (corrupt file, unknown format).
    #[error("Failed to open PDF '{path}': {detail}")]
    SourceOpenFailed { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// The document opened cleanly but contains zero pages.
    #[error("PDF '{path}' is empty (zero pages)")]
    EmptySource { path: PathBuf },

    /// A page or rasterised image has a non-positive or non-finite size.
    #[error("Invalid dimensions: {width}x{height} (must be positive and finite)")]
    InvalidDimension { width: f64, height: f64 },

    /// pdfium failed while loading or rendering one page's content, or the
    /// rasterised bitmap could not be written out.
    #[error("rasterisation failed: {detail}")]
    RasterisationFailed { detail: String },

    /// Any failure while rasterising a specific page. Aborts the whole run;
    /// images already written stay in the workspace for bulk cleanup.
    #[error("Failed to convert page {page}: {source}")]
    PageConversionFailed {
        page: usize,
        #[source]
        source: Box<Pdf2PptxError>,
    },

    // ── Deck errors ───────────────────────────────────────────────────────
    /// An expected rasterised image file is absent at assembly time.
    #[error("Rasterised image missing: '{path}'")]
    ImageMissing { path: PathBuf },

    /// A rasterised image exists but its header could not be decoded.
    #[error("Failed to read image '{path}': {detail}")]
    ImageUnreadable { path: PathBuf, detail: String },

    /// Assembly finished with zero slides in the deck.
    #[error("No slides were produced for the presentation")]
    EmptyDeck,

    /// Writing the final .pptx package failed.
    #[error("Failed to save presentation to '{path}': {detail}")]
    DeckSaveFailed { path: PathBuf, detail: String },

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
         Install libpdfium or set PDFIUM_DYNAMIC_LIB_PATH to its location."
    )]
    PdfiumBindingFailed(String),
}

impl Pdf2PptxError {
    /// Process exit code for this error.
    ///
    /// Pre-pipeline validation classes each get a stable code of their own;
    /// all pipeline failures share the generic failure code `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Pdf2PptxError::FileNotFound { .. } => 1,
            Pdf2PptxError::InvalidResolution(ResolutionError::Malformed(_)) => 2,
            Pdf2PptxError::InvalidResolution(_) => 3,
            Pdf2PptxError::WorkspaceCreateFailed { source, .. } => {
                if source.kind() == std::io::ErrorKind::PermissionDenied {
                    4
                } else {
                    5
                }
            }
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_conversion_display_includes_page_and_cause() {
        let e = Pdf2PptxError::PageConversionFailed {
            page: 3,
            source: Box::new(Pdf2PptxError::InvalidDimension {
                width: 0.0,
                height: 792.0,
            }),
        };
        let msg = e.to_string();
        assert!(msg.contains("page 3"), "got: {msg}");
        assert!(msg.contains("0x792"), "got: {msg}");
    }

    #[test]
    fn exit_code_missing_input() {
        let e = Pdf2PptxError::FileNotFound {
            path: PathBuf::from("missing.pdf"),
        };
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn exit_code_malformed_resolution() {
        let e = Pdf2PptxError::InvalidResolution(ResolutionError::Malformed("1920".into()));
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn exit_code_non_numeric_resolution() {
        let e = Pdf2PptxError::InvalidResolution(ResolutionError::NonNumeric("abc".into()));
        assert_eq!(e.exit_code(), 3);
    }

    #[test]
    fn exit_code_workspace_permission_vs_other() {
        let perm = Pdf2PptxError::WorkspaceCreateFailed {
            path: PathBuf::from("/root/.converted"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(perm.exit_code(), 4);

        let other = Pdf2PptxError::WorkspaceCreateFailed {
            path: PathBuf::from("/nowhere/.converted"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(other.exit_code(), 5);
    }

    #[test]
    fn exit_code_pipeline_failure_is_one() {
        assert_eq!(Pdf2PptxError::EmptyDeck.exit_code(), 1);
        let e = Pdf2PptxError::DeckSaveFailed {
            path: PathBuf::from("out.pptx"),
            detail: "disk full".into(),
        };
        assert_eq!(e.exit_code(), 1);
    }
}
