//! PDF rasterisation: render pages to PNG files in the workspace.
//!
//! Pages are rendered lazily, in order, through the [`RenderedPages`]
//! iterator. Each `next()` call rasterises exactly one page and writes its
//! PNG before returning the path, so at most one page bitmap is held in
//! memory at a time regardless of document size.
//!
//! ## Why a per-page scale factor?
//!
//! Page sizes vary wildly within a single document. Instead of a fixed DPI,
//! each page gets its own uniform scale `min(targetW/pageW, targetH/pageH)`
//! so that every raster fills the target resolution along its tighter axis.
//! Mixed portrait and landscape pages therefore come out equally sharp.

use crate::config::ConversionConfig;
use crate::error::Pdf2PptxError;
use crate::geometry;
use crate::output::DocumentMetadata;
use crate::pipeline::workspace::Workspace;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bind to the pdfium dynamic library.
///
/// Tries a library next to the executable first, then the system-wide one,
/// matching how pdfium is usually deployed alongside CLI tools.
pub fn bind_pdfium() -> Result<Pdfium, Pdf2PptxError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Pdf2PptxError::PdfiumBindingFailed(e.to_string()))?;
    Ok(Pdfium::new(bindings))
}

/// Lazy, forward-only iterator over rasterised page image paths.
///
/// Yields `page_1.png`, `page_2.png`, … in document order. After the first
/// error the iterator is fused: the failed page aborts the run and no
/// further pages are attempted.
pub struct RenderedPages<'a> {
    document: PdfDocument<'a>,
    workspace: &'a Workspace,
    target: (f64, f64),
    total_pages: usize,
    next_ordinal: usize,
    failed: bool,
}

impl<'a> RenderedPages<'a> {
    /// Open `pdf_path` and prepare to render its pages into `workspace`.
    ///
    /// Fails fast on password problems and on documents with zero pages;
    /// no image is written until the first `next()` call.
    pub fn open(
        pdfium: &'a Pdfium,
        pdf_path: &Path,
        config: &'a ConversionConfig,
        workspace: &'a Workspace,
    ) -> Result<Self, Pdf2PptxError> {
        let document = pdfium
            .load_pdf_from_file(pdf_path, config.password.as_deref())
            .map_err(|e| open_error(pdf_path, config.password.is_some(), e))?;

        let total_pages = document.pages().len() as usize;
        if total_pages == 0 {
            return Err(Pdf2PptxError::EmptySource {
                path: pdf_path.to_path_buf(),
            });
        }
        info!("PDF loaded: {} pages", total_pages);

        Ok(Self {
            document,
            workspace,
            target: (
                config.resolution.width as f64,
                config.resolution.height as f64,
            ),
            total_pages,
            next_ordinal: 1,
            failed: false,
        })
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    fn render_one(&self, ordinal: usize) -> Result<PathBuf, Pdf2PptxError> {
        let pages = self.document.pages();
        let page = pages
            .get((ordinal - 1) as u16)
            .map_err(|e| Pdf2PptxError::RasterisationFailed {
                detail: format!("{e:?}"),
            })?;

        let width = page.width().value as f64;
        let height = page.height().value as f64;
        let scale = geometry::scale_to_fill((width, height), self.target)?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(scale as f32);
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| Pdf2PptxError::RasterisationFailed {
                detail: format!("{e:?}"),
            })?;

        let image = bitmap.as_image();
        let path = self.workspace.page_image_path(ordinal);
        image
            .save(&path)
            .map_err(|e| Pdf2PptxError::RasterisationFailed {
                detail: format!("failed to write '{}': {e}", path.display()),
            })?;

        debug!(
            "Rendered page {}/{} ({}x{} pt, scale {:.4}) → {}",
            ordinal,
            self.total_pages,
            width,
            height,
            scale,
            path.display()
        );
        Ok(path)
    }
}

impl Iterator for RenderedPages<'_> {
    type Item = Result<PathBuf, Pdf2PptxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_ordinal > self.total_pages {
            return None;
        }
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        match self.render_one(ordinal) {
            Ok(path) => Some(Ok(path)),
            Err(e) => {
                self.failed = true;
                Some(Err(Pdf2PptxError::PageConversionFailed {
                    page: ordinal,
                    source: Box::new(e),
                }))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.total_pages + 1 - self.next_ordinal;
        (remaining, Some(remaining))
    }
}

fn open_error(path: &Path, had_password: bool, e: PdfiumError) -> Pdf2PptxError {
    let err_str = format!("{e:?}");
    if err_str.contains("Password") || err_str.contains("password") {
        if had_password {
            Pdf2PptxError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            Pdf2PptxError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        Pdf2PptxError::SourceOpenFailed {
            path: path.to_path_buf(),
            detail: err_str,
        }
    }
}

/// Read document metadata without rendering any page.
pub fn extract_metadata(
    pdfium: &Pdfium,
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, Pdf2PptxError> {
    let document = pdfium
        .load_pdf_from_file(pdf_path, password)
        .map_err(|e| open_error(pdf_path, password.is_some(), e))?;

    let metadata = document.metadata();
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
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}
