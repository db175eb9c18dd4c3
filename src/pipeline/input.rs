//! Input validation: confirm the source path points at a readable PDF.
//!
//! Runs before the workspace is created so that a bad path never leaves
//! artifacts on disk. The checks are ordered from cheapest to most
//! specific: existence, readability, then the `%PDF` magic bytes.

use crate::error::Pdf2PptxError;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate `path` and return it ready for the pipeline.
///
/// Fails with [`Pdf2PptxError::FileNotFound`], [`Pdf2PptxError::PermissionDenied`]
/// or [`Pdf2PptxError::NotAPdf`] without touching anything else on disk.
pub fn resolve(path: &Path) -> Result<PathBuf, Pdf2PptxError> {
    if !path.exists() {
        return Err(Pdf2PptxError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Pdf2PptxError::PermissionDenied {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::NotFound => Pdf2PptxError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Pdf2PptxError::SourceOpenFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        },
    })?;

    let mut magic = [0u8; 4];
    let read = file.read(&mut magic).map_err(|e| Pdf2PptxError::SourceOpenFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    if read < 4 || &magic != b"%PDF" {
        return Err(Pdf2PptxError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }

    debug!("Input resolved: {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = resolve(&tmp.path().join("absent.pdf")).unwrap_err();
        assert!(matches!(err, Pdf2PptxError::FileNotFound { .. }));
    }

    #[test]
    fn wrong_magic_is_not_a_pdf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.pdf");
        std::fs::write(&path, b"hello world").unwrap();

        let err = resolve(&path).unwrap_err();
        match err {
            Pdf2PptxError::NotAPdf { magic, .. } => assert_eq!(&magic, b"hell"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn truncated_file_is_not_a_pdf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tiny.pdf");
        std::fs::write(&path, b"%P").unwrap();
        assert!(matches!(
            resolve(&path).unwrap_err(),
            Pdf2PptxError::NotAPdf { .. }
        ));
    }

    #[test]
    fn pdf_magic_passes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.7\n...").unwrap();

        let resolved = resolve(&path).unwrap();
        assert_eq!(resolved, path);
    }
}
