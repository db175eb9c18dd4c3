//! Temporary workspace for rasterised page images.
//!
//! The workspace is a `.converted` directory created next to the source PDF
//! before rasterisation starts. Page images are written into it one by one
//! and read back during deck assembly; the whole directory is removed again
//! when the [`Workspace`] guard drops, whether the conversion succeeded or
//! failed. A removal failure is logged as a warning and never surfaces as
//! an error, so it cannot mask whatever outcome the run already has.

use crate::error::Pdf2PptxError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name created next to the source PDF.
const WORKSPACE_DIR_NAME: &str = ".converted";

/// RAII guard for the temporary image directory.
///
/// Dropping the guard removes the directory and everything in it.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Create the workspace directory next to `source`.
    ///
    /// A leftover directory from an interrupted run is reused as-is; its
    /// stale images are overwritten page by page and removed with the rest
    /// on drop.
    pub fn create(source: &Path) -> Result<Self, Pdf2PptxError> {
        let parent = source.parent().filter(|p| !p.as_os_str().is_empty());
        let dir = parent.unwrap_or(Path::new(".")).join(WORKSPACE_DIR_NAME);

        std::fs::create_dir_all(&dir).map_err(|e| Pdf2PptxError::WorkspaceCreateFailed {
            path: dir.clone(),
            source: e,
        })?;
        debug!("Workspace ready at {}", dir.display());

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for the rasterised image of page `ordinal` (1-indexed).
    pub fn page_image_path(&self, ordinal: usize) -> PathBuf {
        self.dir.join(format!("page_{ordinal}.png"))
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to remove workspace '{}': {}. Leftover page images \
                     can be deleted manually.",
                    self.dir.display(),
                    e
                );
            }
        } else {
            debug!("Workspace removed: {}", self.dir.display());
        }
    }
}
