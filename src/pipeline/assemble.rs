//! Deck assembly: consume rasterised page images into a saved .pptx.
//!
//! Driving the image iterator from here keeps rasterisation and placement
//! interleaved: page N is rendered, placed on slide N, and its bitmap freed
//! before page N+1 is touched.

use crate::config::SlideSize;
use crate::error::Pdf2PptxError;
use crate::output::SlidePlacement;
use crate::pptx::SlideDeck;
use crate::progress::ProgressCallback;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Result of a completed assembly, with the time split between the two
/// stages it drove.
#[derive(Debug)]
pub struct AssembledDeck {
    /// Final placements, one per slide, in page order.
    pub placements: Vec<SlidePlacement>,
    /// Time spent inside the image iterator (rasterisation).
    pub render_time: Duration,
    /// Time spent placing slides and saving the package.
    pub assemble_time: Duration,
}

/// Consume `images` in order, place each on its own slide, and save the
/// deck to `dest`.
///
/// The first iterator error aborts assembly. A run that yields zero images
/// fails with [`Pdf2PptxError::EmptyDeck`] before anything is written to
/// `dest`.
pub fn assemble_deck<I>(
    images: I,
    slide_size: SlideSize,
    dest: &Path,
    total_pages: usize,
    progress: Option<&ProgressCallback>,
) -> Result<AssembledDeck, Pdf2PptxError>
where
    I: IntoIterator<Item = Result<PathBuf, Pdf2PptxError>>,
{
    let mut deck = SlideDeck::new(slide_size);
    let mut render_time = Duration::ZERO;
    let mut assemble_time = Duration::ZERO;
    let mut images = images.into_iter();

    loop {
        let started = Instant::now();
        let Some(item) = images.next() else {
            render_time += started.elapsed();
            break;
        };
        render_time += started.elapsed();
        let path = item?;

        let started = Instant::now();
        let placement = deck.add_image_slide(&path)?;
        assemble_time += started.elapsed();

        if let Some(cb) = progress {
            cb.on_page_rendered(placement.page, total_pages);
            cb.on_slide_added(placement.page, total_pages);
        }
    }

    if deck.is_empty() {
        return Err(Pdf2PptxError::EmptyDeck);
    }

    let started = Instant::now();
    deck.save(dest)?;
    assemble_time += started.elapsed();

    info!("Saved {} slides to {}", deck.slide_count(), dest.display());
    Ok(AssembledDeck {
        placements: deck.placements(),
        render_time,
        assemble_time,
    })
}
