//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline rasterises each page and places each slide.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal progress bar, a log, or a GUI without
//! the library knowing anything about how the host application
//! communicates. The pipeline is strictly sequential, but the trait is
//! still `Send + Sync` so a callback can be shared freely by the caller.

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events arrive strictly in page order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the document has been opened, before any page is
    /// rendered.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called when a page has been rasterised to a PNG in the workspace.
    ///
    /// `page_num` is 1-indexed.
    fn on_page_rendered(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when the page's slide has been placed in the deck.
    fn on_slide_added(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called once after the deck has been saved.
    fn on_conversion_complete(&self, slide_count: usize) {
        let _ = slide_count;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        rendered: AtomicUsize,
        placed: AtomicUsize,
        started_total: AtomicUsize,
        final_slides: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_conversion_start(&self, total_pages: usize) {
            self.started_total.store(total_pages, Ordering::SeqCst);
        }

        fn on_page_rendered(&self, _page_num: usize, _total_pages: usize) {
            self.rendered.fetch_add(1, Ordering::SeqCst);
        }

        fn on_slide_added(&self, _page_num: usize, _total_pages: usize) {
            self.placed.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, slide_count: usize) {
            self.final_slides.store(slide_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(5);
        cb.on_page_rendered(1, 5);
        cb.on_slide_added(1, 5);
        cb.on_conversion_complete(5);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            rendered: AtomicUsize::new(0),
            placed: AtomicUsize::new(0),
            started_total: AtomicUsize::new(0),
            final_slides: AtomicUsize::new(0),
        };

        tracker.on_conversion_start(3);
        for page in 1..=3 {
            tracker.on_page_rendered(page, 3);
            tracker.on_slide_added(page, 3);
        }
        tracker.on_conversion_complete(3);

        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.rendered.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.placed.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.final_slides.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(10);
        cb.on_page_rendered(1, 10);
    }
}
