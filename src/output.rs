//! Output types returned by the conversion and inspection entry points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The final placement of one page's image on its slide, in EMU.
///
/// Values are fixed once computed; they are never recomputed after the
/// initial fit. `page` is the 1-indexed source page ordinal, which equals
/// the slide ordinal — ordering is a correctness requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidePlacement {
    pub page: usize,
    pub width: i64,
    pub height: i64,
    pub left: i64,
    pub top: i64,
}

/// Timing and count statistics for one conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the source document (== slides in the deck).
    pub total_pages: usize,
    /// Wall-clock time spent rasterising pages.
    pub render_duration_ms: u64,
    /// Wall-clock time spent building and saving the deck.
    pub assemble_duration_ms: u64,
    /// End-to-end duration including workspace management.
    pub total_duration_ms: u64,
}

/// Everything produced by a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Where the .pptx was saved.
    pub pptx_path: PathBuf,
    /// One entry per slide, in page order.
    pub slides: Vec<SlidePlacement>,
    pub stats: ConversionStats,
}

/// PDF document metadata, extracted without converting content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_serialises_to_json_and_back() {
        let output = ConversionOutput {
            pptx_path: PathBuf::from("deck.pptx"),
            slides: vec![SlidePlacement {
                page: 1,
                width: 18_288_000,
                height: 10_287_000,
                left: 0,
                top: 0,
            }],
            stats: ConversionStats {
                total_pages: 1,
                render_duration_ms: 12,
                assemble_duration_ms: 3,
                total_duration_ms: 17,
            },
        };

        let json = serde_json::to_string(&output).unwrap();
        let back: ConversionOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slides, output.slides);
        assert_eq!(back.stats.total_pages, 1);
    }
}
