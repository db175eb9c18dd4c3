//! Configuration types for PDF-to-PPTX conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls and diff two runs to understand
//! why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::progress::ProgressCallback;
use crate::pptx::EMU_PER_INCH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target pixel resolution used to derive the per-page render scale.
///
/// Immutable once parsed; both components are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self, ResolutionError> {
        if width == 0 {
            return Err(ResolutionError::Zero(width.to_string()));
        }
        if height == 0 {
            return Err(ResolutionError::Zero(height.to_string()));
        }
        Ok(Self { width, height })
    }
}

impl Default for Resolution {
    /// `1920x1080`, the CLI default.
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    /// Parse `<WIDTH>x<HEIGHT>` — exactly two positive integers separated
    /// by a single `x`. The two rejection classes are kept distinct because
    /// they map to different process exit codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('x').collect();
        if parts.len() != 2 {
            return Err(ResolutionError::Malformed(s.to_string()));
        }

        let mut values = [0u32; 2];
        for (slot, part) in values.iter_mut().zip(&parts) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(ResolutionError::NonNumeric(part.to_string()));
            }
            *slot = part
                .parse()
                .map_err(|_| ResolutionError::NonNumeric(part.to_string()))?;
        }

        Resolution::new(values[0], values[1])
    }
}

/// Why a resolution string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Not exactly two `x`-separated components.
    #[error("expected exactly two values separated by 'x' (e.g. 1920x1080), got '{0}'")]
    Malformed(String),
    /// A component is not a whole number.
    #[error("'{0}' is not a whole number")]
    NonNumeric(String),
    /// A component is zero.
    #[error("resolution values must be greater than zero, got '{0}'")]
    Zero(String),
}

/// Slide canvas size in EMU (English Metric Units, 914 400 per inch).
///
/// Set exactly once when the deck is created and shared, unscaled, by every
/// page's fit computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: i64,
    pub height: i64,
}

impl SlideSize {
    pub fn from_inches(width: f64, height: f64) -> Self {
        Self {
            width: (width * EMU_PER_INCH as f64) as i64,
            height: (height * EMU_PER_INCH as f64) as i64,
        }
    }
}

impl Default for SlideSize {
    /// 20 in × 11.25 in — a 16:9 canvas large enough that a 1920x1080
    /// raster lands on it without upscaling.
    fn default() -> Self {
        Self::from_inches(20.0, 11.25)
    }
}

/// Configuration for a PDF-to-PPTX conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2pptx::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .resolution("2560x1440".parse().unwrap())
///     .build();
/// ```
#[derive(Clone, Default)]
pub struct ConversionConfig {
    /// Target pixel resolution for page rasterisation. Default: 1920x1080.
    ///
    /// Each page is rendered at `min(targetW/pageW, targetH/pageH)` — the
    /// raster fills the target box along its tighter axis, so a higher
    /// resolution gives sharper slides at the cost of a larger file.
    pub resolution: Resolution,

    /// Slide canvas size in EMU. Default: 20 in × 11.25 in.
    pub slide_size: SlideSize,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Optional per-page progress events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("resolution", &self.resolution)
            .field("slide_size", &self.slide_size)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.config.resolution = resolution;
        self
    }

    pub fn slide_size(mut self, size: SlideSize) -> Self {
        self.config.slide_size = size;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration. `Resolution` and `SlideSize` are validated
    /// at construction, so there is nothing left to reject here.
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_resolution() {
        let r: Resolution = "1920x1080".parse().unwrap();
        assert_eq!(r, Resolution::default());
    }

    #[test]
    fn missing_separator_is_malformed() {
        assert_eq!(
            "1920".parse::<Resolution>(),
            Err(ResolutionError::Malformed("1920".into()))
        );
    }

    #[test]
    fn too_many_components_is_malformed() {
        assert!(matches!(
            "1920x1080x60".parse::<Resolution>(),
            Err(ResolutionError::Malformed(_))
        ));
    }

    #[test]
    fn non_numeric_component_is_rejected() {
        assert_eq!(
            "abcx1080".parse::<Resolution>(),
            Err(ResolutionError::NonNumeric("abc".into()))
        );
        assert_eq!(
            "1920x".parse::<Resolution>(),
            Err(ResolutionError::NonNumeric("".into()))
        );
    }

    #[test]
    fn signs_and_decimals_are_non_numeric() {
        // u32::parse would accept a leading '+', but the argument contract
        // is plain digits only.
        assert!(matches!(
            "+1920x1080".parse::<Resolution>(),
            Err(ResolutionError::NonNumeric(_))
        ));
        assert!(matches!(
            "1920.5x1080".parse::<Resolution>(),
            Err(ResolutionError::NonNumeric(_))
        ));
    }

    #[test]
    fn zero_component_is_rejected() {
        assert_eq!(
            "0x1080".parse::<Resolution>(),
            Err(ResolutionError::Zero("0".into()))
        );
    }

    #[test]
    fn resolution_display_round_trips() {
        let r: Resolution = "800x600".parse().unwrap();
        assert_eq!(r.to_string().parse::<Resolution>().unwrap(), r);
    }

    #[test]
    fn default_slide_size_is_20_by_11_25_inches() {
        let s = SlideSize::default();
        assert_eq!(s.width, 18_288_000);
        assert_eq!(s.height, 10_287_000);
    }

    #[test]
    fn builder_sets_fields() {
        let config = ConversionConfig::builder()
            .resolution("640x480".parse().unwrap())
            .password("secret")
            .build();
        assert_eq!(config.resolution.width, 640);
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert!(config.progress_callback.is_none());
    }
}
