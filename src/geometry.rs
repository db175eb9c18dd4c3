//! Fit-to-box geometry: uniform scale factors and centered placement.
//!
//! Pure math, no I/O. The same routine underlies two distinct uses with
//! different upper bounds:
//!
//! * [`scale_to_fill`] — choosing a page *rasterisation* scale. May upscale
//!   or downscale freely, because the goal is to hit a target pixel
//!   resolution.
//! * [`fit_within`] — choosing a *slide placement*. Clamped to at most 1:
//!   a rasterised image is never enlarged past its native size when fitted
//!   onto the slide canvas.
//!
//! Both reject non-positive source dimensions, and both reject any scale
//! that comes out non-finite or non-positive (a source dimension that
//! rounds to zero after floating conversion would otherwise produce an
//! infinite ratio downstream).

use crate::error::Pdf2PptxError;

/// A rectangle scaled and centered inside a bounding box.
///
/// All four values are in the same unit as the inputs. Once computed for a
/// slide they are final; placement is never recomputed after the initial fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedRect {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

/// Uniform scale that makes `(src_w, src_h)` fill `(box_w, box_h)` along
/// its tighter axis: `min(box_w/src_w, box_h/src_h)`. No upper clamp.
pub fn scale_to_fill(
    (src_w, src_h): (f64, f64),
    (box_w, box_h): (f64, f64),
) -> Result<f64, Pdf2PptxError> {
    check_positive(src_w, src_h)?;
    let scale = (box_w / src_w).min(box_h / src_h);
    check_scale(scale, src_w, src_h)?;
    Ok(scale)
}

/// Scale `(src_w, src_h)` uniformly to fit inside `(box_w, box_h)` without
/// ever enlarging it (`scale ≤ 1`), and center the result in the box.
pub fn fit_within(
    (src_w, src_h): (f64, f64),
    (box_w, box_h): (f64, f64),
) -> Result<FittedRect, Pdf2PptxError> {
    check_positive(src_w, src_h)?;
    let scale = (box_w / src_w).min(box_h / src_h).min(1.0);
    check_scale(scale, src_w, src_h)?;

    let width = src_w * scale;
    let height = src_h * scale;
    Ok(FittedRect {
        width,
        height,
        left: (box_w - width) / 2.0,
        top: (box_h - height) / 2.0,
    })
}

fn check_positive(width: f64, height: f64) -> Result<(), Pdf2PptxError> {
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(Pdf2PptxError::InvalidDimension { width, height });
    }
    Ok(())
}

fn check_scale(scale: f64, width: f64, height: f64) -> Result<(), Pdf2PptxError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Pdf2PptxError::InvalidDimension { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn fill_scale_can_exceed_one() {
        // Letter page (612x792 pt) into a 1920x1080 target: the height is
        // the tighter axis.
        let scale = scale_to_fill((612.0, 792.0), (1920.0, 1080.0)).unwrap();
        assert!((scale - 1080.0 / 792.0).abs() < TOL);
        assert!(scale > 1.0);
    }

    #[test]
    fn fill_scale_can_shrink() {
        let scale = scale_to_fill((4000.0, 3000.0), (1920.0, 1080.0)).unwrap();
        assert!((scale - 1080.0 / 3000.0).abs() < TOL);
        assert!(scale < 1.0);
    }

    #[test]
    fn fit_never_upscales() {
        let fit = fit_within((100.0, 50.0), (2000.0, 2000.0)).unwrap();
        assert_eq!(fit.width, 100.0);
        assert_eq!(fit.height, 50.0);
    }

    #[test]
    fn fit_stays_within_bounds_and_preserves_aspect() {
        let (src_w, src_h) = (1920.0, 1357.0);
        let (box_w, box_h) = (1000.0, 700.0);
        let fit = fit_within((src_w, src_h), (box_w, box_h)).unwrap();

        assert!(fit.width <= box_w + TOL);
        assert!(fit.height <= box_h + TOL);
        assert!(fit.width > 0.0 && fit.height > 0.0);
        assert!((fit.width / fit.height - src_w / src_h).abs() < 1e-6);
    }

    #[test]
    fn fit_centers_the_image() {
        let fit = fit_within((800.0, 600.0), (1000.0, 1000.0)).unwrap();
        assert!((fit.left + fit.width / 2.0 - 500.0).abs() < TOL);
        assert!((fit.top + fit.height / 2.0 - 500.0).abs() < TOL);
    }

    #[test]
    fn exact_fit_has_zero_offsets() {
        let fit = fit_within((1000.0, 1000.0), (1000.0, 1000.0)).unwrap();
        assert_eq!(fit.left, 0.0);
        assert_eq!(fit.top, 0.0);
        assert_eq!(fit.width, 1000.0);
        assert_eq!(fit.height, 1000.0);
    }

    #[test]
    fn zero_source_dimension_is_rejected() {
        assert!(matches!(
            scale_to_fill((0.0, 792.0), (1920.0, 1080.0)),
            Err(Pdf2PptxError::InvalidDimension { .. })
        ));
        assert!(matches!(
            fit_within((612.0, 0.0), (1920.0, 1080.0)),
            Err(Pdf2PptxError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn negative_source_dimension_is_rejected() {
        assert!(scale_to_fill((-1.0, 10.0), (100.0, 100.0)).is_err());
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(scale_to_fill((f64::NAN, 10.0), (100.0, 100.0)).is_err());
        assert!(scale_to_fill((f64::INFINITY, 10.0), (100.0, 100.0)).is_err());
        // A degenerate box produces a zero scale, which must also fail.
        assert!(scale_to_fill((10.0, 10.0), (0.0, 100.0)).is_err());
    }

    #[test]
    fn sample_scenario_scale() {
        // 612x792 page at 1920x1080: min(1920/612, 1080/792) ≈ 1.3636.
        let scale = scale_to_fill((612.0, 792.0), (1920.0, 1080.0)).unwrap();
        assert!((scale - 1.363_636).abs() < 1e-4);
    }
}
