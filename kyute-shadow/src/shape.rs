//! Shadow shape derivation.
use crate::radii::{CornerRadii, CornerRadius};
use kurbo::Rect;

/// Geometry of the shadow before blurring, in device pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadowShape {
    /// Host bounds expanded by the spread.
    pub bounds: Rect,
    /// Host corner radii adjusted by the spread.
    pub radii: CornerRadii,
}

/// Adjusts the host corner radii by the spread distance.
///
/// Sharp corners stay sharp after spreading; other corners grow by the spread, on both axes.
/// Negative spreads are not applied.
pub fn adjust_radii(host_radii: &CornerRadii, spread: f64) -> CornerRadii {
    let spread = spread.max(0.0);
    let adjust = |r: f64| if r > 0.0 { r + spread } else { 0.0 };
    host_radii.map(|r| CornerRadius::new(adjust(r.horizontal), adjust(r.vertical)))
}

impl ShadowShape {
    /// Derives the shadow shape from the host box.
    ///
    /// `spread` is in device pixels.
    pub fn compute(host_bounds: Rect, host_radii: &CornerRadii, spread: f64) -> ShadowShape {
        let spread = spread.max(0.0);
        ShadowShape {
            bounds: host_bounds.abs().inflate(spread, spread),
            radii: adjust_radii(host_radii, spread),
        }
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}
