//! Snapshot of the element casting the shadow.
use crate::radii::BorderRadii;
use kurbo::{BezPath, Rect};

/// Region painted by the host element, in device pixels.
#[derive(Copy, Clone, Debug)]
pub enum HostClip<'a> {
    /// Exact outline of the host background.
    Path(&'a BezPath),
    /// Bounding rectangle, when the host has no clip path.
    Rect(Rect),
}

/// Read-only view of the host element's background shape, taken for one frame.
///
/// Owned by the background renderer; the shadow only reads it.
#[derive(Copy, Clone, Debug)]
pub struct HostShape<'a> {
    /// Declared border radii, in DIPs.
    pub border_radii: &'a BorderRadii,
    pub clip: HostClip<'a>,
    /// Device pixels per DIP.
    pub scale_factor: f64,
}

impl<'a> HostShape<'a> {
    pub fn new(border_radii: &'a BorderRadii, clip: HostClip<'a>, scale_factor: f64) -> HostShape<'a> {
        HostShape {
            border_radii,
            clip,
            scale_factor,
        }
    }

    /// Host with a clip path.
    pub fn with_path(border_radii: &'a BorderRadii, path: &'a BezPath, scale_factor: f64) -> HostShape<'a> {
        HostShape::new(border_radii, HostClip::Path(path), scale_factor)
    }

    /// Host clipped to its bounding rectangle.
    pub fn with_rect(border_radii: &'a BorderRadii, rect: Rect, scale_factor: f64) -> HostShape<'a> {
        HostShape::new(border_radii, HostClip::Rect(rect), scale_factor)
    }

    /// Converts a DIP length to device pixels.
    pub fn to_px(&self, dips: f64) -> f64 {
        dips * self.scale_factor
    }
}
