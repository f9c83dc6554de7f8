use crate::{host::HostClip, radii::CornerRadii, Color};
use kurbo::Rect;

/// Contents of a shadow layer, in layer-local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerContent {
    /// Shape rectangle; its origin is always at (0,0).
    pub rect: Rect,
    pub radii: CornerRadii,
    pub color: Color,
    /// Standard deviation of the gaussian blur applied to the layer.
    pub blur_sigma: f64,
}

impl LayerContent {
    /// Distance over which the blur visibly extends past the shape.
    pub fn blur_extent(&self) -> f64 {
        3.0 * self.blur_sigma
    }
}

/// Destination of a shadow, and the capabilities it offers.
///
/// The recordings produced by a canvas are opaque and may be composited again on later frames,
/// on a different canvas of the same kind.
pub trait ShadowCanvas {
    /// Recorded layer contents.
    type Recording;

    /// Whether the canvas draws into a GPU-backed surface.
    ///
    /// Shadows are only drawn on hardware-accelerated canvases.
    fn is_hardware_accelerated(&mut self) -> bool;

    /// Records the blurred, flat-colored shadow shape.
    fn record_layer(&mut self, content: &LayerContent) -> Option<Self::Recording>;

    /// Saves the clip state and returns the save count to restore to.
    fn save(&mut self) -> usize;

    /// Restores the clip state saved by the call to `save` that returned `count`.
    fn restore_to_count(&mut self, count: usize);

    /// Removes the given region from the drawable area.
    fn clip_out(&mut self, clip: &HostClip);

    /// Draws a recorded layer, translated so that its origin lands on `placement`.
    fn draw_layer(&mut self, recording: &Self::Recording, placement: Rect, alpha: f32);
}
