//! Cached blur layer.
use crate::{
    canvas::{LayerContent, ShadowCanvas},
    filter::ColorFilter,
    radii::{CornerRadii, LayoutDirection},
    shape::ShadowShape,
    Color, Error,
};
use kurbo::{Rect, Vec2};
use tracing::trace;

/// Inputs that the recorded contents of a [`BlurLayer`] depend on.
///
/// The layer is re-recorded whenever the live key differs from the recorded one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerKey {
    pub bounds: Rect,
    pub layout_direction: LayoutDirection,
    pub radii: CornerRadii,
    pub color_filter: Option<ColorFilter>,
    /// Blur standard deviation in device pixels.
    pub blur_sigma: f64,
}

// sigma is exactly half the blur radius:
// https://www.w3.org/TR/css-backgrounds-3/#shadow-blur
// https://html.spec.whatwg.org/C/#when-shadows-are-drawn
fn blur_radius_to_std_dev(radius: f64) -> f64 {
    radius.max(0.0) * 0.5
}

/// Offscreen recording of the flat shadow shape, blurred when composited.
pub struct BlurLayer<R> {
    color: Color,
    blur_sigma: f64,
    alpha: f32,
    placement: Rect,
    key: Option<LayerKey>,
    recording: Option<R>,
    revision: u64,
}

impl<R> BlurLayer<R> {
    /// Creates an empty layer. The blur strength is fixed for the lifetime of the layer.
    pub fn new(blur_radius: f64, color: Color) -> BlurLayer<R> {
        BlurLayer {
            color,
            blur_sigma: blur_radius_to_std_dev(blur_radius),
            alpha: 1.0,
            placement: Rect::ZERO,
            key: None,
            recording: None,
            revision: 0,
        }
    }

    /// Standard deviation of the blur, in DIPs.
    pub fn blur_sigma(&self) -> f64 {
        self.blur_sigma
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Key of the current recording, if any.
    pub fn key(&self) -> Option<&LayerKey> {
        self.key.as_ref()
    }

    pub fn recording(&self) -> Option<&R> {
        self.recording.as_ref()
    }

    /// Number of times the contents have been recorded.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Where the layer was last positioned, in device pixels.
    pub fn placement(&self) -> Rect {
        self.placement
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Sets the compositing alpha, clamped to `0.0..=1.0`.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Records the shape into the layer, unless the current recording was made from the same inputs.
    ///
    /// The shape is in device pixels; the blur is converted to device pixels with `scale_factor`.
    /// Returns whether the layer was re-recorded. If recording fails, the previous contents are
    /// discarded so that they can't be composited with the new inputs.
    pub fn ensure_recorded<C>(
        &mut self,
        canvas: &mut C,
        shape: &ShadowShape,
        layout_direction: LayoutDirection,
        color_filter: Option<ColorFilter>,
        scale_factor: f64,
    ) -> Result<bool, Error>
    where
        C: ShadowCanvas<Recording = R> + ?Sized,
    {
        let key = LayerKey {
            bounds: shape.bounds,
            layout_direction,
            radii: shape.radii,
            color_filter,
            blur_sigma: self.blur_sigma * scale_factor.max(0.0),
        };
        if self.recording.is_some() && self.key.as_ref() == Some(&key) {
            return Ok(false);
        }

        let content = LayerContent {
            rect: Rect::new(0.0, 0.0, shape.width(), shape.height()),
            radii: shape.radii,
            color: self.color,
            blur_sigma: key.blur_sigma,
        };
        match canvas.record_layer(&content) {
            Some(recording) => {
                self.recording = Some(recording);
                self.key = Some(key);
                self.revision += 1;
                trace!(revision = self.revision, bounds = ?key.bounds, "recorded shadow layer");
                Ok(true)
            }
            None => {
                self.recording = None;
                self.key = None;
                Err(Error::LayerRecording {
                    width: content.rect.width(),
                    height: content.rect.height(),
                })
            }
        }
    }

    /// Places the layer at the shadow bounds translated by `offset`, snapped to whole pixels.
    pub fn position(&mut self, shadow_bounds: Rect, offset: Vec2) -> Rect {
        self.placement = (shadow_bounds + offset).round();
        self.placement
    }

    /// Draws the current recording at the current placement.
    pub fn composite<C>(&self, canvas: &mut C)
    where
        C: ShadowCanvas<Recording = R> + ?Sized,
    {
        if let Some(recording) = &self.recording {
            canvas.draw_layer(recording, self.placement, self.alpha);
        }
    }
}
