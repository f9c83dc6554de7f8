//! Outset box shadow drawable.
use crate::{
    canvas::ShadowCanvas,
    clip::ClipScope,
    filter::ColorFilter,
    host::HostShape,
    layer::BlurLayer,
    radii::{CornerRadii, LayoutDirection},
    shape::ShadowShape,
    Error, ShadowParameters,
};
use kurbo::{Rect, Vec2};
use tracing::{trace, trace_span, warn};

/// Inputs of the last shape derivation.
#[derive(Copy, Clone, Debug, PartialEq)]
struct ShapeInputs {
    bounds: Rect,
    radii: CornerRadii,
    spread: f64,
}

/// Draws the outset box shadow of an element, behind it.
///
/// The shadow parameters are fixed at construction. Bounds, layout direction, color filter and
/// alpha can change between frames and are picked up by the next call to [`draw`](Self::draw).
/// The shadow is only drawn on hardware-accelerated canvases; on other canvases the frame is
/// skipped with a warning.
///
/// `R` is the layer recording type of the canvases this drawable draws into.
pub struct ShadowDrawable<R> {
    params: ShadowParameters,
    bounds: Rect,
    layout_direction: LayoutDirection,
    color_filter: Option<ColorFilter>,
    shape: Option<(ShapeInputs, ShadowShape)>,
    layer: BlurLayer<R>,
}

impl<R> ShadowDrawable<R> {
    pub fn new(params: ShadowParameters) -> ShadowDrawable<R> {
        ShadowDrawable {
            params,
            bounds: Rect::ZERO,
            layout_direction: LayoutDirection::default(),
            color_filter: None,
            shape: None,
            layer: BlurLayer::new(params.blur_radius, params.color),
        }
    }

    pub fn parameters(&self) -> &ShadowParameters {
        &self.params
    }

    /// Bounds of the host element, in device pixels.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction
    }

    pub fn set_layout_direction(&mut self, layout_direction: LayoutDirection) {
        self.layout_direction = layout_direction;
    }

    pub fn color_filter(&self) -> Option<&ColorFilter> {
        self.color_filter.as_ref()
    }

    /// Sets the color filter.
    ///
    /// The filter does not tint the shadow; changing it only causes the shadow layer to be
    /// recorded again.
    pub fn set_color_filter(&mut self, color_filter: Option<ColorFilter>) {
        self.color_filter = color_filter;
    }

    /// Sets the compositing alpha of the shadow (0-255).
    pub fn set_alpha(&mut self, alpha: u8) {
        self.layer.set_alpha(alpha as f32 / 255.0);
    }

    /// Returns the compositing alpha of the shadow (0-255).
    pub fn opacity(&self) -> u8 {
        (self.layer.alpha() * 255.0).round() as u8
    }

    /// Blur strength (gaussian standard deviation) of the shadow, in DIPs.
    pub fn blur_strength(&self) -> f64 {
        self.layer.blur_sigma()
    }

    /// Shape derived on the last drawn frame.
    pub fn shadow_shape(&self) -> Option<&ShadowShape> {
        self.shape.as_ref().map(|(_, shape)| shape)
    }

    pub fn layer(&self) -> &BlurLayer<R> {
        &self.layer
    }

    /// Draws the shadow of `host` into `canvas`.
    ///
    /// Never fails: problems are logged and the shadow is skipped for this frame.
    pub fn draw<C>(&mut self, canvas: &mut C, host: &HostShape)
    where
        C: ShadowCanvas<Recording = R> + ?Sized,
    {
        let _span = trace_span!("box shadow").entered();
        if let Err(err) = self.try_draw(canvas, host) {
            warn!("{err}");
        }
    }

    fn try_draw<C>(&mut self, canvas: &mut C, host: &HostShape) -> Result<(), Error>
    where
        C: ShadowCanvas<Recording = R> + ?Sized,
    {
        if !canvas.is_hardware_accelerated() {
            return Err(Error::NotHardwareAccelerated);
        }

        let spread = host.to_px(self.params.spread).max(0.0);
        let shape = self.update_shape(host, spread);
        self.layer
            .ensure_recorded(canvas, &shape, self.layout_direction, self.color_filter, host.scale_factor)?;

        let offset = Vec2::new(host.to_px(self.params.offset_x), host.to_px(self.params.offset_y));
        self.layer.position(shape.bounds, offset);

        let mut scope = ClipScope::new(canvas, &host.clip);
        self.layer.composite(&mut *scope);
        Ok(())
    }

    /// Returns the shadow shape, deriving it again if its inputs changed.
    fn update_shape(&mut self, host: &HostShape, spread: f64) -> ShadowShape {
        let dip_size = if host.scale_factor > 0.0 {
            self.bounds.size() / host.scale_factor
        } else {
            self.bounds.size()
        };
        let radii = host
            .border_radii
            .resolve(self.layout_direction, dip_size)
            .scale(host.scale_factor);
        let inputs = ShapeInputs {
            bounds: self.bounds,
            radii,
            spread,
        };

        match self.shape {
            Some((last, shape)) if last == inputs => shape,
            _ => {
                let shape = ShadowShape::compute(inputs.bounds, &inputs.radii, inputs.spread);
                trace!(?shape, "derived shadow shape");
                self.shape = Some((inputs, shape));
                shape
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShadowDrawable;
    use crate::{
        canvas::LayerContent,
        radii::{BorderRadii, CornerRadii, CornerRadius, LayoutDirection},
        test_util::{count_warnings, ClipKind, MockCanvas, MockRecording, Op},
        BlendMode, Color, ColorFilter, HostShape, ShadowParameters,
    };
    use kurbo::{BezPath, Rect, Shape};

    fn drawable(blur_radius: f64, spread: f64) -> ShadowDrawable<MockRecording> {
        ShadowDrawable::new(ShadowParameters::new(Color::BLACK, 0.0, 0.0, blur_radius, spread))
    }

    const HOST: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn test_sharp_box_without_spread() {
        let mut canvas = MockCanvas::hardware();
        let mut shadow = drawable(20.0, 0.0);
        shadow.set_bounds(HOST);
        let radii = BorderRadii::default();
        shadow.draw(&mut canvas, &HostShape::with_rect(&radii, HOST, 1.0));

        assert_eq!(shadow.shadow_shape().unwrap().bounds, HOST);
        assert_eq!(shadow.blur_strength(), 10.0);
        assert_eq!(
            canvas.ops,
            vec![
                Op::Record(LayerContent {
                    rect: Rect::new(0.0, 0.0, 100.0, 100.0),
                    radii: CornerRadii::ZERO,
                    color: Color::BLACK,
                    blur_sigma: 10.0,
                }),
                Op::Save(0),
                Op::ClipOut(ClipKind::Rect(HOST)),
                Op::DrawLayer {
                    recording: 1,
                    placement: HOST,
                    alpha: 1.0,
                },
                Op::RestoreToCount(0),
            ]
        );
    }

    #[test]
    fn test_rounded_box_with_spread() {
        let mut canvas = MockCanvas::hardware();
        let mut shadow = drawable(0.0, 5.0);
        shadow.set_bounds(HOST);
        let radii = BorderRadii::uniform(10.0);
        let clip: BezPath = HOST.to_rounded_rect(10.0).to_path(0.1);
        shadow.draw(&mut canvas, &HostShape::with_path(&radii, &clip, 1.0));

        let shape = shadow.shadow_shape().unwrap();
        assert_eq!(shape.bounds, Rect::new(-5.0, -5.0, 105.0, 105.0));
        assert_eq!(shape.radii, CornerRadii::uniform(CornerRadius::circular(15.0)));
        assert_eq!(canvas.ops[2], Op::ClipOut(ClipKind::Path));
        assert_eq!(shadow.layer().placement(), Rect::new(-5.0, -5.0, 105.0, 105.0));
    }

    #[test]
    fn test_software_canvas_is_skipped() {
        let mut canvas = MockCanvas::software();
        let mut shadow = drawable(20.0, 0.0);
        shadow.set_bounds(HOST);
        let radii = BorderRadii::default();

        let ((), warnings) = count_warnings(|| shadow.draw(&mut canvas, &HostShape::with_rect(&radii, HOST, 1.0)));
        assert_eq!(warnings, 1);
        assert!(canvas.ops.is_empty());
        assert_eq!(shadow.layer().revision(), 0);

        // capability is checked again on the next frame
        canvas.hardware_accelerated = true;
        let ((), warnings) = count_warnings(|| shadow.draw(&mut canvas, &HostShape::with_rect(&radii, HOST, 1.0)));
        assert_eq!(warnings, 0);
        assert_eq!(canvas.recordings(), 1);
    }

    #[test]
    fn test_second_draw_reuses_layer() {
        let mut canvas = MockCanvas::hardware();
        let mut shadow = drawable(6.0, 2.0);
        shadow.set_bounds(HOST);
        let radii = BorderRadii::uniform(4.0);
        let host = HostShape::with_rect(&radii, HOST, 1.0);

        shadow.draw(&mut canvas, &host);
        let first = canvas.paint_ops().into_iter().cloned().collect::<Vec<_>>();
        canvas.ops.clear();
        shadow.draw(&mut canvas, &host);

        assert_eq!(canvas.recordings(), 0);
        assert_eq!(canvas.ops, first);
        assert_eq!(shadow.layer().revision(), 1);
        assert_eq!(canvas.save_depth, 0);
    }

    #[test]
    fn test_position_updates_without_rerecording() {
        let mut canvas = MockCanvas::hardware();
        let mut shadow = ShadowDrawable::new(ShadowParameters::new(Color::BLACK, 3.0, 4.0, 2.0, 0.0));
        let radii = BorderRadii::default();

        shadow.set_bounds(Rect::new(0.0, 0.0, 10.0, 10.0));
        shadow.draw(&mut canvas, &HostShape::with_rect(&radii, Rect::new(0.0, 0.0, 10.0, 10.0), 1.0));
        assert_eq!(shadow.layer().placement(), Rect::new(3.0, 4.0, 13.0, 14.0));

        // the shadow bounds are part of the layer key
        shadow.set_bounds(Rect::new(20.0, 0.0, 30.0, 10.0));
        shadow.draw(&mut canvas, &HostShape::with_rect(&radii, Rect::new(20.0, 0.0, 30.0, 10.0), 1.0));
        assert_eq!(shadow.layer().placement(), Rect::new(23.0, 4.0, 33.0, 14.0));
        assert_eq!(canvas.recordings(), 2);

        // the scale factor scales the offset, and the blur with it
        let before = shadow.layer().revision();
        shadow.draw(&mut canvas, &HostShape::with_rect(&radii, Rect::new(20.0, 0.0, 30.0, 10.0), 2.0));
        assert_eq!(shadow.layer().placement(), Rect::new(26.0, 8.0, 36.0, 18.0));
        assert_eq!(shadow.layer().revision(), before + 1);
    }

    #[test]
    fn test_rerecords_on_direction_and_filter_change() {
        let mut canvas = MockCanvas::hardware();
        let mut shadow = drawable(4.0, 0.0);
        shadow.set_bounds(HOST);
        let radii = BorderRadii::default();
        let host = HostShape::with_rect(&radii, HOST, 1.0);

        shadow.draw(&mut canvas, &host);
        shadow.set_layout_direction(LayoutDirection::Rtl);
        shadow.draw(&mut canvas, &host);
        shadow.set_color_filter(Some(ColorFilter::blend(Color::BLACK, BlendMode::Multiply)));
        shadow.draw(&mut canvas, &host);
        shadow.set_color_filter(Some(ColorFilter::blend(Color::BLACK, BlendMode::Multiply)));
        shadow.draw(&mut canvas, &host);
        assert_eq!(canvas.recordings(), 3);

        // the filter never tints the shadow
        let colors: Vec<Color> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Record(content) => Some(content.color),
                _ => None,
            })
            .collect();
        assert!(colors.iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn test_logical_radii_follow_layout_direction() {
        let mut canvas = MockCanvas::hardware();
        let mut shadow = drawable(0.0, 1.0);
        shadow.set_bounds(HOST);
        let radii = BorderRadii {
            top_start: Some(CornerRadius::circular(6.0)),
            ..Default::default()
        };
        let host = HostShape::with_rect(&radii, HOST, 1.0);

        shadow.draw(&mut canvas, &host);
        assert_eq!(shadow.shadow_shape().unwrap().radii.top_left, CornerRadius::circular(7.0));

        shadow.set_layout_direction(LayoutDirection::Rtl);
        shadow.draw(&mut canvas, &host);
        let shape = shadow.shadow_shape().unwrap();
        assert_eq!(shape.radii.top_left, CornerRadius::ZERO);
        assert_eq!(shape.radii.top_right, CornerRadius::circular(7.0));
    }

    #[test]
    fn test_spread_and_radii_scale_with_device() {
        let mut canvas = MockCanvas::hardware();
        let mut shadow = drawable(0.0, 2.0);
        shadow.set_bounds(Rect::new(0.0, 0.0, 200.0, 200.0));
        let radii = BorderRadii::uniform(5.0);
        shadow.draw(&mut canvas, &HostShape::with_rect(&radii, Rect::new(0.0, 0.0, 200.0, 200.0), 2.0));

        let shape = shadow.shadow_shape().unwrap();
        assert_eq!(shape.bounds, Rect::new(-4.0, -4.0, 204.0, 204.0));
        assert_eq!(shape.radii, CornerRadii::uniform(CornerRadius::circular(14.0)));
    }

    #[test]
    fn test_blur_scales_with_device() {
        let mut canvas = MockCanvas::hardware();
        let mut shadow = drawable(20.0, 5.0);
        let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
        shadow.set_bounds(bounds);
        let radii = BorderRadii::default();
        shadow.draw(&mut canvas, &HostShape::with_rect(&radii, bounds, 2.0));

        assert_eq!(shadow.blur_strength(), 10.0);
        assert_eq!(
            canvas.ops[0],
            Op::Record(LayerContent {
                rect: Rect::new(0.0, 0.0, 220.0, 220.0),
                radii: CornerRadii::ZERO,
                color: Color::BLACK,
                blur_sigma: 20.0,
            })
        );
    }

    #[test]
    fn test_alpha_round_trip() {
        let mut shadow = drawable(0.0, 0.0);
        assert_eq!(shadow.opacity(), 255);
        for alpha in [0u8, 1, 64, 127, 128, 200, 254, 255] {
            shadow.set_alpha(alpha);
            assert!((shadow.opacity() as i32 - alpha as i32).abs() <= 1);
        }

        let mut canvas = MockCanvas::hardware();
        shadow.set_bounds(HOST);
        shadow.set_alpha(51);
        let radii = BorderRadii::default();
        shadow.draw(&mut canvas, &HostShape::with_rect(&radii, HOST, 1.0));
        let alpha = canvas
            .ops
            .iter()
            .find_map(|op| match op {
                Op::DrawLayer { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .unwrap();
        approx::assert_relative_eq!(alpha, 0.2);
    }

    #[test]
    fn test_recording_failure_skips_frame() {
        let mut canvas = MockCanvas::hardware();
        canvas.fail_recording = true;
        let mut shadow = drawable(4.0, 0.0);
        shadow.set_bounds(HOST);
        let radii = BorderRadii::default();

        let ((), warnings) = count_warnings(|| shadow.draw(&mut canvas, &HostShape::with_rect(&radii, HOST, 1.0)));
        assert_eq!(warnings, 1);
        assert!(canvas.paint_ops().is_empty());

        // recovers on the next frame
        canvas.fail_recording = false;
        shadow.draw(&mut canvas, &HostShape::with_rect(&radii, HOST, 1.0));
        assert_eq!(shadow.layer().revision(), 1);
        assert_eq!(canvas.save_depth, 0);
    }
}
