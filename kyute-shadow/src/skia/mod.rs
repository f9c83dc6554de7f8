//! Skia backend.
//!
//! Layers are recorded as `sk::Picture`s and composited with `draw_picture`. A canvas is
//! hardware-accelerated when it draws through a GPU recording context, which requires one of the
//! `gl`, `vulkan` or `d3d` features.
use crate::{
    canvas::{LayerContent, ShadowCanvas},
    host::HostClip,
    radii::{CornerRadii, CornerRadius},
    Color,
};
use kurbo::{BezPath, PathEl, Point, Rect, Vec2};
use skia_safe as sk;

/// Types that can be converted to their skia equivalent.
pub trait ToSkia {
    type Target;
    fn to_skia(&self) -> Self::Target;
}

/// Types that can be converted from their skia equivalent.
pub trait FromSkia {
    type Source;
    fn from_skia(value: Self::Source) -> Self;
}

impl ToSkia for Rect {
    type Target = sk::Rect;

    fn to_skia(&self) -> Self::Target {
        sk::Rect {
            left: self.x0 as f32,
            top: self.y0 as f32,
            right: self.x1 as f32,
            bottom: self.y1 as f32,
        }
    }
}

impl FromSkia for Rect {
    type Source = sk::Rect;

    fn from_skia(value: Self::Source) -> Self {
        Rect {
            x0: value.left as f64,
            y0: value.top as f64,
            x1: value.right as f64,
            y1: value.bottom as f64,
        }
    }
}

impl ToSkia for Point {
    type Target = sk::Point;

    fn to_skia(&self) -> Self::Target {
        sk::Point {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

impl ToSkia for Vec2 {
    type Target = sk::Vector;

    fn to_skia(&self) -> Self::Target {
        sk::Vector {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

impl ToSkia for Color {
    type Target = sk::Color4f;

    fn to_skia(&self) -> Self::Target {
        let (r, g, b, a) = self.to_rgba();
        sk::Color4f { r, g, b, a }
    }
}

impl FromSkia for Color {
    type Source = sk::Color4f;

    fn from_skia(value: Self::Source) -> Self {
        Color::new(value.r, value.g, value.b, value.a)
    }
}

impl ToSkia for CornerRadius {
    type Target = sk::Vector;

    fn to_skia(&self) -> Self::Target {
        sk::Vector::new(self.horizontal as sk::scalar, self.vertical as sk::scalar)
    }
}

impl ToSkia for BezPath {
    type Target = sk::Path;

    fn to_skia(&self) -> Self::Target {
        let mut sk_path = sk::Path::new();
        for elem in self.elements() {
            match *elem {
                PathEl::MoveTo(p) => {
                    sk_path.move_to(p.to_skia());
                }
                PathEl::LineTo(p) => {
                    sk_path.line_to(p.to_skia());
                }
                PathEl::QuadTo(a, b) => {
                    sk_path.quad_to(a.to_skia(), b.to_skia());
                }
                PathEl::CurveTo(a, b, c) => {
                    sk_path.cubic_to(a.to_skia(), b.to_skia(), c.to_skia());
                }
                PathEl::ClosePath => {
                    sk_path.close();
                }
            }
        }
        sk_path
    }
}

/// Converts a shape and its corner radii to a skia rounded rectangle.
fn rrect(rect: Rect, radii: &CornerRadii) -> sk::RRect {
    if radii.is_zero() {
        sk::RRect::new_rect(rect.to_skia())
    } else {
        // skia expects the radii clockwise from the upper left corner
        let radii = radii.as_array().map(|r| r.to_skia());
        sk::RRect::new_rect_radii(rect.to_skia(), &radii)
    }
}

impl ShadowCanvas for sk::Canvas {
    type Recording = sk::Picture;

    fn is_hardware_accelerated(&mut self) -> bool {
        #[cfg(any(feature = "gl", feature = "vulkan", feature = "d3d"))]
        {
            self.recording_context().is_some()
        }
        #[cfg(not(any(feature = "gl", feature = "vulkan", feature = "d3d")))]
        {
            false
        }
    }

    fn record_layer(&mut self, content: &LayerContent) -> Option<sk::Picture> {
        let mut paint = sk::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(content.color.to_skia().to_color());
        if content.blur_sigma > 0.0 {
            paint.set_mask_filter(sk::MaskFilter::blur(
                sk::BlurStyle::Normal,
                content.blur_sigma as sk::scalar,
                None,
            ));
        }

        // the picture bounds must contain the blurred edges
        let extent = content.blur_extent();
        let cull_rect = content.rect.inflate(extent, extent);

        let mut recorder = sk::PictureRecorder::new();
        let canvas = recorder.begin_recording(cull_rect.to_skia(), None);
        canvas.draw_rrect(rrect(content.rect, &content.radii), &paint);
        recorder.finish_recording_as_picture(None)
    }

    fn save(&mut self) -> usize {
        sk::Canvas::save(self)
    }

    fn restore_to_count(&mut self, count: usize) {
        sk::Canvas::restore_to_count(self, count);
    }

    fn clip_out(&mut self, clip: &HostClip) {
        match *clip {
            HostClip::Path(path) => {
                self.clip_path(&path.to_skia(), sk::ClipOp::Difference, true);
            }
            HostClip::Rect(rect) => {
                self.clip_rect(rect.to_skia(), sk::ClipOp::Difference, true);
            }
        }
    }

    fn draw_layer(&mut self, recording: &sk::Picture, placement: Rect, alpha: f32) {
        let mut paint = sk::Paint::default();
        paint.set_alpha_f(alpha);
        let matrix = sk::Matrix::translate((placement.x0 as sk::scalar, placement.y0 as sk::scalar));
        self.draw_picture(recording, Some(&matrix), Some(&paint));
    }
}
