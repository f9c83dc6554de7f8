//! Color filters assigned to the drawable.
//!
//! Box shadows are not tinted by a color filter applied to the shadow itself: the filter is only
//! tracked so that the shadow layer is re-recorded whenever it changes.
use crate::Color;

/// Describes a blending mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    Clear,
    Src,
    Dst,
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcATop,
    DstATop,
    Xor,
    Plus,
    Modulate,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// 4x5 row-major color matrix, applied to unpremultiplied RGBA.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);
}

impl Default for ColorMatrix {
    fn default() -> Self {
        ColorMatrix::IDENTITY
    }
}

/// A color filter, compared by value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColorFilter {
    /// Blends a constant color with the source.
    Blend { color: Color, mode: BlendMode },
    /// Transforms colors with a matrix.
    Matrix(ColorMatrix),
}

impl ColorFilter {
    pub fn blend(color: Color, mode: BlendMode) -> ColorFilter {
        ColorFilter::Blend { color, mode }
    }
}
