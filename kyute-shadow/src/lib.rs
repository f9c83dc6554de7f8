//! Outset box-shadow drawable.
//!
//! Renders the CSS "outer box-shadow" of a (possibly rounded) rectangular element into a
//! hardware-accelerated canvas. The flat shadow shape is recorded once into a blur layer and
//! re-recorded only when its inputs change; the layer is then composited behind the element,
//! clipped so that it never covers the element's own interior.
//!
//! # Features
//! * `skia` : implements [`ShadowCanvas`] for `skia_safe::Canvas`
//! * `gl`, `vulkan`, `d3d` : enable the corresponding skia GPU backend; only a canvas backed
//!   by a GPU recording context is considered hardware-accelerated

// internal modules
mod canvas;
mod clip;
mod color;
mod css;
mod drawable;
mod error;
mod filter;
mod host;
mod layer;
mod params;
mod radii;
mod shape;
#[cfg(feature = "skia")]
mod skia;
#[cfg(test)]
mod test_util;

// public exports
pub use canvas::{LayerContent, ShadowCanvas};
pub use clip::ClipScope;
pub use color::{Color, ColorParseError};
pub use drawable::ShadowDrawable;
pub use error::Error;
pub use filter::{BlendMode, ColorFilter, ColorMatrix};
pub use host::{HostClip, HostShape};
pub use layer::{BlurLayer, LayerKey};
pub use params::ShadowParameters;
pub use radii::{BorderRadii, CornerRadii, CornerRadius, LayoutDirection};
pub use shape::{adjust_radii, ShadowShape};
#[cfg(feature = "skia")]
pub use skia::{FromSkia, ToSkia};

// kurbo reexports
pub use kurbo::{self, BezPath, Point, Rect, Size, Vec2};
