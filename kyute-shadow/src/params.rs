use crate::{css, Color, Error};
use std::str::FromStr;

/// Box shadow parameters.
///
/// Lengths are in DIPs.
#[derive(Copy, Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(from = "ShadowParametersConfig")]
pub struct ShadowParameters {
    pub color: Color,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Blur radius, non-negative.
    pub blur_radius: f64,
    /// Spread distance. Negative values don't shrink the shadow.
    pub spread: f64,
}

impl Default for ShadowParameters {
    fn default() -> Self {
        ShadowParameters {
            color: Color::BLACK,
            offset_x: 0.0,
            offset_y: 0.0,
            blur_radius: 0.0,
            spread: 0.0,
        }
    }
}

/// Deserialized form of [`ShadowParameters`], validated through [`ShadowParameters::new`].
#[derive(serde::Deserialize)]
#[serde(default)]
struct ShadowParametersConfig {
    color: Color,
    offset_x: f64,
    offset_y: f64,
    blur_radius: f64,
    spread: f64,
}

impl Default for ShadowParametersConfig {
    fn default() -> Self {
        let ShadowParameters {
            color,
            offset_x,
            offset_y,
            blur_radius,
            spread,
        } = ShadowParameters::default();
        ShadowParametersConfig {
            color,
            offset_x,
            offset_y,
            blur_radius,
            spread,
        }
    }
}

impl From<ShadowParametersConfig> for ShadowParameters {
    fn from(config: ShadowParametersConfig) -> Self {
        ShadowParameters::new(
            config.color,
            config.offset_x,
            config.offset_y,
            config.blur_radius,
            config.spread,
        )
    }
}

impl ShadowParameters {
    pub fn new(color: Color, offset_x: f64, offset_y: f64, blur_radius: f64, spread: f64) -> ShadowParameters {
        ShadowParameters {
            color,
            offset_x,
            offset_y,
            blur_radius: blur_radius.max(0.0),
            spread,
        }
    }

    /// Parses a single outset shadow from a CSS `box-shadow` value, e.g. `2px 4px 8px #0008`.
    pub fn parse(css: &str) -> Result<ShadowParameters, Error> {
        css::parse_box_shadow(css)
    }

    /// Parses every shadow of a comma-separated CSS `box-shadow` value.
    ///
    /// Each shadow is drawn by its own drawable.
    pub fn parse_list(css: &str) -> Result<Vec<ShadowParameters>, Error> {
        css::parse_box_shadow_list(css)
    }
}

impl FromStr for ShadowParameters {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShadowParameters::parse(s)
    }
}
