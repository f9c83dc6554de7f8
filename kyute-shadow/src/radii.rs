//! Corner radii of rounded boxes.
use kurbo::Size;

/// Writing direction of the element, used to resolve logical (start/end) corners.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Radius of an elliptical corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct CornerRadius {
    pub horizontal: f64,
    pub vertical: f64,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius::new(0.0, 0.0);

    pub const fn new(horizontal: f64, vertical: f64) -> CornerRadius {
        CornerRadius { horizontal, vertical }
    }

    /// Circular corner.
    pub const fn circular(radius: f64) -> CornerRadius {
        CornerRadius::new(radius, radius)
    }

    /// Whether the corner is sharp.
    pub fn is_zero(&self) -> bool {
        self.horizontal <= 0.0 || self.vertical <= 0.0
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> CornerRadius {
        CornerRadius::new(self.horizontal * factor, self.vertical * factor)
    }

    fn clamp_non_negative(self) -> CornerRadius {
        CornerRadius::new(self.horizontal.max(0.0), self.vertical.max(0.0))
    }
}

impl From<f64> for CornerRadius {
    fn from(radius: f64) -> Self {
        CornerRadius::circular(radius)
    }
}

/// Resolved radii of the four physical corners, clockwise from the top left.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: CornerRadius,
    pub top_right: CornerRadius,
    pub bottom_right: CornerRadius,
    pub bottom_left: CornerRadius,
}

impl CornerRadii {
    pub const ZERO: CornerRadii = CornerRadii::uniform(CornerRadius::ZERO);

    pub const fn uniform(radius: CornerRadius) -> CornerRadii {
        CornerRadii {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Corners in clockwise order starting from the top left.
    pub const fn as_array(&self) -> [CornerRadius; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    /// Applies `f` to each corner.
    #[must_use]
    pub fn map(self, mut f: impl FnMut(CornerRadius) -> CornerRadius) -> CornerRadii {
        CornerRadii {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_right: f(self.bottom_right),
            bottom_left: f(self.bottom_left),
        }
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> CornerRadii {
        self.map(|r| r.scale(factor))
    }

    pub fn is_zero(&self) -> bool {
        self.as_array().iter().all(CornerRadius::is_zero)
    }

    /// Scales the radii down so that adjacent corners do not overlap on a box of the given size.
    ///
    /// See <https://www.w3.org/TR/css-backgrounds-3/#corner-overlap>.
    #[must_use]
    pub fn fit_to(self, size: Size) -> CornerRadii {
        let ratio = |side: f64, sum: f64| if sum > 0.0 { side / sum } else { f64::INFINITY };
        let f = ratio(size.width, self.top_left.horizontal + self.top_right.horizontal)
            .min(ratio(size.width, self.bottom_left.horizontal + self.bottom_right.horizontal))
            .min(ratio(size.height, self.top_left.vertical + self.bottom_left.vertical))
            .min(ratio(size.height, self.top_right.vertical + self.bottom_right.vertical));
        if f < 1.0 {
            self.scale(f.max(0.0))
        } else {
            self
        }
    }
}

/// Border radii as declared on the host element.
///
/// Logical corners (`*_start`, `*_end`) take precedence over the physical ones once resolved
/// against a layout direction. Missing corners are sharp.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct BorderRadii {
    pub top_left: Option<CornerRadius>,
    pub top_right: Option<CornerRadius>,
    pub bottom_right: Option<CornerRadius>,
    pub bottom_left: Option<CornerRadius>,
    pub top_start: Option<CornerRadius>,
    pub top_end: Option<CornerRadius>,
    pub bottom_start: Option<CornerRadius>,
    pub bottom_end: Option<CornerRadius>,
}

impl BorderRadii {
    /// Same radius on all four corners.
    pub fn uniform(radius: impl Into<CornerRadius>) -> BorderRadii {
        let radius = Some(radius.into());
        BorderRadii {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
            ..Default::default()
        }
    }

    /// Resolves logical corners and clamps the radii to a box of the given size.
    pub fn resolve(&self, direction: LayoutDirection, size: Size) -> CornerRadii {
        let (left_top, right_top, left_bottom, right_bottom) = match direction {
            LayoutDirection::Ltr => (self.top_start, self.top_end, self.bottom_start, self.bottom_end),
            LayoutDirection::Rtl => (self.top_end, self.top_start, self.bottom_end, self.bottom_start),
        };
        let pick = |logical: Option<CornerRadius>, physical: Option<CornerRadius>| {
            logical.or(physical).unwrap_or_default().clamp_non_negative()
        };
        CornerRadii {
            top_left: pick(left_top, self.top_left),
            top_right: pick(right_top, self.top_right),
            bottom_right: pick(right_bottom, self.bottom_right),
            bottom_left: pick(left_bottom, self.bottom_left),
        }
        .fit_to(size)
    }
}
