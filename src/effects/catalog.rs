use crate::effects::{pixel::PixelTransform, style::StyleOp};

/// How a filter reaches the pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Render-time adjustment stack; the stored pixels are untouched.
    Style,
    /// One-shot destructive rewrite of the decoded surface.
    PixelTransform,
}

/// The eight filters a popup can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterName {
    Blur,
    Dot,
    Dreamcore,
    Contrast,
    Saturate,
    Neon,
    Psychedelic,
    ThresholdZero,
}

impl FilterName {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterName::Blur => "blur",
            FilterName::Dot => "dot",
            FilterName::Dreamcore => "dreamcore",
            FilterName::Contrast => "contrast",
            FilterName::Saturate => "saturate",
            FilterName::Neon => "neon",
            FilterName::Psychedelic => "psychedelic",
            FilterName::ThresholdZero => "threshold-zero",
        }
    }
}

impl std::fmt::Display for FilterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FilterSpec {
    pub name: FilterName,
    pub kind: FilterKind,
}

impl FilterSpec {
    const fn style(name: FilterName) -> Self {
        Self {
            name,
            kind: FilterKind::Style,
        }
    }

    const fn pixel(name: FilterName) -> Self {
        Self {
            name,
            kind: FilterKind::PixelTransform,
        }
    }

    /// Adjustments applied at render time. Empty for pixel transforms.
    pub fn style_stack(&self) -> Vec<StyleOp> {
        match self.name {
            FilterName::Blur => vec![StyleOp::Blur { radius_px: 6.0 }],
            FilterName::Dreamcore => vec![
                StyleOp::HueRotate { degrees: 180.0 },
                StyleOp::Saturate(2.0),
                StyleOp::Contrast(1.5),
                StyleOp::Brightness(1.2),
            ],
            FilterName::Contrast => vec![StyleOp::Contrast(1.5), StyleOp::Brightness(1.5)],
            FilterName::Saturate => vec![StyleOp::Saturate(2.0)],
            FilterName::Neon => vec![
                StyleOp::Brightness(1.5),
                StyleOp::Contrast(2.0),
                StyleOp::Saturate(3.0),
                StyleOp::Glow {
                    radius_px: 10.0,
                    rgb: [0x00, 0xff, 0xff],
                },
                StyleOp::Glow {
                    radius_px: 20.0,
                    rgb: [0xff, 0x00, 0xff],
                },
            ],
            FilterName::Psychedelic => vec![
                StyleOp::HueRotate { degrees: 90.0 },
                StyleOp::Saturate(3.0),
                StyleOp::Contrast(1.5),
                StyleOp::Brightness(1.3),
            ],
            FilterName::Dot | FilterName::ThresholdZero => Vec::new(),
        }
    }

    /// Destructive rewrite run once the surface is decoded.
    pub fn pixel_transform(&self) -> Option<PixelTransform> {
        match self.name {
            FilterName::Dot => Some(PixelTransform::dot()),
            FilterName::ThresholdZero => Some(PixelTransform::threshold_zero()),
            _ => None,
        }
    }
}

/// Every filter, in catalog order.
pub const FILTER_CATALOG: [FilterSpec; 8] = [
    FilterSpec::style(FilterName::Blur),
    FilterSpec::pixel(FilterName::Dot),
    FilterSpec::style(FilterName::Dreamcore),
    FilterSpec::style(FilterName::Contrast),
    FilterSpec::style(FilterName::Saturate),
    FilterSpec::style(FilterName::Neon),
    FilterSpec::style(FilterName::Psychedelic),
    FilterSpec::pixel(FilterName::ThresholdZero),
];

const FIRST: FilterSpec = FILTER_CATALOG[4];
const SECOND: FilterSpec = FILTER_CATALOG[6];
const ROTATION: [FilterSpec; 6] = [
    FILTER_CATALOG[0],
    FILTER_CATALOG[1],
    FILTER_CATALOG[2],
    FILTER_CATALOG[3],
    FILTER_CATALOG[5],
    FILTER_CATALOG[7],
];

/// Filter for the popup at `display_index` in the shuffled display order.
///
/// Saturate and psychedelic are used once each; the rest repeat with period 6.
pub fn filter_for(display_index: usize) -> FilterSpec {
    match display_index {
        0 => FIRST,
        1 => SECOND,
        n => ROTATION[(n - 2) % ROTATION.len()],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/catalog.rs"]
mod tests;
