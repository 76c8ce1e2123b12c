use crate::{
    foundation::{
        core::{Canvas, Point, Size, Vec2, Viewport},
        error::{FaceError, FaceResult},
        random::RandomSource,
    },
    segment::segmenter::Segment,
    zones::table::ZoneTable,
};

/// Stacking value for zones without an entry in the z-index table.
pub const DEFAULT_Z_INDEX: i32 = 1000;
/// Stacking value of a popup while it is being dragged; above every zone value.
pub const DRAGGING_Z_INDEX: i32 = 2000;

const Z_INDEX_TABLE: [(&str, i32); 14] = [
    ("leftEye1", 1010),
    ("leftEye2", 1011),
    ("leftEye3", 1012),
    ("leftEye4", 1013),
    ("leftEye5", 1014),
    ("leftEye6", 1015),
    ("rightEye1", 1020),
    ("rightEye2", 1021),
    ("rightEye3", 1022),
    ("rightEye4", 1023),
    ("rightEye5", 1024),
    ("rightEye6", 1025),
    ("nose", 1030),
    ("mouth", 1040),
];

// Normalized offsets from the viewport center, roughly where the part sits on a face.
const POSITION_PRESETS: [(&str, f64, f64); 14] = [
    ("leftEye1", -0.5, -0.5),
    ("leftEye2", -0.35, -0.5),
    ("leftEye3", -0.2, -0.5),
    ("leftEye4", -0.5, -0.3),
    ("leftEye5", -0.35, -0.3),
    ("leftEye6", -0.2, -0.3),
    ("rightEye1", 0.2, -0.5),
    ("rightEye2", 0.4, -0.5),
    ("rightEye3", 0.6, -0.5),
    ("rightEye4", 0.2, -0.3),
    ("rightEye5", 0.4, -0.3),
    ("rightEye6", 0.6, -0.3),
    ("nose", 0.0, -0.2),
    ("mouth", 0.0, 0.3),
];

/// Tunables for popup sizing and placement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Fraction of half the reference canvas used as popup size.
    pub popup_scale: f64,
    /// Fraction of the viewport the presets are spread over.
    pub spread: f64,
    /// Full width of the symmetric jitter, as a fraction of popup size.
    pub jitter_span: f64,
    /// Minimum distance between a freshly placed popup and the viewport edge.
    pub margin_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            popup_scale: 5.0 / 6.0,
            spread: 0.8,
            jitter_span: 0.3,
            margin_px: 50.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> FaceResult<()> {
        let fields = [
            ("popup_scale", self.popup_scale),
            ("spread", self.spread),
            ("jitter_span", self.jitter_span),
            ("margin_px", self.margin_px),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(FaceError::validation(format!(
                    "layout.{name} must be finite and >= 0"
                )));
            }
        }
        if self.popup_scale == 0.0 {
            return Err(FaceError::validation("layout.popup_scale must be > 0"));
        }
        Ok(())
    }
}

/// Computes popup size, initial position and stacking order.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEngine {
    config: LayoutConfig,
    popup_size: Size,
}

impl LayoutEngine {
    pub fn new(reference: Canvas, config: LayoutConfig) -> FaceResult<Self> {
        config.validate()?;
        if reference.is_empty() {
            return Err(FaceError::validation("layout reference canvas must be non-empty"));
        }
        let popup_size = Size::new(
            f64::from(reference.width) / 2.0 * config.popup_scale,
            f64::from(reference.height) / 2.0 * config.popup_scale,
        );
        Ok(Self { config, popup_size })
    }

    /// Engine over the 480x640 reference canvas with default tunables.
    pub fn reference() -> Self {
        let reference = ZoneTable::REFERENCE_CANVAS;
        let config = LayoutConfig::default();
        Self {
            popup_size: Size::new(
                f64::from(reference.width) / 2.0 * config.popup_scale,
                f64::from(reference.height) / 2.0 * config.popup_scale,
            ),
            config,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Every popup shares one size, whatever its zone.
    pub fn size_for(&self, _segment: &Segment) -> Size {
        self.popup_size
    }

    pub fn popup_size(&self) -> Size {
        self.popup_size
    }

    /// Pixel size of the surface pixel transforms run on.
    pub fn container(&self) -> Canvas {
        Canvas::from_size_rounded(self.popup_size)
    }

    /// Jittered, margin-clamped top-left corner for `segment`.
    ///
    /// Draws two values from `rng`: x jitter first, then y.
    pub fn position_for(
        &self,
        segment: &Segment,
        size: Size,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) -> Point {
        self.position_for_zone(segment.zone_name(), size, viewport, rng)
    }

    pub fn position_for_zone(
        &self,
        zone_name: &str,
        size: Size,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) -> Point {
        let preset = position_preset(zone_name);
        let center = viewport.center();
        let spread = Vec2::new(
            viewport.width * self.config.spread,
            viewport.height * self.config.spread,
        );
        let base = Point::new(
            center.x + preset.x * spread.x,
            center.y + preset.y * spread.y,
        );

        let jitter_x = (rng.next_unit() - 0.5) * size.width * self.config.jitter_span;
        let jitter_y = (rng.next_unit() - 0.5) * size.height * self.config.jitter_span;

        let margin = self.config.margin_px;
        Point::new(
            clamp_lower_wins(
                base.x + jitter_x,
                margin,
                viewport.width - size.width - margin,
            ),
            clamp_lower_wins(
                base.y + jitter_y,
                margin,
                viewport.height - size.height - margin,
            ),
        )
    }

    /// Static stacking value for a zone name.
    pub fn z_index_for(zone_name: &str) -> i32 {
        Z_INDEX_TABLE
            .iter()
            .find(|(name, _)| *name == zone_name)
            .map(|&(_, z)| z)
            .unwrap_or(DEFAULT_Z_INDEX)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::reference()
    }
}

/// Normalized `(nx, ny)` preset for a zone; `(0, 0)` when the zone has none.
pub fn position_preset(zone_name: &str) -> Vec2 {
    POSITION_PRESETS
        .iter()
        .find(|(name, _, _)| *name == zone_name)
        .map(|&(_, x, y)| Vec2::new(x, y))
        .unwrap_or(Vec2::ZERO)
}

// max(lo, min(hi, v)): when the range is inverted the lower bound wins.
fn clamp_lower_wins(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
