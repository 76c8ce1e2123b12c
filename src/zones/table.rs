use std::collections::BTreeSet;

use crate::foundation::{
    core::Canvas,
    error::{FaceError, FaceResult},
};

/// Named rectangle inside the source canvas.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Zone {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Zone {
    pub fn new(name: impl Into<String>, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    pub fn fits_in(&self, canvas: Canvas) -> bool {
        self.right() <= u64::from(canvas.width) && self.bottom() <= u64::from(canvas.height)
    }
}

/// Ordered, validated set of zones over a fixed-size source canvas.
///
/// Iteration order is definition order; segment creation indices follow it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ZoneTableDef")]
pub struct ZoneTable {
    canvas: Canvas,
    zones: Vec<Zone>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ZoneTableDef {
    canvas: Canvas,
    zones: Vec<Zone>,
}

impl TryFrom<ZoneTableDef> for ZoneTable {
    type Error = FaceError;

    fn try_from(def: ZoneTableDef) -> FaceResult<Self> {
        ZoneTable::new(def.canvas, def.zones)
    }
}

impl ZoneTable {
    /// Size of the capture every reference zone is measured against.
    pub const REFERENCE_CANVAS: Canvas = Canvas::new(480, 640);

    pub fn new(canvas: Canvas, zones: Vec<Zone>) -> FaceResult<Self> {
        if canvas.is_empty() {
            return Err(FaceError::validation("zone canvas must be non-empty"));
        }
        let mut names = BTreeSet::new();
        for zone in &zones {
            if zone.name.trim().is_empty() {
                return Err(FaceError::validation("zone name must be non-empty"));
            }
            if zone.width == 0 || zone.height == 0 {
                return Err(FaceError::validation(format!(
                    "zone '{}' must have positive width and height",
                    zone.name
                )));
            }
            if !zone.fits_in(canvas) {
                return Err(FaceError::validation(format!(
                    "zone '{}' exceeds the {}x{} canvas",
                    zone.name, canvas.width, canvas.height
                )));
            }
            if !names.insert(zone.name.as_str()) {
                return Err(FaceError::validation(format!(
                    "duplicate zone name '{}'",
                    zone.name
                )));
            }
        }
        Ok(Self { canvas, zones })
    }

    /// Six sub-zones per eye, then nose and mouth, over a 480x640 capture.
    pub fn reference() -> Self {
        const EYE: u32 = 40;
        let mut zones = Vec::with_capacity(14);
        for (prefix, x0) in [("leftEye", 50u32), ("rightEye", 290u32)] {
            for i in 0..6u32 {
                let col = i % 3;
                let row = i / 3;
                zones.push(Zone::new(
                    format!("{prefix}{}", i + 1),
                    x0 + col * EYE,
                    96 + row * EYE,
                    EYE,
                    EYE,
                ));
            }
        }
        zones.push(Zone::new("nose", 168, 256, 144, 128));
        zones.push(Zone::new("mouth", 120, 384, 240, 128));
        Self {
            canvas: Self::REFERENCE_CANVAS,
            zones,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/zones/table.rs"]
mod tests;
