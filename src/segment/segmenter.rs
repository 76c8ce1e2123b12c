use image::Rgba;

use crate::{
    foundation::core::{Canvas, Raster},
    zones::table::{Zone, ZoneTable},
};

/// Cropped raster plus the zone it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub zone: Zone,
    pub pixels: Raster,
    /// Position of `zone` in the table, assigned before any shuffling.
    pub creation_index: usize,
}

impl Segment {
    pub fn zone_name(&self) -> &str {
        &self.zone.name
    }
}

/// Crop one segment per zone, in table order, without scaling.
///
/// Areas of a zone that fall outside `source` come back fully transparent.
#[tracing::instrument(skip_all, fields(zones = table.len()))]
pub fn segment(source: &Raster, table: &ZoneTable) -> Vec<Segment> {
    let canvas = Canvas::of(source);
    if canvas != table.canvas() {
        tracing::debug!(
            source_w = canvas.width,
            source_h = canvas.height,
            "source differs from zone canvas"
        );
    }
    table
        .zones()
        .iter()
        .enumerate()
        .map(|(creation_index, zone)| Segment {
            zone: zone.clone(),
            pixels: crop_or_blank(source, zone),
            creation_index,
        })
        .collect()
}

fn crop_or_blank(source: &Raster, zone: &Zone) -> Raster {
    let (sw, sh) = source.dimensions();
    if zone.right() <= u64::from(sw) && zone.bottom() <= u64::from(sh) {
        return image::imageops::crop_imm(source, zone.x, zone.y, zone.width, zone.height)
            .to_image();
    }

    let mut out = Raster::from_pixel(zone.width, zone.height, Rgba([0, 0, 0, 0]));
    for dy in 0..zone.height {
        let sy = u64::from(zone.y) + u64::from(dy);
        if sy >= u64::from(sh) {
            break;
        }
        for dx in 0..zone.width {
            let sx = u64::from(zone.x) + u64::from(dx);
            if sx >= u64::from(sw) {
                break;
            }
            out.put_pixel(dx, dy, *source.get_pixel(sx as u32, sy as u32));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/segment/segmenter.rs"]
mod tests;
