use image::imageops::{self, FilterType};

use crate::foundation::core::{Canvas, Raster};

/// Block edge used by the "dot" pixelation.
pub const DOT_BLOCK_PX: u32 = 10;
/// Mean-of-RGB level at or above which "threshold-zero" blacks a pixel out.
pub const THRESHOLD_ZERO_LEVEL: u8 = 120;

/// Destructive one-shot rewrite of a decoded surface. Alpha is never touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PixelTransform {
    /// Replace each `block`x`block` tile with its mean RGB.
    Dot { block: u32 },
    /// Zero RGB wherever `(r + g + b) / 3 >= threshold`.
    ThresholdZero { threshold: u8 },
}

impl PixelTransform {
    pub const fn dot() -> Self {
        Self::Dot {
            block: DOT_BLOCK_PX,
        }
    }

    pub const fn threshold_zero() -> Self {
        Self::ThresholdZero {
            threshold: THRESHOLD_ZERO_LEVEL,
        }
    }

    pub fn apply(self, raster: &mut Raster) {
        match self {
            PixelTransform::Dot { block } => pixelate_in_place(raster, block),
            PixelTransform::ThresholdZero { threshold } => {
                threshold_zero_in_place(raster, threshold)
            }
        }
    }
}

/// Scale a crop to the popup container. Pixel transforms run on the result.
pub fn fit_to_container(src: &Raster, container: Canvas) -> Raster {
    if Canvas::of(src) == container {
        return src.clone();
    }
    imageops::resize(src, container.width, container.height, FilterType::Triangle)
}

pub fn pixelate_in_place(raster: &mut Raster, block: u32) {
    let block = block.max(1);
    let (w, h) = raster.dimensions();
    for by in (0..h).step_by(block as usize) {
        for bx in (0..w).step_by(block as usize) {
            let x_end = (bx + block).min(w);
            let y_end = (by + block).min(h);

            let mut sum = [0u64; 3];
            let mut count = 0u64;
            for y in by..y_end {
                for x in bx..x_end {
                    let p = raster.get_pixel(x, y);
                    for c in 0..3 {
                        sum[c] += u64::from(p[c]);
                    }
                    count += 1;
                }
            }
            if count == 0 {
                continue;
            }
            let mean = sum.map(|s| (s / count) as u8);

            for y in by..y_end {
                for x in bx..x_end {
                    let p = raster.get_pixel_mut(x, y);
                    p[0] = mean[0];
                    p[1] = mean[1];
                    p[2] = mean[2];
                }
            }
        }
    }
}

pub fn threshold_zero_in_place(raster: &mut Raster, threshold: u8) {
    // (r + g + b) / 3 >= t  <=>  r + g + b >= 3t, which avoids fractional means.
    let limit = 3 * u16::from(threshold);
    for p in raster.pixels_mut() {
        let sum = u16::from(p[0]) + u16::from(p[1]) + u16::from(p[2]);
        if sum >= limit {
            p[0] = 0;
            p[1] = 0;
            p[2] = 0;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pixel.rs"]
mod tests;
