use crate::{
    effects::{
        blur::{EdgeMode, blur_rgba8_premul},
        composite::{over_in_place, tint_alpha_in_place},
    },
    foundation::{
        core::Raster,
        error::{FaceError, FaceResult},
        math::{premultiply_rgba8_in_place, unit_to_u8, unpremultiply_rgba8_in_place},
    },
};

/// One step of a non-destructive adjustment stack.
///
/// Semantics follow the CSS filter functions of the same name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleOp {
    /// Gaussian blur with standard deviation `radius_px`.
    Blur { radius_px: f32 },
    HueRotate { degrees: f32 },
    Saturate(f32),
    Contrast(f32),
    Brightness(f32),
    /// Zero-offset drop shadow: blurred alpha tinted with `rgb`, drawn under the image.
    Glow { radius_px: f32, rgb: [u8; 3] },
}

type Matrix3 = [[f32; 3]; 3];

impl StyleOp {
    fn color_matrix(self) -> Option<Matrix3> {
        match self {
            StyleOp::Saturate(s) => Some([
                [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
            ]),
            StyleOp::HueRotate { degrees } => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                Some([
                    [
                        0.213 + cos * 0.787 - sin * 0.213,
                        0.715 - cos * 0.715 - sin * 0.715,
                        0.072 - cos * 0.072 + sin * 0.928,
                    ],
                    [
                        0.213 - cos * 0.213 + sin * 0.143,
                        0.715 + cos * 0.285 + sin * 0.140,
                        0.072 - cos * 0.072 - sin * 0.283,
                    ],
                    [
                        0.213 - cos * 0.213 - sin * 0.787,
                        0.715 - cos * 0.715 + sin * 0.715,
                        0.072 + cos * 0.928 + sin * 0.072,
                    ],
                ])
            }
            _ => None,
        }
    }

    /// (slope, intercept) of the per-channel linear transfer.
    fn transfer(self) -> Option<(f32, f32)> {
        match self {
            StyleOp::Brightness(b) => Some((b, 0.0)),
            StyleOp::Contrast(c) => Some((c, 0.5 - 0.5 * c)),
            _ => None,
        }
    }

    fn validate(self) -> FaceResult<()> {
        let finite = match self {
            StyleOp::Blur { radius_px } | StyleOp::Glow { radius_px, .. } => {
                radius_px.is_finite() && radius_px >= 0.0
            }
            StyleOp::HueRotate { degrees } => degrees.is_finite(),
            StyleOp::Saturate(v) | StyleOp::Contrast(v) | StyleOp::Brightness(v) => {
                v.is_finite() && v >= 0.0
            }
        };
        if finite {
            Ok(())
        } else {
            Err(FaceError::validation(format!(
                "style op {self:?} has an invalid parameter"
            )))
        }
    }
}

/// Render `src` through `ops` in order, returning a new raster of the same size.
pub fn apply_style_stack(src: &Raster, ops: &[StyleOp]) -> FaceResult<Raster> {
    let mut out = src.clone();
    for &op in ops {
        op.validate()?;
        apply_op_in_place(&mut out, op)?;
    }
    Ok(out)
}

fn apply_op_in_place(raster: &mut Raster, op: StyleOp) -> FaceResult<()> {
    if let Some(m) = op.color_matrix() {
        for px in raster.pixels_mut() {
            let [r, g, b] = [px[0], px[1], px[2]].map(|c| f32::from(c) / 255.0);
            for (i, row) in m.iter().enumerate() {
                px[i] = unit_to_u8(row[0] * r + row[1] * g + row[2] * b);
            }
        }
        return Ok(());
    }
    if let Some((slope, intercept)) = op.transfer() {
        for px in raster.pixels_mut() {
            for c in 0..3 {
                px[c] = unit_to_u8(slope * (f32::from(px[c]) / 255.0) + intercept);
            }
        }
        return Ok(());
    }
    match op {
        StyleOp::Blur { radius_px } => blur_in_place(raster, radius_px),
        StyleOp::Glow { radius_px, rgb } => glow_in_place(raster, radius_px, rgb),
        _ => Ok(()),
    }
}

fn blur_in_place(raster: &mut Raster, sigma: f32) -> FaceResult<()> {
    let (w, h) = raster.dimensions();
    let buf: &mut [u8] = &mut **raster;
    premultiply_rgba8_in_place(buf);
    let blurred = blur_rgba8_premul(buf, w, h, sigma, EdgeMode::Clamp)?;
    buf.copy_from_slice(&blurred);
    unpremultiply_rgba8_in_place(buf);
    Ok(())
}

fn glow_in_place(raster: &mut Raster, sigma: f32, rgb: [u8; 3]) -> FaceResult<()> {
    let (w, h) = raster.dimensions();
    let buf: &mut [u8] = &mut **raster;
    premultiply_rgba8_in_place(buf);

    let mut shadow = blur_rgba8_premul(buf, w, h, sigma, EdgeMode::Transparent)?;
    tint_alpha_in_place(&mut shadow, rgb);
    over_in_place(&mut shadow, buf)?;

    buf.copy_from_slice(&shadow);
    unpremultiply_rgba8_in_place(buf);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/style.rs"]
mod tests;
