use crate::foundation::error::{FaceError, FaceResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for premultiplied pixels.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

/// Composite `src` over `dst` pixel by pixel; both buffers premultiplied.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> FaceResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FaceError::raster(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Replace color with `rgb` scaled by each pixel's own alpha (premultiplied tint).
pub(crate) fn tint_alpha_in_place(buf: &mut [u8], rgb: [u8; 3]) {
    for px in buf.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in 0..3 {
            px[c] = mul_div255_u8(u16::from(rgb[c]), a);
        }
    }
}
