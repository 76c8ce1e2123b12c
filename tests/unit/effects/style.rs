use super::*;
use image::Rgba;

fn solid(rgba: [u8; 4]) -> Raster {
    Raster::from_pixel(6, 6, Rgba(rgba))
}

fn px(r: &Raster) -> [u8; 4] {
    r.get_pixel(3, 3).0
}

#[test]
fn empty_stack_is_identity() {
    let src = solid([12, 34, 56, 200]);
    assert_eq!(apply_style_stack(&src, &[]).unwrap(), src);
}

#[test]
fn brightness_scales_and_clamps() {
    let out = apply_style_stack(&solid([100, 200, 0, 255]), &[StyleOp::Brightness(1.5)]).unwrap();
    assert_eq!(px(&out), [150, 255, 0, 255]);
}

#[test]
fn contrast_pivots_around_mid_gray() {
    let out = apply_style_stack(&solid([64, 128, 192, 77]), &[StyleOp::Contrast(2.0)]).unwrap();
    let [r, g, b, a] = px(&out);
    assert_eq!(a, 77);
    assert!(r <= 1);
    assert!((i32::from(g) - 128).abs() <= 1);
    assert!(b >= 254);
}

#[test]
fn saturate_leaves_gray_alone() {
    let out = apply_style_stack(&solid([90, 90, 90, 255]), &[StyleOp::Saturate(3.0)]).unwrap();
    for c in &px(&out)[..3] {
        assert!((i32::from(*c) - 90).abs() <= 1);
    }
}

#[test]
fn saturate_pushes_channels_apart() {
    let out = apply_style_stack(&solid([150, 100, 100, 255]), &[StyleOp::Saturate(2.0)]).unwrap();
    let [r, g, _, _] = px(&out);
    assert!(r > 150);
    assert!(g < 100);
}

#[test]
fn full_hue_turn_is_identity() {
    let src = solid([200, 40, 90, 255]);
    let out = apply_style_stack(&src, &[StyleOp::HueRotate { degrees: 360.0 }]).unwrap();
    for (a, b) in px(&out).iter().zip(px(&src).iter()) {
        assert!((i32::from(*a) - i32::from(*b)).abs() <= 1);
    }
}

#[test]
fn blur_of_uniform_raster_is_stable() {
    let src = solid([10, 20, 30, 255]);
    let out = apply_style_stack(&src, &[StyleOp::Blur { radius_px: 6.0 }]).unwrap();
    assert_eq!(out, src);
}

#[test]
fn glow_fills_transparent_neighbours() {
    let mut src = Raster::from_pixel(9, 9, Rgba([0, 0, 0, 0]));
    src.put_pixel(4, 4, Rgba([255, 255, 255, 255]));
    let out = apply_style_stack(
        &src,
        &[StyleOp::Glow {
            radius_px: 1.0,
            rgb: [0, 255, 255],
        }],
    )
    .unwrap();
    assert_eq!(out.get_pixel(4, 4).0, [255, 255, 255, 255]);
    let halo = out.get_pixel(5, 4).0;
    assert!(halo[3] > 0);
    assert_eq!(halo[0], 0);
    assert!(halo[1] > 200);
}

#[test]
fn invalid_parameters_are_rejected() {
    let src = solid([0, 0, 0, 255]);
    assert!(apply_style_stack(&src, &[StyleOp::Saturate(f32::NAN)]).is_err());
    assert!(apply_style_stack(&src, &[StyleOp::Blur { radius_px: -1.0 }]).is_err());
}
