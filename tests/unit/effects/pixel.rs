use super::*;
use image::Rgba;

#[test]
fn threshold_zero_blacks_out_mid_gray() {
    let mut r = Raster::from_pixel(2, 2, Rgba([128, 128, 128, 77]));
    PixelTransform::threshold_zero().apply(&mut r);
    assert!(r.pixels().all(|p| p.0 == [0, 0, 0, 77]));
}

#[test]
fn threshold_zero_keeps_dark_pixels() {
    let mut r = Raster::from_pixel(2, 2, Rgba([100, 100, 100, 255]));
    PixelTransform::threshold_zero().apply(&mut r);
    assert!(r.pixels().all(|p| p.0 == [100, 100, 100, 255]));
}

#[test]
fn threshold_zero_boundary_is_inclusive() {
    let mut r = Raster::from_fn(2, 1, |x, _| {
        if x == 0 {
            Rgba([120, 120, 120, 255])
        } else {
            Rgba([119, 120, 120, 255])
        }
    });
    threshold_zero_in_place(&mut r, 120);
    assert_eq!(r.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(r.get_pixel(1, 0).0, [119, 120, 120, 255]);
}

#[test]
fn dot_averages_each_block_and_keeps_alpha() {
    let mut r = Raster::from_fn(20, 10, |x, y| {
        let a = (x + y) as u8;
        if x < 10 {
            Rgba([if x % 2 == 0 { 0 } else { 100 }, 10, 20, a])
        } else {
            Rgba([200, 200, 200, a])
        }
    });
    PixelTransform::dot().apply(&mut r);
    for y in 0..10 {
        for x in 0..20 {
            let p = r.get_pixel(x, y).0;
            assert_eq!(p[3], (x + y) as u8);
            if x < 10 {
                assert_eq!(&p[..3], &[50, 10, 20]);
            } else {
                assert_eq!(&p[..3], &[200, 200, 200]);
            }
        }
    }
}

#[test]
fn dot_handles_partial_edge_blocks() {
    let mut r = Raster::from_fn(13, 3, |x, _| Rgba([x as u8, 0, 0, 255]));
    pixelate_in_place(&mut r, 10);
    // Last block covers x = 10..13 -> mean of 10, 11, 12.
    assert_eq!(r.get_pixel(12, 2).0, [11, 0, 0, 255]);
    // First block: floor(mean(0..10)) = 4.
    assert_eq!(r.get_pixel(0, 0).0, [4, 0, 0, 255]);
}

#[test]
fn fit_to_container_scales_to_exact_size() {
    let src = Raster::from_pixel(40, 40, Rgba([9, 9, 9, 255]));
    let out = fit_to_container(&src, Canvas::new(200, 267));
    assert_eq!(out.dimensions(), (200, 267));
    assert_eq!(out.get_pixel(100, 100).0, [9, 9, 9, 255]);

    let same = fit_to_container(&src, Canvas::new(40, 40));
    assert_eq!(same, src);
}
