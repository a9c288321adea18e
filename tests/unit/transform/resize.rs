use image::{Rgb, RgbImage};

use super::*;

fn solid(w: u32, h: u32) -> RasterImage {
    RasterImage::from_rgb8(RgbImage::from_pixel(w, h, Rgb([40, 80, 120]))).unwrap()
}

/// Left half red, right half blue.
fn split_lr(w: u32, h: u32) -> RasterImage {
    let img = RgbImage::from_fn(w, h, |x, _| {
        if x < w / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    RasterImage::from_rgb8(img).unwrap()
}

#[test]
fn resize_and_crop_wider_source_hits_target() {
    let out = resize_and_crop(solid(400, 100), (100, 100)).unwrap();
    assert_eq!(out.dimensions(), (100, 100));
}

#[test]
fn resize_and_crop_taller_source_hits_target() {
    let out = resize_and_crop(solid(90, 500), (108, 192)).unwrap();
    assert_eq!(out.dimensions(), (108, 192));
}

#[test]
fn resize_and_crop_matching_aspect_is_pure_scale() {
    let out = resize_and_crop(solid(54, 96), (108, 192)).unwrap();
    assert_eq!(out.dimensions(), (108, 192));
    let px = out.to_rgba8().get_pixel(0, 0).0;
    assert!(px[0].abs_diff(40) <= 1 && px[1].abs_diff(80) <= 1 && px[2].abs_diff(120) <= 1);
}

#[test]
fn resize_and_crop_odd_ratios_always_exact() {
    for &(sw, sh) in &[(333, 77), (77, 333), (101, 99), (1, 1), (3, 100)] {
        for &target in &[(50, 50), (108, 192), (192, 108), (7, 3)] {
            let out = resize_and_crop(solid(sw, sh), target).unwrap();
            assert_eq!(out.dimensions(), target, "source {sw}x{sh}");
        }
    }
}

#[test]
fn resize_and_crop_is_centered() {
    // 300x100 red|blue -> 100x100: the middle third straddles the split.
    let out = resize_and_crop(split_lr(300, 100), (100, 100)).unwrap();
    let rgba = out.to_rgba8();
    assert_eq!(rgba.get_pixel(5, 50).0[0], 255);
    assert_eq!(rgba.get_pixel(94, 50).0[2], 255);
}

#[test]
fn resize_and_crop_keeps_mode() {
    let rgba = RasterImage::from_rgba8(image::RgbaImage::new(20, 10)).unwrap();
    let out = resize_and_crop(rgba, (5, 5)).unwrap();
    assert_eq!(out.mode(), crate::foundation::core::ColorMode::Rgba);
}

#[test]
fn zero_target_is_rejected() {
    assert!(matches!(
        resize_and_crop(solid(10, 10), (0, 10)),
        Err(FramegenError::Validation(_))
    ));
}

#[test]
fn cover_crop_fills_footprint_for_any_aspect() {
    for &(sw, sh) in &[(300, 200), (200, 300), (324, 324), (13, 999)] {
        let out = cover_crop(solid(sw, sh), (324, 421), FilterType::Lanczos3).unwrap();
        assert_eq!(out.dimensions(), (324, 421));
    }
}

#[test]
fn resize_exact_stretches_and_short_circuits() {
    let out = resize_exact(solid(10, 20), (30, 5), FilterType::Lanczos3).unwrap();
    assert_eq!(out.dimensions(), (30, 5));
    let same = resize_exact(solid(8, 8), (8, 8), FilterType::Triangle).unwrap();
    assert_eq!(same.to_rgba8().get_pixel(0, 0).0, [40, 80, 120, 255]);
}

#[test]
fn center_crop_rejects_oversized_window() {
    assert!(center_crop(solid(10, 10), (11, 10)).is_err());
}

#[test]
fn resize_exact_does_not_bleed_transparent_color() {
    // Transparent black left half, opaque white right half.
    let frame = image::RgbaImage::from_fn(20, 20, |x, _| {
        if x < 10 {
            image::Rgba([0, 0, 0, 0])
        } else {
            image::Rgba([255, 255, 255, 255])
        }
    });
    let raster = RasterImage::from_rgba8(frame).unwrap();
    for filter in [FilterType::Lanczos3, FilterType::Triangle] {
        let out = resize_exact(raster.clone(), (53, 53), filter).unwrap().into_rgba8();
        for px in out.pixels() {
            if px.0[3] > 0 {
                assert_eq!(&px.0[..3], &[255, 255, 255], "{filter:?} {px:?}");
            } else {
                assert_eq!(px.0, [0, 0, 0, 0]);
            }
        }
    }
}

#[test]
fn resize_exact_keeps_opaque_colors_exact() {
    let raster = RasterImage::from_rgba8(image::RgbaImage::from_pixel(
        9,
        9,
        image::Rgba([12, 34, 56, 255]),
    ))
    .unwrap();
    let out = resize_exact(raster, (25, 4), FilterType::Lanczos3).unwrap().into_rgba8();
    assert!(out.pixels().all(|p| p.0 == [12, 34, 56, 255]));
}
