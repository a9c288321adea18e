use image::{Rgb, RgbImage, Rgba};

use super::*;

fn photo(size: OutputSize) -> RasterImage {
    let (w, h) = size.dimensions();
    RasterImage::from_rgb8(RgbImage::from_fn(w, h, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 77])
    }))
    .unwrap()
}

fn frame(size: OutputSize, px: Rgba<u8>) -> RasterImage {
    let (w, h) = size.dimensions();
    RasterImage::from_rgba8(RgbaImage::from_pixel(w, h, px)).unwrap()
}

#[test]
fn transparent_frame_keeps_photo() {
    let size = OutputSize::WhatsappDp;
    let out = overlay_images(
        photo(size),
        frame(size, Rgba([255, 0, 0, 0])),
        size,
        &FrameAdjust::default(),
    )
    .unwrap();
    assert_eq!(out.dimensions(), (500, 500));
    assert_eq!(out.get_pixel(123, 45).0, [123, 45, 77, 255]);
}

#[test]
fn opaque_frame_replaces_photo() {
    let size = OutputSize::WhatsappDp;
    let out = overlay_images(
        photo(size),
        frame(size, Rgba([1, 2, 3, 255])),
        size,
        &FrameAdjust::default(),
    )
    .unwrap();
    assert!(out.pixels().all(|p| p.0 == [1, 2, 3, 255]));
}

#[test]
fn opacity_fades_frame() {
    let size = OutputSize::WhatsappDp;
    let adjust = FrameAdjust {
        opacity: 0.0,
        ..FrameAdjust::default()
    };
    let out = overlay_images(photo(size), frame(size, Rgba([1, 2, 3, 255])), size, &adjust).unwrap();
    assert_eq!(out.get_pixel(10, 20).0, [10, 20, 77, 255]);
}

#[test]
fn adjust_frame_quarter_turn_is_counter_clockwise() {
    // [A B] (2x1) turned counter-clockwise becomes [B; A] (1x2).
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([1, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([2, 0, 0, 255]));
    let adjust = FrameAdjust {
        rotation: QuarterTurn::R90,
        ..FrameAdjust::default()
    };
    let out = adjust_frame(img, &adjust);
    assert_eq!(out.dimensions(), (1, 2));
    assert_eq!(out.get_pixel(0, 0).0[0], 2);
    assert_eq!(out.get_pixel(0, 1).0[0], 1);
}

#[test]
fn adjust_frame_flips() {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([9, 0, 0, 255]));
    let h = adjust_frame(
        img.clone(),
        &FrameAdjust {
            flip_h: true,
            ..FrameAdjust::default()
        },
    );
    assert_eq!(h.get_pixel(1, 0).0[0], 9);
    let v = adjust_frame(
        img,
        &FrameAdjust {
            flip_v: true,
            ..FrameAdjust::default()
        },
    );
    assert_eq!(v.get_pixel(0, 1).0[0], 9);
}

#[test]
fn downscaled_white_frame_edge_stays_white_on_white() {
    let size = OutputSize::WhatsappDp;
    let photo = RasterImage::from_rgb8(RgbImage::from_pixel(500, 500, Rgb([255, 255, 255]))).unwrap();
    let frame = RgbaImage::from_fn(200, 200, |x, _| {
        if x < 100 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    let frame = RasterImage::from_rgba8(frame).unwrap();
    let out = overlay_images(photo, frame, size, &FrameAdjust::default()).unwrap();
    assert!(out.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}
