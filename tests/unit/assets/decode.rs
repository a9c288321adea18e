use std::io::Cursor;

use base64::Engine as _;

use super::*;
use crate::foundation::core::ColorMode;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let raster = decode_image(&png_bytes(image::DynamicImage::ImageRgba8(img))).unwrap();
    assert_eq!(raster.dimensions(), (1, 1));
    assert_eq!(raster.mode(), ColorMode::Rgba);
    assert_eq!(raster.to_rgba8().get_pixel(0, 0).0, [100, 50, 200, 128]);
}

#[test]
fn decode_image_gray_normalizes_to_rgb() {
    let img = image::GrayImage::from_pixel(2, 3, image::Luma([9]));
    let raster = decode_image(&png_bytes(image::DynamicImage::ImageLuma8(img))).unwrap();
    assert_eq!(raster.mode(), ColorMode::Rgb);
    assert_eq!(raster.dimensions(), (2, 3));
}

#[test]
fn decode_image_rejects_garbage() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, FramegenError::Decode(_)));
    assert!(matches!(decode_image(&[]), Err(FramegenError::Decode(_))));
}

#[test]
fn base64_with_and_without_data_url_prefix() {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
    let bytes = png_bytes(image::DynamicImage::ImageRgb8(img));
    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);

    let plain = decode_base64_image(&b64).unwrap();
    assert_eq!(plain.dimensions(), (4, 4));

    let with_prefix = decode_base64_image(&format!("data:image/png;base64,{b64}")).unwrap();
    assert_eq!(with_prefix.to_rgba8().get_pixel(3, 3).0, [1, 2, 3, 255]);
}

#[test]
fn base64_tolerates_line_breaks() {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([5, 5, 5]));
    let b64 =
        base64::engine::general_purpose::STANDARD.encode(png_bytes(image::DynamicImage::ImageRgb8(img)));
    let (a, b) = b64.split_at(b64.len() / 2);
    decode_base64_image(&format!("{a}\n{b}")).unwrap();
}

#[test]
fn invalid_base64_is_a_decode_error() {
    let err = decode_base64_image("data:image/png;base64,@@@").unwrap_err();
    assert!(err.to_string().contains("invalid base64"));
}

#[test]
fn strip_prefix_only_cuts_at_first_comma() {
    assert_eq!(strip_data_url_prefix("data:x;base64,AB,CD"), "AB,CD");
    assert_eq!(strip_data_url_prefix("ABCD"), "ABCD");
}
