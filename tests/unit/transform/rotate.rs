use image::Rgba;

use super::*;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn quad() -> RgbaImage {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, RED);
    img.put_pixel(1, 0, GREEN);
    img.put_pixel(0, 1, BLUE);
    img.put_pixel(1, 1, WHITE);
    img
}

#[test]
fn zero_and_full_turns_are_identity() {
    let img = quad();
    assert_eq!(rotate_about_center(&img, 0.0), img);
    assert_eq!(rotate_about_center(&img, 360.0), img);
    assert_eq!(rotate_about_center(&img, -720.0), img);
}

#[test]
fn positive_angle_turns_counter_clockwise() {
    let out = rotate_about_center(&quad(), 90.0);
    assert_eq!(*out.get_pixel(0, 0), GREEN);
    assert_eq!(*out.get_pixel(1, 0), WHITE);
    assert_eq!(*out.get_pixel(0, 1), RED);
    assert_eq!(*out.get_pixel(1, 1), BLUE);
}

#[test]
fn half_turn_swaps_diagonals() {
    let out = rotate_about_center(&quad(), 180.0);
    assert_eq!(*out.get_pixel(0, 0), WHITE);
    assert_eq!(*out.get_pixel(1, 1), RED);
}

#[test]
fn diagonal_rotation_clips_corners_to_transparent() {
    let img = RgbaImage::from_pixel(64, 64, RED);
    let out = rotate_about_center(&img, 45.0);
    assert_eq!(out.dimensions(), (64, 64));
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
    assert_eq!(out.get_pixel(63, 63).0[3], 0);
    assert_eq!(*out.get_pixel(32, 32), RED);
    // The inscribed disc survives any rotation.
    assert_eq!(out.get_pixel(32, 8).0[3], 255);
}

#[test]
fn non_finite_angle_is_ignored() {
    let img = quad();
    assert_eq!(rotate_about_center(&img, f64::NAN), img);
}
