use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::{
    composite::blend,
    composition::model::{CropShape, OutputSizeSpec, ProfilePlacement},
    foundation::{
        core::RasterImage,
        error::{FramegenError, FramegenResult},
    },
    mask::make_mask,
    transform::{
        resize::{cover_crop, resize_exact},
        rotate::rotate_about_center,
    },
};

/// Base footprint side as a fraction of the poster's short side (30%).
const BASE_FOOTPRINT_NUM: u32 = 3;
const BASE_FOOTPRINT_DEN: u32 = 10;
/// Height-to-width ratio of the `Rectangle` footprint.
const RECTANGLE_ASPECT: f64 = 1.3;
/// Memory bound only: placements stay permissive, but a profile layer larger than
/// this per side would not fit in memory (on a 1080 px poster, scale above ~50).
const MAX_FOOTPRINT_SIDE: u32 = 16_384;

/// Footprint `(width, height)` of the profile layer on a `canvas`-sized poster.
///
/// `base = floor(0.3 * min(w, h))`; circle/square are `base * scale` square,
/// rectangle is `base * scale` wide and `base * scale * 1.3` tall (truncated).
pub fn profile_footprint(
    canvas: (u32, u32),
    scale: f64,
    shape: CropShape,
) -> FramegenResult<(u32, u32)> {
    if !scale.is_finite() {
        return Err(FramegenError::composition(format!(
            "profile scale must be finite, got {scale}"
        )));
    }
    let base = f64::from(canvas.0.min(canvas.1) * BASE_FOOTPRINT_NUM / BASE_FOOTPRINT_DEN);
    let w = base * scale;
    let h = match shape {
        CropShape::Rectangle => w * RECTANGLE_ASPECT,
        CropShape::Circle | CropShape::Square => w,
    };

    if w < 1.0 || h < 1.0 {
        return Err(FramegenError::composition(format!(
            "profile footprint {w:.2}x{h:.2} is empty (scale {scale})"
        )));
    }
    if w > f64::from(MAX_FOOTPRINT_SIDE) || h > f64::from(MAX_FOOTPRINT_SIDE) {
        return Err(FramegenError::composition(format!(
            "profile footprint {w:.0}x{h:.0} exceeds {MAX_FOOTPRINT_SIDE}px per side"
        )));
    }
    Ok((w as u32, h as u32))
}

/// Top-left paste origin placing the footprint center on `center`.
pub fn paste_origin(center: (i64, i64), footprint: (u32, u32)) -> (i64, i64) {
    let x = center.0 as f64 - f64::from(footprint.0) / 2.0;
    let y = center.1 as f64 - f64::from(footprint.1) / 2.0;
    (x.trunc() as i64, y.trunc() as i64)
}

/// Build the masked profile layer: cover-crop into `footprint`, rotate about its
/// center without growing, then take `shape`'s mask as alpha.
pub fn profile_layer(
    profile: RasterImage,
    footprint: (u32, u32),
    rotation_degrees: f64,
    shape: CropShape,
) -> FramegenResult<RgbaImage> {
    let cropped = cover_crop(profile, footprint, FilterType::Lanczos3)?;
    // The mask replaces whatever alpha the photo carried.
    let opaque = DynamicImage::ImageRgb8(cropped.as_dynamic().to_rgb8()).into_rgba8();
    let mut layer = rotate_about_center(&opaque, rotation_degrees);

    let mask = make_mask(shape, footprint, None)?;
    blend::apply_mask(&mut layer, &mask)?;
    Ok(layer)
}

/// Three-layer composite on an RGBA canvas the size of `poster`: poster, then the
/// placed profile layer, then `frame` stretched to the poster size (bilinear).
///
/// Placements are not clamped; off-canvas parts of the profile are clipped.
pub fn compose_poster_images(
    poster: RasterImage,
    profile: RasterImage,
    frame: RasterImage,
    placement: &ProfilePlacement,
) -> FramegenResult<RgbaImage> {
    let target = OutputSizeSpec::InheritFromPoster.resolve(Some(poster.dimensions()))?;
    let mut canvas = poster.into_rgba8();

    let footprint = profile_footprint(target, placement.scale, placement.crop_shape)?;
    let center = placement.resolved_center(target);
    let origin = paste_origin(center, footprint);
    tracing::debug!(
        canvas_w = target.0,
        canvas_h = target.1,
        footprint_w = footprint.0,
        footprint_h = footprint.1,
        origin_x = origin.0,
        origin_y = origin.1,
        shape = placement.crop_shape.name(),
        "placing profile layer"
    );

    let layer = profile_layer(
        profile,
        footprint,
        placement.rotation_degrees,
        placement.crop_shape,
    )?;
    blend::paste_over(&mut canvas, &layer, origin.0, origin.1, 1.0);

    let frame = RasterImage::from_rgba8(frame.into_rgba8())?;
    let frame = resize_exact(frame, target, FilterType::Triangle)?.into_rgba8();
    blend::over_in_place(&mut canvas, &frame, 1.0);

    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/poster.rs"]
mod tests;
