use image::{RgbaImage, imageops, imageops::FilterType};

use crate::{
    composite::blend,
    composition::model::{FrameAdjust, OutputSize, OutputSizeSpec, QuarterTurn},
    foundation::{core::RasterImage, error::FramegenResult},
    transform::resize::resize_exact,
};

/// Two-layer composite: stretch `photo` to the preset size, then lay `frame` over
/// it through the frame's own alpha.
///
/// The photo is expected to be pre-cropped to the preset's aspect ratio; it is
/// resized, not cover-cropped. A frame without real transparency hides the photo.
pub fn overlay_images(
    photo: RasterImage,
    frame: RasterImage,
    size: OutputSize,
    adjust: &FrameAdjust,
) -> FramegenResult<RgbaImage> {
    let target = OutputSizeSpec::Preset(size).resolve(None)?;

    let photo = resize_exact(photo, target, FilterType::Lanczos3)?;
    // RGB photos land on a fresh RGBA canvas; RGBA photos are the canvas.
    let mut canvas = photo.into_rgba8();

    let frame = adjust_frame(frame.into_rgba8(), adjust);
    let frame = resize_exact(RasterImage::from_rgba8(frame)?, target, FilterType::Lanczos3)?;
    let frame = frame.into_rgba8();

    blend::over_in_place(&mut canvas, &frame, adjust.opacity);
    Ok(canvas)
}

/// Quarter-turn (counter-clockwise) rotation, then horizontal and vertical flips.
pub fn adjust_frame(frame: RgbaImage, adjust: &FrameAdjust) -> RgbaImage {
    let mut out = match adjust.rotation {
        QuarterTurn::R0 => frame,
        QuarterTurn::R90 => imageops::rotate270(&frame),
        QuarterTurn::R180 => imageops::rotate180(&frame),
        QuarterTurn::R270 => imageops::rotate90(&frame),
    };
    if adjust.flip_h {
        imageops::flip_horizontal_in_place(&mut out);
    }
    if adjust.flip_v {
        imageops::flip_vertical_in_place(&mut out);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/composite/overlay.rs"]
mod tests;
