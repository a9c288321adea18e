use image::{RgbaImage, imageops, imageops::FilterType};

use crate::{
    composite::blend::{premultiply, unpremultiply},
    foundation::{
        core::RasterImage,
        error::{FramegenError, FramegenResult},
    },
};

/// Aspect-fill `image` into exactly `target` pixels: uniform Lanczos scale until
/// the short side matches, then center-crop the overflow. Never pads.
pub fn resize_and_crop(image: RasterImage, target: (u32, u32)) -> FramegenResult<RasterImage> {
    let (tw, th) = check_target(target)?;
    let (sw, sh) = image.dimensions();

    let target_ratio = f64::from(tw) / f64::from(th);
    let source_ratio = f64::from(sw) / f64::from(sh);

    let (nw, nh) = if source_ratio > target_ratio {
        // Wider than target: match height, trim left/right.
        let nw = (f64::from(th) * source_ratio) as u32;
        (nw.max(tw), th)
    } else {
        let nh = (f64::from(tw) / source_ratio) as u32;
        (tw, nh.max(th))
    };

    let scaled = resize_exact(image, (nw, nh), FilterType::Lanczos3)?;
    center_crop(scaled, (tw, th))
}

/// Cover-crop into a footprint: scale by the larger of the two axis ratios so both
/// axes are covered, then center-crop to exactly `footprint`.
pub fn cover_crop(
    image: RasterImage,
    footprint: (u32, u32),
    filter: FilterType,
) -> FramegenResult<RasterImage> {
    let (fw, fh) = check_target(footprint)?;
    let (sw, sh) = image.dimensions();

    let scale = (f64::from(fw) / f64::from(sw)).max(f64::from(fh) / f64::from(sh));
    // Round up so float error never leaves a one-pixel gap.
    let nw = ((f64::from(sw) * scale).ceil() as u32).max(fw);
    let nh = ((f64::from(sh) * scale).ceil() as u32).max(fh);

    let scaled = resize_exact(image, (nw, nh), filter)?;
    center_crop(scaled, (fw, fh))
}

/// Stretch `image` to exactly `target`; a no-op when the size already matches.
///
/// Rasters with alpha are filtered premultiplied (and come back as RGBA), so
/// colors under fully transparent pixels never bleed into visible edges.
pub fn resize_exact(
    image: RasterImage,
    target: (u32, u32),
    filter: FilterType,
) -> FramegenResult<RasterImage> {
    let (tw, th) = check_target(target)?;
    if image.dimensions() == (tw, th) {
        return Ok(image);
    }
    if image.has_alpha() {
        return RasterImage::from_rgba8(resize_premultiplied(image.into_rgba8(), (tw, th), filter));
    }
    RasterImage::from_dynamic(image.as_dynamic().resize_exact(tw, th, filter))
}

fn resize_premultiplied(mut img: RgbaImage, (tw, th): (u32, u32), filter: FilterType) -> RgbaImage {
    for px in img.pixels_mut() {
        px.0 = premultiply(px.0);
    }
    let mut out = imageops::resize(&img, tw, th, filter);
    for px in out.pixels_mut() {
        // Filter overshoot can leave a channel above its alpha.
        let [r, g, b, a] = px.0;
        px.0 = unpremultiply([r.min(a), g.min(a), b.min(a), a]);
    }
    out
}

/// Crop the centered `target` window out of `image`. `image` must be at least `target`.
pub fn center_crop(image: RasterImage, target: (u32, u32)) -> FramegenResult<RasterImage> {
    let (tw, th) = check_target(target)?;
    let (w, h) = image.dimensions();
    if (w, h) == (tw, th) {
        return Ok(image);
    }
    if w < tw || h < th {
        return Err(FramegenError::composition(format!(
            "center crop {tw}x{th} exceeds source {w}x{h}"
        )));
    }
    let left = (w - tw) / 2;
    let top = (h - th) / 2;
    RasterImage::from_dynamic(image.as_dynamic().crop_imm(left, top, tw, th))
}

fn check_target((w, h): (u32, u32)) -> FramegenResult<(u32, u32)> {
    if w == 0 || h == 0 {
        return Err(FramegenError::validation(format!(
            "target size must be non-zero, got {w}x{h}"
        )));
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resize.rs"]
mod tests;
