use image::GrayImage;
use kurbo::{Ellipse, RoundedRect};
use rayon::prelude::*;

use crate::{
    composition::model::CropShape,
    foundation::{
        core::{Point, Rect},
        error::{FramegenError, FramegenResult},
    },
};

/// Corner radius of rounded shapes as a fraction of mask width.
pub const CORNER_RADIUS_RATIO: f64 = 0.10;

/// Sub-samples per axis when estimating edge coverage.
const SUPERSAMPLE: u32 = 4;

/// Rasterize a single-channel opacity mask covering the `(width, height)` box.
///
/// `Circle` is the inscribed ellipse; `Square` and `Rectangle` are the full box
/// with rounded corners of `radius` (default [`CORNER_RADIUS_RATIO`] of the width).
/// Interior pixels are 255, exterior pixels 0, edge pixels carry partial coverage.
pub fn make_mask(
    shape: CropShape,
    size: (u32, u32),
    radius: Option<f64>,
) -> FramegenResult<GrayImage> {
    let (w, h) = size;
    if w == 0 || h == 0 {
        return Err(FramegenError::validation(format!(
            "mask size must be non-zero, got {w}x{h}"
        )));
    }

    let bounds = Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
    let mut mask = GrayImage::new(w, h);
    match shape {
        CropShape::Circle => rasterize(&mut mask, &Ellipse::from_rect(bounds)),
        CropShape::Square | CropShape::Rectangle => {
            let r = radius
                .unwrap_or_else(|| (f64::from(w) * CORNER_RADIUS_RATIO).floor())
                .clamp(0.0, f64::from(w.min(h)) / 2.0);
            rasterize(&mut mask, &RoundedRect::from_rect(bounds, r));
        }
    }
    Ok(mask)
}

fn rasterize<S: kurbo::Shape + Sync>(mask: &mut GrayImage, shape: &S) {
    let row_len = mask.width() as usize;
    let total = SUPERSAMPLE * SUPERSAMPLE;
    let step = 1.0 / f64::from(SUPERSAMPLE);
    let buf: &mut [u8] = mask;

    buf.par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                let (x0, y0) = (x as f64, y as f64);
                let mut hits = 0u32;
                for sy in 0..SUPERSAMPLE {
                    for sx in 0..SUPERSAMPLE {
                        let p = Point::new(
                            x0 + (f64::from(sx) + 0.5) * step,
                            y0 + (f64::from(sy) + 0.5) * step,
                        );
                        if shape.contains(p) {
                            hits += 1;
                        }
                    }
                }
                *px = ((hits * 255 + total / 2) / total) as u8;
            }
        });
}

#[cfg(test)]
#[path = "../tests/unit/mask.rs"]
mod tests;
