use image::RgbaImage;
use rayon::prelude::*;

use crate::foundation::core::{Affine, Point};

/// Rotate counter-clockwise by `degrees` about the image center, keeping the
/// original canvas size. Content leaving the canvas is clipped; vacated pixels
/// are fully transparent. Sampling is bilinear in premultiplied space.
pub fn rotate_about_center(src: &RgbaImage, degrees: f64) -> RgbaImage {
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 || !degrees.is_finite() || degrees.rem_euclid(360.0) == 0.0 {
        return src.clone();
    }

    let center = Point::new(f64::from(w) / 2.0, f64::from(h) / 2.0);
    // In y-down pixel space a positive kurbo rotation turns clockwise, so mapping
    // destination back to source uses +degrees for a counter-clockwise result.
    let dst_to_src = Affine::rotate_about(degrees.to_radians(), center);

    let mut out = RgbaImage::new(w, h);
    let row_len = w as usize * 4;
    let dst: &mut [u8] = &mut out;
    dst.par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let p = dst_to_src * Point::new(x as f64 + 0.5, y as f64 + 0.5);
                px.copy_from_slice(&sample_bilinear(src, p.x - 0.5, p.y - 0.5));
            }
        });
    out
}

fn sample_bilinear(src: &RgbaImage, fx: f64, fy: f64) -> [u8; 4] {
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - tx) * (1.0 - ty)),
        (x0 + 1, y0, tx * (1.0 - ty)),
        (x0, y0 + 1, (1.0 - tx) * ty),
        (x0 + 1, y0 + 1, tx * ty),
    ];

    let mut acc = [0.0f64; 4];
    for (x, y, wgt) in taps {
        if wgt <= 0.0 {
            continue;
        }
        let Some(px) = texel(src, x, y) else {
            continue;
        };
        let a = f64::from(px[3]) / 255.0;
        acc[0] += f64::from(px[0]) * a * wgt;
        acc[1] += f64::from(px[1]) * a * wgt;
        acc[2] += f64::from(px[2]) * a * wgt;
        acc[3] += a * wgt;
    }

    if acc[3] <= 0.0 {
        return [0, 0, 0, 0];
    }
    let alpha = acc[3].min(1.0);
    [
        to_u8(acc[0] / acc[3]),
        to_u8(acc[1] / acc[3]),
        to_u8(acc[2] / acc[3]),
        to_u8(alpha * 255.0),
    ]
}

fn texel(src: &RgbaImage, x: i64, y: i64) -> Option<[u8; 4]> {
    if x < 0 || y < 0 || x >= i64::from(src.width()) || y >= i64::from(src.height()) {
        return None;
    }
    Some(src.get_pixel(x as u32, y as u32).0)
}

fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/transform/rotate.rs"]
mod tests;
