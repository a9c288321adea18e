use image::{GrayImage, RgbImage, RgbaImage};
use rayon::prelude::*;

use crate::foundation::error::{FramegenError, FramegenResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    match px[3] {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => [
            mul_div255(u16::from(px[0]), a),
            mul_div255(u16::from(px[1]), a),
            mul_div255(u16::from(px[2]), a),
            px[3],
        ],
    }
}

pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    match px[3] {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

/// Source-over on straight-alpha pixels. Fully transparent sources leave `dst`
/// bit-identical and fully opaque sources replace it.
pub fn over_straight(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    if src[3] == 0 || opacity <= 0.0 {
        return dst;
    }
    if src[3] == 255 && opacity >= 1.0 {
        return src;
    }
    unpremultiply(over(premultiply(dst), premultiply(src), opacity))
}

/// Composite `layer` over `canvas` with its top-left corner at `(x, y)`, using the
/// layer's own alpha as the blend mask. Any part outside the canvas is clipped.
pub fn paste_over(canvas: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64, opacity: f32) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (lw, lh) = (i64::from(layer.width()), i64::from(layer.height()));

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + lw).min(cw);
    let y_end = (y + lh).min(ch);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let row_len = canvas.width() as usize * 4;
    let dst: &mut [u8] = canvas;
    dst.par_chunks_exact_mut(row_len)
        .enumerate()
        .skip(y_start as usize)
        .take((y_end - y_start) as usize)
        .for_each(|(cy, row)| {
            let ly = (cy as i64 - y) as u32;
            for cx in x_start..x_end {
                let lx = (cx - x) as u32;
                let src = layer.get_pixel(lx, ly).0;
                let off = cx as usize * 4;
                let d = &mut row[off..off + 4];
                let out = over_straight([d[0], d[1], d[2], d[3]], src, opacity);
                d.copy_from_slice(&out);
            }
        });
}

/// Composite a full-canvas layer of identical size over `canvas`.
pub fn over_in_place(canvas: &mut RgbaImage, layer: &RgbaImage, opacity: f32) {
    paste_over(canvas, layer, 0, 0, opacity);
}

/// Set the alpha of `layer` to `mask`, attenuated by the alpha already present.
///
/// Callers pass layers whose alpha is pure geometric coverage (opaque content, with
/// transparency only where a rotation clipped it), so an unrotated layer ends up
/// with exactly the mask as its alpha.
pub fn apply_mask(layer: &mut RgbaImage, mask: &GrayImage) -> FramegenResult<()> {
    if layer.dimensions() != mask.dimensions() {
        return Err(FramegenError::composition(format!(
            "mask {:?} does not match layer {:?}",
            mask.dimensions(),
            layer.dimensions()
        )));
    }
    for (px, m) in layer.pixels_mut().zip(mask.pixels()) {
        px.0[3] = mul_div255(u16::from(px.0[3]), u16::from(m.0[0]));
    }
    Ok(())
}

/// Flatten `canvas` onto an opaque background color, dropping alpha.
pub fn flatten_onto(canvas: &RgbaImage, background: [u8; 3]) -> RgbImage {
    let bg = [background[0], background[1], background[2], 255];
    let mut out = RgbImage::new(canvas.width(), canvas.height());
    for (o, c) in out.pixels_mut().zip(canvas.pixels()) {
        let px = over_straight(bg, c.0, 1.0);
        o.0 = [px[0], px[1], px[2]];
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
