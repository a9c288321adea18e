use base64::Engine as _;

use crate::foundation::{
    core::RasterImage,
    error::{FramegenError, FramegenResult},
};

/// Decode encoded image bytes and normalize to RGB or RGBA.
pub fn decode_image(bytes: &[u8]) -> FramegenResult<RasterImage> {
    if bytes.is_empty() {
        return Err(FramegenError::decode("image payload is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FramegenError::decode(format!("decode image from memory: {e}")))?;
    RasterImage::normalized(dyn_img)
}

/// Decode base64 image text. Anything up to and including the first comma is
/// treated as a data-URL prefix and dropped.
pub fn decode_base64_image(data: &str) -> FramegenResult<RasterImage> {
    let bytes = decode_base64_payload(data)?;
    decode_image(&bytes)
}

pub(crate) fn decode_base64_payload(data: &str) -> FramegenResult<Vec<u8>> {
    let payload = strip_data_url_prefix(data);
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| FramegenError::decode(format!("invalid base64 image data: {e}")))
}

pub(crate) fn strip_data_url_prefix(data: &str) -> &str {
    match data.split_once(',') {
        Some((_, rest)) => rest,
        None => data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
