use std::io::Cursor;

use image::{
    ExtendedColorType, ImageEncoder as _, RgbImage, RgbaImage,
    codecs::{
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType as PngFilter, PngEncoder},
    },
};

use crate::foundation::error::{FramegenError, FramegenResult};

/// Encoded container of a [`CompositionResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless, keeps transparency (two-layer output).
    Png,
    /// Lossy, opaque (three-layer output).
    Jpeg,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// One finished composition: encoded bytes plus what a blob store needs to file them.
#[derive(Clone)]
pub struct CompositionResult {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    /// Random unique `<32 hex>.<ext>` name; the core never writes to a fixed path.
    pub suggested_filename: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl CompositionResult {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Encode an RGBA canvas as PNG.
    pub fn png(canvas: &RgbaImage) -> FramegenResult<Self> {
        let bytes = encode_png(canvas)?;
        Ok(Self::new(bytes, OutputFormat::Png, canvas.dimensions()))
    }

    /// Encode an opaque canvas as JPEG at `quality` (1..=100).
    pub fn jpeg(canvas: &RgbImage, quality: u8) -> FramegenResult<Self> {
        let bytes = encode_jpeg(canvas, quality)?;
        Ok(Self::new(bytes, OutputFormat::Jpeg, canvas.dimensions()))
    }

    fn new(bytes: Vec<u8>, format: OutputFormat, (width, height): (u32, u32)) -> Self {
        tracing::debug!(
            format = format.extension(),
            bytes = bytes.len(),
            width,
            height,
            "encoded composition"
        );
        Self {
            bytes,
            format,
            suggested_filename: synthetic_filename(format),
            width,
            height,
        }
    }
}

impl std::fmt::Debug for CompositionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositionResult")
            .field("bytes_len", &self.bytes.len())
            .field("format", &self.format)
            .field("suggested_filename", &self.suggested_filename)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Collision-free output name built from a random v4 UUID.
pub fn synthetic_filename(format: OutputFormat) -> String {
    format!("{}.{}", uuid::Uuid::new_v4().simple(), format.extension())
}

pub fn encode_png(canvas: &RgbaImage) -> FramegenResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(Cursor::new(&mut buf), CompressionType::Best, PngFilter::Adaptive)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| FramegenError::composition(format!("encode png: {e}")))?;
    Ok(buf)
}

pub fn encode_jpeg(canvas: &RgbImage, quality: u8) -> FramegenResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(FramegenError::validation(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| FramegenError::composition(format!("encode jpeg: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;
