use image::{DynamicImage, GenericImageView, GrayImage, RgbImage, RgbaImage};

use crate::foundation::error::{FramegenError, FramegenResult};

pub use kurbo::{Affine, Point, Rect};

/// Pixel layout of a [`RasterImage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// 8-bit single channel, used for masks.
    Luma,
    /// 8-bit gray plus alpha.
    GrayAlpha,
    /// 8-bit opaque color.
    Rgb,
    /// 8-bit color with straight (non-premultiplied) alpha.
    Rgba,
}

impl ColorMode {
    /// Whether this layout carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::GrayAlpha | Self::Rgba)
    }

    /// Short mode name (`L`, `LA`, `RGB`, `RGBA`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Luma => "L",
            Self::GrayAlpha => "LA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

/// Decoded in-memory raster with a known 8-bit layout and non-zero dimensions.
///
/// Values are request-scoped: each pipeline stage takes ownership and hands a new
/// raster to the next stage.
#[derive(Clone, Debug)]
pub struct RasterImage {
    inner: DynamicImage,
    mode: ColorMode,
}

impl RasterImage {
    /// Wrap a decoded image, rejecting empty rasters and non-8-bit layouts.
    ///
    /// Use [`RasterImage::normalized`] to accept 16-bit and float inputs.
    pub fn from_dynamic(inner: DynamicImage) -> FramegenResult<Self> {
        let (width, height) = inner.dimensions();
        if width == 0 || height == 0 {
            return Err(FramegenError::validation(format!(
                "raster must be non-empty, got {width}x{height}"
            )));
        }
        let mode = match &inner {
            DynamicImage::ImageLuma8(_) => ColorMode::Luma,
            DynamicImage::ImageLumaA8(_) => ColorMode::GrayAlpha,
            DynamicImage::ImageRgb8(_) => ColorMode::Rgb,
            DynamicImage::ImageRgba8(_) => ColorMode::Rgba,
            other => {
                return Err(FramegenError::unsupported_format(format!(
                    "pixel layout {:?} is not an 8-bit L/LA/RGB/RGBA layout",
                    other.color()
                )));
            }
        };
        Ok(Self { inner, mode })
    }

    /// Normalize any decoded image to RGB (opaque sources) or RGBA (sources with alpha).
    pub fn normalized(inner: DynamicImage) -> FramegenResult<Self> {
        let (width, height) = inner.dimensions();
        if width == 0 || height == 0 {
            return Err(FramegenError::validation(format!(
                "raster must be non-empty, got {width}x{height}"
            )));
        }
        let out = match inner {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => inner,
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgb8(inner.to_rgb8()),
            DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgba16(_)
            | DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba8(inner.to_rgba8()),
            other => {
                return Err(FramegenError::unsupported_format(format!(
                    "cannot normalize pixel layout {:?}",
                    other.color()
                )));
            }
        };
        Self::from_dynamic(out)
    }

    /// Wrap an RGBA8 buffer.
    pub fn from_rgba8(img: RgbaImage) -> FramegenResult<Self> {
        Self::from_dynamic(DynamicImage::ImageRgba8(img))
    }

    /// Wrap an RGB8 buffer.
    pub fn from_rgb8(img: RgbImage) -> FramegenResult<Self> {
        Self::from_dynamic(DynamicImage::ImageRgb8(img))
    }

    /// Wrap a single-channel mask buffer.
    pub fn from_luma8(img: GrayImage) -> FramegenResult<Self> {
        Self::from_dynamic(DynamicImage::ImageLuma8(img))
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn has_alpha(&self) -> bool {
        self.mode.has_alpha()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.inner
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.inner
    }

    /// Copy into RGBA8; sources without alpha become fully opaque.
    pub fn to_rgba8(&self) -> RgbaImage {
        self.inner.to_rgba8()
    }

    /// Convert into RGBA8, reusing the buffer when already RGBA.
    pub fn into_rgba8(self) -> RgbaImage {
        self.inner.into_rgba8()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
