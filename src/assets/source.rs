use std::path::PathBuf;

use crate::foundation::core::RasterImage;

/// Where an input layer comes from. Resolved once by the loader into a [`RasterImage`].
#[derive(Clone, serde::Deserialize)]
#[serde(from = "String")]
pub enum ImageSource {
    /// Encoded image bytes (e.g. a multipart upload).
    Bytes(Vec<u8>),
    /// Base64 text, optionally carrying a `data:<mime>;base64,` prefix.
    Base64(String),
    /// Local filesystem path.
    Path(PathBuf),
    /// `http://` or `https://` URL.
    Url(String),
    /// Already-decoded raster.
    Raster(RasterImage),
}

impl ImageSource {
    /// Classify a textual locator: HTTP(S) URLs, `data:` URLs, otherwise a local path.
    pub fn from_locator(locator: &str) -> Self {
        let trimmed = locator.trim();
        if is_remote_url(trimmed) {
            Self::Url(trimmed.to_string())
        } else if trimmed.starts_with("data:") {
            Self::Base64(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Short label for logs; never includes payload bytes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Base64(_) => "base64",
            Self::Path(_) => "path",
            Self::Url(_) => "url",
            Self::Raster(_) => "raster",
        }
    }
}

impl From<String> for ImageSource {
    fn from(locator: String) -> Self {
        Self::from_locator(&locator)
    }
}

impl From<&str> for ImageSource {
    fn from(locator: &str) -> Self {
        Self::from_locator(locator)
    }
}

impl From<RasterImage> for ImageSource {
    fn from(raster: RasterImage) -> Self {
        Self::Raster(raster)
    }
}

impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes(b) => f.debug_struct("Bytes").field("len", &b.len()).finish(),
            Self::Base64(s) => f.debug_struct("Base64").field("len", &s.len()).finish(),
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Url(u) => f.debug_tuple("Url").field(u).finish(),
            Self::Raster(r) => f
                .debug_struct("Raster")
                .field("width", &r.width())
                .field("height", &r.height())
                .field("mode", &r.mode())
                .finish(),
        }
    }
}

pub(crate) fn is_remote_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
