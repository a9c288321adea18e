use std::path::Path;

use anyhow::Context as _;

use crate::{
    assets::{decode, fetch::RemoteFetcher, source::ImageSource},
    config::LoaderOpts,
    foundation::{
        core::RasterImage,
        error::{FramegenError, FramegenResult},
    },
};

/// Resolves [`ImageSource`] values into normalized RGB/RGBA rasters.
///
/// This is the only place that touches the filesystem or network; compositors
/// receive rasters and never branch on where an image came from.
#[derive(Clone, Debug)]
pub struct Loader {
    opts: LoaderOpts,
    remote: RemoteFetcher,
}

impl Loader {
    pub fn new(opts: LoaderOpts) -> FramegenResult<Self> {
        let remote = RemoteFetcher::new(&opts)?;
        Ok(Self { opts, remote })
    }

    pub fn opts(&self) -> &LoaderOpts {
        &self.opts
    }

    /// Load and normalize one source.
    #[tracing::instrument(skip(self, source), fields(kind = source.kind()))]
    pub fn load(&self, source: ImageSource) -> FramegenResult<RasterImage> {
        let raster = match source {
            ImageSource::Bytes(bytes) => decode::decode_image(&bytes)?,
            ImageSource::Base64(text) => decode::decode_base64_image(&text)?,
            ImageSource::Path(path) => decode::decode_image(&read_local(&path)?)?,
            ImageSource::Url(url) => decode::decode_image(&self.remote.fetch(&url)?)?,
            ImageSource::Raster(raster) => RasterImage::normalized(raster.into_dynamic())?,
        };
        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            mode = raster.mode().as_str(),
            "loaded image"
        );
        Ok(raster)
    }
}

fn read_local(path: &Path) -> FramegenResult<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))
        .map_err(FramegenError::from)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
