use crate::{
    assets::{loader::Loader, source::ImageSource},
    composite::{blend, overlay, poster},
    composition::model::{FrameAdjust, OutputSize, ProfilePlacement},
    config::{ComposeOpts, FramegenConfig},
    encode::output::CompositionResult,
    foundation::{core::RasterImage, error::FramegenResult},
};

/// Entry point for both pipelines: resolves sources through a [`Loader`], runs
/// the pixel work, and encodes one [`CompositionResult`].
///
/// Stateless between calls; one instance can serve concurrent callers. Every
/// failure comes back as [`crate::FramegenError::Composition`] whose
/// [`root_cause`](crate::FramegenError::root_cause) is the original error.
#[derive(Clone, Debug)]
pub struct Compositor {
    loader: Loader,
    opts: ComposeOpts,
}

impl Compositor {
    pub fn new(loader: Loader, opts: ComposeOpts) -> FramegenResult<Self> {
        opts.validate()?;
        Ok(Self { loader, opts })
    }

    /// Build loader and compositor from one config value.
    pub fn from_config(cfg: &FramegenConfig) -> FramegenResult<Self> {
        Self::new(Loader::new(cfg.loader.clone())?, cfg.compose.clone())
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn opts(&self) -> &ComposeOpts {
        &self.opts
    }

    /// Two-layer overlay to a named preset; unknown names fall back to
    /// `instagram_post`. Output is PNG.
    pub fn overlay(
        &self,
        photo: ImageSource,
        frame: ImageSource,
        output_size_name: &str,
    ) -> FramegenResult<CompositionResult> {
        self.overlay_adjusted(
            photo,
            frame,
            OutputSize::from_name_or_default(output_size_name),
            &FrameAdjust::default(),
        )
    }

    /// Two-layer overlay with frame rotation/flip/opacity adjustments.
    #[tracing::instrument(skip(self, photo, frame), fields(size = size.name()))]
    pub fn overlay_adjusted(
        &self,
        photo: ImageSource,
        frame: ImageSource,
        size: OutputSize,
        adjust: &FrameAdjust,
    ) -> FramegenResult<CompositionResult> {
        let photo = self.load(photo, "load photo")?;
        let frame = self.load(frame, "load frame")?;
        let canvas = overlay::overlay_images(photo, frame, size, adjust)
            .map_err(|e| e.in_stage("overlay frame"))?;
        CompositionResult::png(&canvas).map_err(|e| e.in_stage("encode overlay"))
    }

    /// Three-layer poster: poster background, placed and masked profile photo,
    /// frame on top; flattened onto the background color and encoded as JPEG.
    /// The output always has the poster's native dimensions.
    #[tracing::instrument(
        skip(self, poster, profile, frame),
        fields(shape = placement.crop_shape.name(), scale = placement.scale)
    )]
    pub fn compose_poster(
        &self,
        poster: ImageSource,
        profile: ImageSource,
        frame: ImageSource,
        placement: &ProfilePlacement,
    ) -> FramegenResult<CompositionResult> {
        let poster = self.load(poster, "load poster")?;
        let profile = self.load(profile, "load profile")?;
        let frame = self.load(frame, "load frame")?;

        let canvas = poster::compose_poster_images(poster, profile, frame, placement)
            .map_err(|e| e.in_stage("compose poster"))?;
        let flat = blend::flatten_onto(&canvas, self.opts.background_rgb);
        CompositionResult::jpeg(&flat, self.opts.jpeg_quality)
            .map_err(|e| e.in_stage("encode poster"))
    }

    fn load(&self, source: ImageSource, stage: &str) -> FramegenResult<RasterImage> {
        self.loader.load(source).map_err(|e| e.in_stage(stage))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pipeline.rs"]
mod tests;
