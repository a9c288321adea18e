//! framegen composes campaign frames and posters with user photos.
//!
//! Two pipelines share one loader and one set of pixel primitives:
//!
//! - [`Compositor::overlay`]: photo stretched to a preset size with a frame on top (PNG)
//! - [`Compositor::compose_poster`]: poster background, shaped profile photo, frame (JPEG)
//!
//! Inputs arrive as [`ImageSource`] values and are normalized once by the
//! [`Loader`]; every failure surfaces as a [`FramegenError`].
#![forbid(unsafe_code)]

pub mod assets;
pub mod campaign;
pub mod composite;
pub mod composition;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod mask;
pub mod transform;

pub use crate::foundation::core::{ColorMode, RasterImage};
pub use crate::foundation::error::{FramegenError, FramegenResult};

pub use crate::assets::decode::{decode_base64_image, decode_image};
pub use crate::assets::loader::Loader;
pub use crate::assets::source::ImageSource;
pub use crate::campaign::{CampaignLayer, CampaignManifest, select_default, select_layer};
pub use crate::composite::pipeline::Compositor;
pub use crate::composition::model::{
    CropShape, FrameAdjust, OutputSize, OutputSizeSpec, ProfilePlacement, QuarterTurn,
};
pub use crate::config::{ComposeOpts, FramegenConfig, LoaderOpts};
pub use crate::encode::output::{CompositionResult, OutputFormat};
pub use crate::mask::make_mask;
pub use crate::transform::resize::{cover_crop, resize_and_crop};
