use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    assets::source::ImageSource,
    foundation::error::{FramegenError, FramegenResult},
};

/// One frame or poster image registered for a campaign.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct CampaignLayer {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Marks the layer shown when the caller does not pick one.
    #[serde(default)]
    pub is_default: bool,
    /// Display order; lower first. Ties keep declaration order.
    #[serde(default)]
    pub order: i32,
    /// Locator string: `http(s)://` URL, `data:` URL, or local path.
    pub source: ImageSource,
}

/// Registry record for a campaign, as exported to JSON.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct CampaignManifest {
    pub name: String,
    /// Short unique code end users type or scan.
    pub code: String,
    #[serde(default)]
    pub frames: Vec<CampaignLayer>,
    #[serde(default)]
    pub posters: Vec<CampaignLayer>,
}

impl CampaignManifest {
    pub fn from_path(path: &Path) -> FramegenResult<Self> {
        let f = File::open(path).with_context(|| format!("open campaign '{}'", path.display()))?;
        let manifest: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse campaign JSON '{}'", path.display()))?;
        Ok(manifest)
    }

    /// Frame with `requested_id`, else the default frame.
    pub fn frame(&self, requested_id: Option<u64>) -> FramegenResult<&CampaignLayer> {
        select_layer(&self.frames, requested_id).ok_or_else(|| {
            FramegenError::validation(format!("campaign '{}' has no frames", self.code))
        })
    }

    /// Poster with `requested_id`, else the default poster.
    pub fn poster(&self, requested_id: Option<u64>) -> FramegenResult<&CampaignLayer> {
        select_layer(&self.posters, requested_id).ok_or_else(|| {
            FramegenError::validation(format!("campaign '{}' has no posters", self.code))
        })
    }
}

/// First layer flagged default in display order, else the first in display order.
pub fn select_default(layers: &[CampaignLayer]) -> Option<&CampaignLayer> {
    let mut ordered: Vec<&CampaignLayer> = layers.iter().collect();
    ordered.sort_by_key(|l| l.order);
    ordered
        .iter()
        .find(|l| l.is_default)
        .or_else(|| ordered.first())
        .copied()
}

/// The layer with `requested_id` if it exists; otherwise the default layer.
///
/// A stale or unknown id is not an error.
pub fn select_layer(layers: &[CampaignLayer], requested_id: Option<u64>) -> Option<&CampaignLayer> {
    if let Some(id) = requested_id {
        if let Some(layer) = layers.iter().find(|l| l.id == id) {
            return Some(layer);
        }
        tracing::warn!(requested_id = id, "requested layer not found, using default");
    }
    select_default(layers)
}

#[cfg(test)]
#[path = "../tests/unit/campaign.rs"]
mod tests;
