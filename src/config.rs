use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context as _;

use crate::foundation::error::{FramegenError, FramegenResult};

/// Options for resolving [`crate::ImageSource`] values.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoaderOpts {
    /// Upper bound for one remote fetch, connect through body.
    pub fetch_timeout_ms: u64,
    /// `User-Agent` header sent with remote fetches.
    pub user_agent: String,
}

impl LoaderOpts {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for LoaderOpts {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 30_000,
            user_agent: format!("framegen/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Options shared by both compositors.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComposeOpts {
    /// JPEG quality (1..=100) for the three-layer output.
    pub jpeg_quality: u8,
    /// Opaque color the three-layer canvas is flattened onto before JPEG encoding.
    pub background_rgb: [u8; 3],
}

impl ComposeOpts {
    pub fn validate(&self) -> FramegenResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(FramegenError::validation(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            background_rgb: [255, 255, 255],
        }
    }
}

/// Full runtime configuration, typically read from a JSON file.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FramegenConfig {
    pub loader: LoaderOpts,
    pub compose: ComposeOpts,
}

impl FramegenConfig {
    /// Read and validate a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> FramegenResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        cfg.compose.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
