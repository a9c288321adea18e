use crate::foundation::error::{FramegenError, FramegenResult};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case", from = "String")]
/// Named output presets of the two-layer pipeline.
pub enum OutputSize {
    /// 1080x1080.
    #[default]
    InstagramPost,
    /// 1080x1920.
    InstagramStory,
    /// 500x500.
    WhatsappDp,
}

impl OutputSize {
    /// Every preset, in documentation order.
    pub const ALL: [OutputSize; 3] = [
        OutputSize::InstagramPost,
        OutputSize::InstagramStory,
        OutputSize::WhatsappDp,
    ];

    /// Pixel `(width, height)` of the preset.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::InstagramPost => (1080, 1080),
            Self::InstagramStory => (1080, 1920),
            Self::WhatsappDp => (500, 500),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::InstagramPost => "instagram_post",
            Self::InstagramStory => "instagram_story",
            Self::WhatsappDp => "whatsapp_dp",
        }
    }

    /// Exact lookup; `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Lookup that falls back to [`OutputSize::InstagramPost`] for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(name, "unknown output size, using instagram_post");
            Self::default()
        })
    }
}

impl From<String> for OutputSize {
    fn from(name: String) -> Self {
        Self::from_name_or_default(&name)
    }
}

/// How a pipeline picks its output canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputSizeSpec {
    /// Fixed preset dimensions (two-layer pipeline).
    Preset(OutputSize),
    /// Use the poster's native dimensions (three-layer pipeline).
    InheritFromPoster,
}

impl OutputSizeSpec {
    /// Resolve to pixel dimensions; `poster` is required for [`OutputSizeSpec::InheritFromPoster`].
    pub fn resolve(self, poster: Option<(u32, u32)>) -> FramegenResult<(u32, u32)> {
        match (self, poster) {
            (Self::Preset(size), _) => Ok(size.dimensions()),
            (Self::InheritFromPoster, Some(dims)) => Ok(dims),
            (Self::InheritFromPoster, None) => Err(FramegenError::validation(
                "output size inherits from the poster but no poster was given",
            )),
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case", from = "String")]
/// Shape the profile photo is cropped to in the three-layer pipeline.
pub enum CropShape {
    /// Ellipse inscribed in a square footprint.
    #[default]
    Circle,
    /// Rounded square footprint.
    Square,
    /// Rounded portrait rectangle footprint (height = 1.3 x width).
    Rectangle,
}

impl CropShape {
    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Rectangle => "rectangle",
        }
    }

    /// Lenient lookup: anything unrecognized is treated as a circle.
    pub fn from_name(name: &str) -> Self {
        match name {
            "circle" => Self::Circle,
            "square" => Self::Square,
            "rectangle" => Self::Rectangle,
            other => {
                tracing::warn!(shape = other, "unknown crop shape, using circle");
                Self::Circle
            }
        }
    }
}

impl From<String> for CropShape {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Where and how the profile photo lands on the poster.
///
/// No bounds are enforced: placements off-canvas or larger than the poster are
/// accepted and simply clip when composited.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProfilePlacement {
    /// Footprint center x in canvas pixels; `None` means canvas center.
    #[serde(alias = "x")]
    pub center_x: Option<i32>,
    /// Footprint center y in canvas pixels; `None` means canvas center.
    #[serde(alias = "y")]
    pub center_y: Option<i32>,
    /// Multiplier on the base footprint (30% of the poster's short side).
    pub scale: f64,
    /// Counter-clockwise rotation about the footprint center.
    #[serde(alias = "rotation")]
    pub rotation_degrees: f64,
    #[serde(alias = "shape")]
    pub crop_shape: CropShape,
}

impl Default for ProfilePlacement {
    fn default() -> Self {
        Self {
            center_x: None,
            center_y: None,
            scale: 1.0,
            rotation_degrees: 0.0,
            crop_shape: CropShape::Circle,
        }
    }
}

impl ProfilePlacement {
    /// Placement centered at `(x, y)` with default scale/rotation/shape.
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            center_x: Some(x),
            center_y: Some(y),
            ..Self::default()
        }
    }

    /// Center point on a canvas of `canvas` dimensions.
    pub fn resolved_center(&self, canvas: (u32, u32)) -> (i64, i64) {
        (
            self.center_x.map_or(i64::from(canvas.0 / 2), i64::from),
            self.center_y.map_or(i64::from(canvas.1 / 2), i64::from),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i32", into = "i32")]
/// Frame rotation restricted to quarter turns (counter-clockwise).
pub enum QuarterTurn {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl QuarterTurn {
    /// Accept any multiple of 90, normalized modulo 360.
    pub fn from_degrees(degrees: i32) -> FramegenResult<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::R0),
            90 => Ok(Self::R90),
            180 => Ok(Self::R180),
            270 => Ok(Self::R270),
            _ => Err(FramegenError::validation(format!(
                "frame rotation must be a multiple of 90 degrees, got {degrees}"
            ))),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }
}

impl TryFrom<i32> for QuarterTurn {
    type Error = FramegenError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<QuarterTurn> for i32 {
    fn from(turn: QuarterTurn) -> Self {
        turn.degrees()
    }
}

/// Per-generation frame tweaks for the two-layer pipeline. Default is identity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameAdjust {
    pub rotation: QuarterTurn,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Multiplier on frame alpha, clamped to `[0, 1]`.
    pub opacity: f32,
}

impl Default for FrameAdjust {
    fn default() -> Self {
        Self {
            rotation: QuarterTurn::R0,
            flip_h: false,
            flip_v: false,
            opacity: 1.0,
        }
    }
}

impl FrameAdjust {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
