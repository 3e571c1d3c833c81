//! Core data types for the speech-bubble pipeline.
//!
//! These types describe the requested overlay transform and the report of a
//! finished run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Placement of the speech bubble, as a quarter-turn of the overlay asset.
///
/// Numbering follows the command line: 1 keeps the bubble on the top,
/// 2 turns it to the left, 3 to the bottom and 4 to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// No rotation.
    #[default]
    Top = 1,
    /// Rotate 90 degrees counter-clockwise.
    Left = 2,
    /// Rotate 180 degrees.
    Bottom = 3,
    /// Rotate 270 degrees counter-clockwise (90 clockwise).
    Right = 4,
}

impl Orientation {
    /// All orientations in numeric order.
    pub const ALL: [Orientation; 4] = [
        Orientation::Top,
        Orientation::Left,
        Orientation::Bottom,
        Orientation::Right,
    ];

    /// The numeric value used on the command line.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Returns true if this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Orientation::Left | Orientation::Right)
    }
}

impl TryFrom<u8> for Orientation {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Orientation::Top),
            2 => Ok(Orientation::Left),
            3 => Ok(Orientation::Bottom),
            4 => Ok(Orientation::Right),
            other => Err(ConfigError::InvalidOrientation(other)),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Top => write!(f, "top"),
            Orientation::Left => write!(f, "left"),
            Orientation::Bottom => write!(f, "bottom"),
            Orientation::Right => write!(f, "right"),
        }
    }
}

/// Requested geometric transform for the overlay.
///
/// Mirroring is always applied before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformSpec {
    mirror: bool,
    orientation: Orientation,
}

impl TransformSpec {
    /// Create a transform from already-validated parts.
    pub fn new(mirror: bool, orientation: Orientation) -> Self {
        Self {
            mirror,
            orientation,
        }
    }

    /// Create a transform from a raw orientation number, rejecting values
    /// outside 1..=4.
    pub fn from_raw(mirror: bool, orientation: u8) -> Result<Self, ConfigError> {
        Ok(Self::new(mirror, Orientation::try_from(orientation)?))
    }

    pub fn mirror(&self) -> bool {
        self.mirror
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// True when the transform leaves the overlay untouched.
    pub fn is_identity(&self) -> bool {
        !self.mirror && self.orientation == Orientation::Top
    }
}

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Unvalidated,
    Validated,
    Loaded,
    Composited,
    Written,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Unvalidated => "unvalidated",
            Stage::Validated => "validated",
            Stage::Loaded => "loaded",
            Stage::Composited => "composited",
            Stage::Written => "written",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Per-stage wall clock timings in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageTimings {
    pub validate_ms: u64,
    pub load_ms: u64,
    pub composite_ms: u64,
    pub write_ms: u64,
}

impl StageTimings {
    pub fn total_ms(&self) -> u64 {
        self.validate_ms + self.load_ms + self.composite_ms + self.write_ms
    }
}

/// Report for a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedImage {
    /// Absolute path of the written file
    pub output_path: PathBuf,

    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Output format ("png", "jpeg", ...)
    pub format: String,

    /// Whether the alpha channel was flattened onto the background
    pub flattened: bool,

    /// Transform applied to the overlay
    pub transform: TransformSpec,

    /// Time spent in each stage
    pub timings: StageTimings,
}
