use crate::foundation::error::{BlockmotionError, BlockmotionResult};

pub use kurbo::{Point, Vec2};

/// Position in scene grid coordinates.
///
/// Grid units are abstract; the grid-to-pixel transform belongs to the
/// rendering collaborator.
pub type GridPos = Vec2;

/// Absolute 0-based frame index in timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> BlockmotionResult<Self> {
        if start.0 > end.0 {
            return Err(BlockmotionError::validation(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Return `true` when the two ranges share at least one frame.
    pub fn intersects(self, other: Self) -> bool {
        self.start.0 < other.end.0 && other.start.0 < self.end.0
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> BlockmotionResult<Self> {
        if den == 0 {
            return Err(BlockmotionError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BlockmotionError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert a duration in seconds to an exact frame count, rounding to the
    /// nearest frame.
    ///
    /// Negative, NaN or infinite durations are rejected with
    /// [`BlockmotionError::InvalidDuration`] at declaration time; frame counts
    /// themselves are always non-negative integers.
    pub fn secs_to_frames(self, secs: f64) -> BlockmotionResult<u64> {
        if !secs.is_finite() {
            return Err(BlockmotionError::invalid_duration(
                "duration seconds must be finite",
            ));
        }
        if secs < 0.0 {
            return Err(BlockmotionError::invalid_duration(
                "duration seconds must be >= 0",
            ));
        }
        Ok((secs * self.as_f64()).round() as u64)
    }
}

/// Straight (non-premultiplied) RGB color used for block and connection tint.
///
/// Opacity is animated separately per entity, so color stays a plain RGB
/// triple; compositing against a background is the renderer's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Default block/connection tint.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Main-chain / blue-set tint.
    pub const BLUE: Self = Self::new(0, 0, 255);
    /// Losing-fork / red-set tint.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Selected-parent connection tint.
    pub const GREEN: Self = Self::new(0, 255, 0);

    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
