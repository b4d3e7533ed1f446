//! Common types for the keyframe animation system

use std::fmt;

use glam::{Quat, Vec3};

/// A timestamped sample of one transform component
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe<T> {
    /// Time of the sample in clip ticks
    #[cfg_attr(feature = "serde-support", serde(alias = "time"))]
    pub timestamp: f64,
    /// Sampled value
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Create a new keyframe
    pub const fn new(timestamp: f64, value: T) -> Self {
        Self { timestamp, value }
    }
}

/// Which of the three per-bone tracks a keyframe sequence belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Position,
    Rotation,
    Scale,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Position => "position",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
        };
        f.write_str(name)
    }
}

/// Trait for types that can be interpolated between two keyframes
pub trait Lerp: Clone {
    /// Interpolation between self and other
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::lerp(*self, *other, t)
    }
}

impl Lerp for Quat {
    /// Shortest-arc spherical interpolation
    fn lerp(&self, other: &Self, t: f32) -> Self {
        // glam's slerp flips `other` when the dot product is negative
        self.slerp(*other, t).normalize()
    }
}
