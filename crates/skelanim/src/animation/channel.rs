//! Per-bone keyframe channels
//!
//! A [`BoneChannel`] holds the position, rotation and scale tracks of one bone
//! and turns them into a local transform matrix for any point in clip time.

use glam::{Mat4, Quat, Vec3};

use super::interpolation::sample_track;
use super::types::{Keyframe, TrackKind};
use crate::error::{AnimationError, Result};

/// Keyframe tracks for a single bone
#[derive(Debug, Clone)]
pub struct BoneChannel {
    name: String,
    positions: Vec<Keyframe<Vec3>>,
    rotations: Vec<Keyframe<Quat>>,
    scales: Vec<Keyframe<Vec3>>,
}

impl BoneChannel {
    /// Create a channel, validating every track
    ///
    /// Each track needs at least one keyframe, finite values and
    /// non-decreasing timestamps. Rotation keys are normalized here so that
    /// evaluation never has to.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Keyframe<Vec3>>,
        rotations: Vec<Keyframe<Quat>>,
        scales: Vec<Keyframe<Vec3>>,
    ) -> Result<Self> {
        let name = name.into();

        validate_track(&name, TrackKind::Position, &positions, |v| v.is_finite())?;
        validate_track(&name, TrackKind::Scale, &scales, |v| v.is_finite())?;
        validate_track(&name, TrackKind::Rotation, &rotations, |q| {
            q.is_finite() && q.length_squared() > f32::EPSILON
        })?;

        let rotations = rotations
            .into_iter()
            .map(|key| Keyframe::new(key.timestamp, key.value.normalize()))
            .collect();

        Ok(Self {
            name,
            positions,
            rotations,
            scales,
        })
    }

    /// Name of the animated bone
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Keyframe<Vec3>] {
        &self.positions
    }

    pub fn rotations(&self) -> &[Keyframe<Quat>] {
        &self.rotations
    }

    pub fn scales(&self) -> &[Keyframe<Vec3>] {
        &self.scales
    }

    /// Interpolated translation, rotation and scale at the given time
    pub fn sample(&self, time: f64) -> (Vec3, Quat, Vec3) {
        // Tracks are non-empty by construction
        let translation = sample_track(&self.positions, time).unwrap_or(Vec3::ZERO);
        let rotation = sample_track(&self.rotations, time).unwrap_or(Quat::IDENTITY);
        let scale = sample_track(&self.scales, time).unwrap_or(Vec3::ONE);
        (translation, rotation, scale)
    }

    /// Local transform at the given time, composed as translation * rotation * scale
    pub fn local_transform(&self, time: f64) -> Mat4 {
        let (translation, rotation, scale) = self.sample(time);
        Mat4::from_scale_rotation_translation(scale, rotation, translation)
    }

    /// Earliest and latest keyframe time over all three tracks
    pub fn time_range(&self) -> (f64, f64) {
        let firsts = [
            self.positions[0].timestamp,
            self.rotations[0].timestamp,
            self.scales[0].timestamp,
        ];
        let lasts = [
            self.positions[self.positions.len() - 1].timestamp,
            self.rotations[self.rotations.len() - 1].timestamp,
            self.scales[self.scales.len() - 1].timestamp,
        ];
        (
            firsts.into_iter().fold(f64::INFINITY, f64::min),
            lasts.into_iter().fold(f64::NEG_INFINITY, f64::max),
        )
    }
}

fn validate_track<T>(
    bone: &str,
    track: TrackKind,
    keys: &[Keyframe<T>],
    value_ok: impl Fn(&T) -> bool,
) -> Result<()> {
    let invalid = |reason: String| AnimationError::InvalidChannel {
        bone: bone.to_string(),
        track,
        reason,
    };

    if keys.is_empty() {
        return Err(invalid("no keyframes".to_string()));
    }

    let mut previous = f64::NEG_INFINITY;
    for (i, key) in keys.iter().enumerate() {
        if !key.timestamp.is_finite() {
            return Err(invalid(format!("keyframe {i} has a non-finite timestamp")));
        }
        if key.timestamp < previous {
            return Err(invalid(format!(
                "keyframe {i} at {} precedes previous keyframe at {previous}",
                key.timestamp
            )));
        }
        if !value_ok(&key.value) {
            return Err(invalid(format!("keyframe {i} has an unusable value")));
        }
        previous = key.timestamp;
    }

    Ok(())
}
