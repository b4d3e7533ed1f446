//! Animation clips
//!
//! A clip groups the bone channels of one animation with its timing and the
//! skeleton it plays over. Every channel is validated when the clip is built;
//! a clip that exists is always safe to evaluate.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Quat, Vec3};
use log::{debug, warn};

use super::channel::BoneChannel;
use super::skeleton::SkeletonNode;
use super::types::{Keyframe, TrackKind};
use crate::error::{AnimationError, Result};

/// Raw keyframe tracks for one bone, as handed over by an asset importer
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelData {
    pub bone: String,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub positions: Vec<Keyframe<Vec3>>,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub rotations: Vec<Keyframe<Quat>>,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub scales: Vec<Keyframe<Vec3>>,
}

/// Raw animation data, as handed over by an asset importer
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipData {
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub name: String,
    pub ticks_per_second: f64,
    pub duration_in_ticks: f64,
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub channels: Vec<ChannelData>,
}

/// A validated animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    name: String,
    ticks_per_second: f64,
    duration_in_ticks: f64,
    channels: Vec<BoneChannel>,
    channel_index: HashMap<String, usize>,
    root: Arc<SkeletonNode>,
}

impl AnimationClip {
    /// Build a clip from already constructed channels
    pub fn new(
        name: impl Into<String>,
        ticks_per_second: f64,
        duration_in_ticks: f64,
        channels: Vec<BoneChannel>,
        root: Arc<SkeletonNode>,
    ) -> Result<Self> {
        let name = name.into();

        if !ticks_per_second.is_finite() || ticks_per_second < 0.0 {
            return Err(AnimationError::InvalidClip {
                name,
                reason: format!("ticks per second must be finite and >= 0, got {ticks_per_second}"),
            });
        }
        if !duration_in_ticks.is_finite() || duration_in_ticks < 0.0 {
            return Err(AnimationError::InvalidClip {
                name,
                reason: format!("duration must be finite and >= 0, got {duration_in_ticks}"),
            });
        }

        let mut channel_index = HashMap::with_capacity(channels.len());
        for (i, channel) in channels.iter().enumerate() {
            if channel_index.insert(channel.name().to_string(), i).is_some() {
                return Err(AnimationError::InvalidChannel {
                    bone: channel.name().to_string(),
                    track: TrackKind::Position,
                    reason: format!("clip '{name}' has more than one channel for this bone"),
                });
            }
        }

        let clip = Self {
            name,
            ticks_per_second,
            duration_in_ticks,
            channels,
            channel_index,
            root,
        };

        if let Err(e) = clip.check_duration() {
            warn!("{e}; playback time will stay frozen");
        }
        debug!(
            "Loaded clip '{}': {} channels, {} ticks at {} ticks/s",
            clip.name,
            clip.channels.len(),
            clip.duration_in_ticks,
            clip.ticks_per_second
        );

        Ok(clip)
    }

    /// Build a clip from importer data, validating every channel
    pub fn from_data(data: ClipData, root: Arc<SkeletonNode>) -> Result<Self> {
        let channels = data
            .channels
            .into_iter()
            .map(|c| BoneChannel::new(c.bone, c.positions, c.rotations, c.scales))
            .collect::<Result<Vec<_>>>()?;

        Self::new(
            data.name,
            data.ticks_per_second,
            data.duration_in_ticks,
            channels,
            root,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }

    pub fn duration_in_ticks(&self) -> f64 {
        self.duration_in_ticks
    }

    /// Clip length in seconds, zero when the clip never advances
    pub fn duration_in_seconds(&self) -> f64 {
        if self.ticks_per_second > 0.0 {
            self.duration_in_ticks / self.ticks_per_second
        } else {
            0.0
        }
    }

    /// Whether the clip has zero duration
    pub fn is_degenerate(&self) -> bool {
        self.duration_in_ticks <= 0.0
    }

    /// Report a zero-duration clip
    ///
    /// Not fatal: the evaluator freezes time for such clips.
    pub fn check_duration(&self) -> Result<()> {
        if self.is_degenerate() {
            return Err(AnimationError::DegenerateClip {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Skeleton the clip is played over
    pub fn root(&self) -> &SkeletonNode {
        &self.root
    }

    /// Shared handle to the skeleton
    pub fn skeleton(&self) -> Arc<SkeletonNode> {
        Arc::clone(&self.root)
    }

    /// Channel animating the given bone, if any
    pub fn channel(&self, bone: &str) -> Option<&BoneChannel> {
        self.channel_index.get(bone).map(|&i| &self.channels[i])
    }

    /// Channels in load order
    pub fn channels(&self) -> &[BoneChannel] {
        &self.channels
    }

    /// Names of the bones that carry keyframes, in load order
    pub fn keyframed_bones(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(BoneChannel::name)
    }
}
