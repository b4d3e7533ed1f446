//! Skeletal animation playback
//!
//! This module provides everything between imported animation data and the
//! bone matrix array a skinning shader consumes:
//! - Keyframe interpolation (linear for position/scale, slerp for rotation)
//! - Per-bone channels producing local transforms
//! - The skeleton hierarchy and the bone binding table
//! - Clips and the per-frame evaluator with single-bone isolation
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use skelanim::animation::{AnimationClip, AnimationEvaluator, BoneBindingTable};
//! use skelanim::EvaluatorConfig;
//!
//! let config = EvaluatorConfig::default();
//! let bindings = Arc::new(BoneBindingTable::from_bones(bones, config.max_bones)?);
//! let clip = Arc::new(AnimationClip::from_data(clip_data, skeleton)?);
//!
//! let mut evaluator = AnimationEvaluator::new(bindings, config)?;
//! evaluator.set_active_clip(clip)?;
//! evaluator.set_playback_enabled(true);
//!
//! // Once per frame
//! evaluator.update(delta_seconds);
//! upload(evaluator.bone_matrices());
//! ```

mod binding;
mod channel;
mod clip;
mod evaluator;
mod interpolation;
mod skeleton;
mod state;
mod types;

pub use binding::{BoneBindingTable, BoneInfo};
pub use channel::BoneChannel;
pub use clip::{AnimationClip, ChannelData, ClipData};
pub use evaluator::AnimationEvaluator;
pub use interpolation::{blend_factor, find_keyframe_index, sample_track};
pub use skeleton::{PreOrder, SkeletonNode};
pub use state::{NO_BONE_FILTER, PlaybackMode, PlaybackState};
pub use types::{Keyframe, Lerp, TrackKind};
