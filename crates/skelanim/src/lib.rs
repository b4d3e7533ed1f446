//! Skeletal animation playback for skinned meshes
//!
//! Walks a bone hierarchy every frame, blends keyframes and produces the
//! bone matrix array consumed by a skinning shader. Asset parsing, windowing
//! and rendering are left to the caller.

pub mod animation;
pub mod config;
pub mod error;
#[cfg(feature = "serde-support")]
pub mod import;

// Re-export common types
pub use animation::{
    AnimationClip, AnimationEvaluator, BoneBindingTable, BoneChannel, BoneInfo, ClipData,
    Keyframe, NO_BONE_FILTER, PlaybackMode, SkeletonNode,
};
pub use config::{DEFAULT_MAX_BONES, DEFAULT_MAX_HIERARCHY_DEPTH, EvaluatorConfig};
pub use error::{AnimationError, Result};
#[cfg(feature = "serde-support")]
pub use import::{ImportOptions, Scene};

/// Math types used throughout the public API
pub use glam::{Mat4, Quat, Vec3};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
