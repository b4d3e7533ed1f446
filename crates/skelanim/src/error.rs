use thiserror::Error;

use crate::animation::TrackKind;

/// Error types for skeleton, bone table and clip loading
#[derive(Error, Debug)]
pub enum AnimationError {
    /// A keyframe track is empty or malformed
    #[error("Invalid {track} channel for bone '{bone}': {reason}")]
    InvalidChannel {
        bone: String,
        track: TrackKind,
        reason: String,
    },

    /// The same bone name was registered twice with different offset matrices
    #[error("Duplicate bone '{name}' with conflicting offset matrix")]
    DuplicateBone { name: String },

    /// More distinct bones than the output buffer can hold
    #[error("Bone count {count} exceeds capacity of {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },

    /// Clip has zero duration; playback time is frozen instead of wrapped
    #[error("Clip '{name}' has zero duration")]
    DegenerateClip { name: String },

    /// Clip metadata is unusable (negative or non-finite timing)
    #[error("Invalid clip '{name}': {reason}")]
    InvalidClip { name: String, reason: String },

    /// Skeleton hierarchy is deeper than the configured limit
    #[error("Skeleton depth {depth} exceeds limit of {limit}")]
    HierarchyTooDeep { depth: usize, limit: usize },

    /// A bone name was referenced that the skeleton does not contain
    #[error("Unknown bone '{name}'")]
    UnknownBone { name: String },

    /// I/O error while reading a scene description
    #[cfg(feature = "serde-support")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed scene description
    #[cfg(feature = "serde-support")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnimationError {
    /// Whether playback can continue after this error was reported
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateClip { .. })
    }
}

/// Result type using AnimationError
pub type Result<T> = std::result::Result<T, AnimationError>;
