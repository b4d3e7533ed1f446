//! Playback state tracking for the evaluator

/// Sentinel bone name that disables single-bone isolation
pub const NO_BONE_FILTER: &str = "None";

/// Observable playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode<'a> {
    /// Time does not advance and every bone holds its bind pose
    Stopped,
    /// Every keyframed bone is evaluated
    Playing,
    /// Only the named bone is evaluated, the rest hold their bind pose
    Isolated(&'a str),
}

/// Represents the current playback state
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    /// Current time within the active clip (ticks)
    pub current_time: f64,
    /// Whether time advances and channels are evaluated
    pub playing: bool,
    /// Bone whose channel is evaluated exclusively while playing
    pub single_bone: Option<String>,
}

impl PlaybackState {
    /// Create a stopped state at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the playback time to the beginning
    pub fn reset_time(&mut self) {
        self.current_time = 0.0;
    }

    pub fn mode(&self) -> PlaybackMode<'_> {
        match (self.playing, self.single_bone.as_deref()) {
            (false, _) => PlaybackMode::Stopped,
            (true, None) => PlaybackMode::Playing,
            (true, Some(bone)) => PlaybackMode::Isolated(bone),
        }
    }

    /// Whether the channel of `bone` should drive its local transform
    pub fn evaluates(&self, bone: &str) -> bool {
        match self.mode() {
            PlaybackMode::Stopped => false,
            PlaybackMode::Playing => true,
            PlaybackMode::Isolated(isolated) => isolated == bone,
        }
    }
}
