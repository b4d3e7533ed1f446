//! Evaluator limits

/// Output buffer size used by common skinning shaders
pub const DEFAULT_MAX_BONES: usize = 100;

/// Deepest skeleton the evaluator will traverse
pub const DEFAULT_MAX_HIERARCHY_DEPTH: usize = 256;

/// Limits applied when building bone tables and activating clips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct EvaluatorConfig {
    /// Number of matrices in the output buffer
    pub max_bones: usize,
    /// Maximum skeleton depth, root counted as 1
    pub max_hierarchy_depth: usize,
}

impl EvaluatorConfig {
    #[must_use]
    pub fn with_max_bones(mut self, max_bones: usize) -> Self {
        self.max_bones = max_bones;
        self
    }

    #[must_use]
    pub fn with_max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_bones: DEFAULT_MAX_BONES,
            max_hierarchy_depth: DEFAULT_MAX_HIERARCHY_DEPTH,
        }
    }
}
