//! Per-frame bone matrix evaluation
//!
//! The [`AnimationEvaluator`] owns the playback clock and the output bone
//! matrix buffer. Each [`update`](AnimationEvaluator::update) advances the
//! clock, then walks the active clip's skeleton depth-first, pre-order:
//!
//! 1. a node's local transform is its bind pose, or its channel's sample when
//!    the playback mode lets that channel drive it;
//! 2. the global transform is `parent_global * local`;
//! 3. a bound bone writes `global * offset` into its buffer slot;
//! 4. children inherit `global` as their parent transform.
//!
//! Slots of bones that are never visited keep the identity matrix they were
//! initialized with.

use std::sync::Arc;

use glam::Mat4;
use log::{debug, trace, warn};

use super::binding::BoneBindingTable;
use super::clip::AnimationClip;
use super::skeleton::SkeletonNode;
use super::state::{NO_BONE_FILTER, PlaybackMode, PlaybackState};
use crate::config::EvaluatorConfig;
use crate::error::{AnimationError, Result};

/// Skeletal animation player for one skinned model instance
#[derive(Debug, Clone)]
pub struct AnimationEvaluator {
    config: EvaluatorConfig,
    bindings: Arc<BoneBindingTable>,
    clip: Option<Arc<AnimationClip>>,
    state: PlaybackState,
    matrices: Vec<Mat4>,
}

impl AnimationEvaluator {
    /// Create a stopped evaluator with no active clip
    ///
    /// The output buffer holds `config.max_bones` identity matrices.
    pub fn new(bindings: Arc<BoneBindingTable>, config: EvaluatorConfig) -> Result<Self> {
        if bindings.len() > config.max_bones {
            return Err(AnimationError::CapacityExceeded {
                count: bindings.len(),
                capacity: config.max_bones,
            });
        }

        Ok(Self {
            config,
            bindings,
            clip: None,
            state: PlaybackState::new(),
            matrices: vec![Mat4::IDENTITY; config.max_bones],
        })
    }

    /// Make `clip` the active clip and rewind to time zero
    ///
    /// The output buffer is stale until the next [`update`](Self::update).
    pub fn set_active_clip(&mut self, clip: Arc<AnimationClip>) -> Result<()> {
        let depth = clip.root().depth();
        if depth > self.config.max_hierarchy_depth {
            return Err(AnimationError::HierarchyTooDeep {
                depth,
                limit: self.config.max_hierarchy_depth,
            });
        }

        debug!("Activating clip '{}'", clip.name());
        self.clip = Some(clip);
        self.state.reset_time();
        self.warn_if_filter_unanimated();
        Ok(())
    }

    /// Drop the active clip; updates become no-ops
    pub fn clear_active_clip(&mut self) {
        self.clip = None;
        self.state.reset_time();
    }

    pub fn active_clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clip.as_ref()
    }

    /// Start or stop playback
    pub fn set_playback_enabled(&mut self, playing: bool) {
        self.state.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    /// Restrict live evaluation to a single bone
    ///
    /// `None` or [`NO_BONE_FILTER`] evaluates every keyframed bone again.
    pub fn set_single_bone_filter(&mut self, bone: Option<&str>) {
        self.state.single_bone = bone
            .filter(|name| *name != NO_BONE_FILTER)
            .map(str::to_string);
        self.warn_if_filter_unanimated();
    }

    pub fn single_bone_filter(&self) -> Option<&str> {
        self.state.single_bone.as_deref()
    }

    pub fn mode(&self) -> PlaybackMode<'_> {
        self.state.mode()
    }

    /// Current playback position in clip ticks
    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    /// Advance playback by `delta_seconds` and recompute the bone matrices
    ///
    /// While stopped the clock does not move, so `update(dt)` and `update(0.0)`
    /// are equivalent. Does nothing without an active clip.
    pub fn update(&mut self, delta_seconds: f64) {
        let Some(clip) = self.clip.clone() else {
            return;
        };

        let delta = if !delta_seconds.is_finite() {
            warn!("Ignoring non-finite delta time {delta_seconds}");
            0.0
        } else if self.state.playing {
            delta_seconds
        } else {
            0.0
        };

        self.advance_time(&clip, delta);
        trace!(
            "Evaluating clip '{}' at tick {:.3}",
            clip.name(),
            self.state.current_time
        );

        let mut traversal = Traversal {
            clip: &clip,
            bindings: &self.bindings,
            state: &self.state,
            matrices: &mut self.matrices,
        };
        traversal.visit(clip.root(), Mat4::IDENTITY);
    }

    fn advance_time(&mut self, clip: &AnimationClip, delta_seconds: f64) {
        let duration = clip.duration_in_ticks();
        if duration <= 0.0 {
            // Degenerate clip: time stays where it is
            return;
        }

        let time = self.state.current_time + clip.ticks_per_second() * delta_seconds;
        let wrapped = time.rem_euclid(duration);
        // rem_euclid may round up to `duration` for tiny negative inputs
        self.state.current_time = if wrapped < duration { wrapped } else { 0.0 };
    }

    /// Final bone matrices indexed by bone id
    ///
    /// Valid until the next [`update`](Self::update).
    pub fn bone_matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    /// Bone matrices flattened column-major, 16 floats per bone
    pub fn bone_matrices_flat(&self) -> Vec<f32> {
        self.matrices.iter().flat_map(Mat4::to_cols_array).collect()
    }

    /// Final matrix of a bound bone
    pub fn bone_matrix(&self, bone: &str) -> Option<Mat4> {
        self.bindings
            .get(bone)
            .and_then(|info| self.matrices.get(info.id))
            .copied()
    }

    /// Selectable bones for single-bone isolation
    ///
    /// Starts with [`NO_BONE_FILTER`], followed by the keyframed bones of the
    /// active clip in channel order.
    pub fn bone_names(&self) -> Vec<String> {
        std::iter::once(NO_BONE_FILTER)
            .chain(self.clip.iter().flat_map(|clip| clip.keyframed_bones()))
            .map(str::to_string)
            .collect()
    }

    pub fn bindings(&self) -> &BoneBindingTable {
        &self.bindings
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    fn warn_if_filter_unanimated(&self) {
        if let (Some(clip), Some(bone)) = (&self.clip, self.state.single_bone.as_deref())
            && clip.channel(bone).is_none()
        {
            warn!(
                "Isolated bone '{bone}' has no channel in clip '{}'; all bones stay in bind pose",
                clip.name()
            );
        }
    }
}

/// One pass over the skeleton, borrowing the evaluator's parts disjointly
struct Traversal<'a> {
    clip: &'a AnimationClip,
    bindings: &'a BoneBindingTable,
    state: &'a PlaybackState,
    matrices: &'a mut [Mat4],
}

impl Traversal<'_> {
    fn visit(&mut self, node: &SkeletonNode, parent_transform: Mat4) {
        let local_transform = match self.clip.channel(&node.name) {
            Some(channel) if self.state.evaluates(&node.name) => {
                channel.local_transform(self.state.current_time)
            }
            _ => node.local_bind_transform,
        };

        let global_transform = parent_transform * local_transform;

        if let Some(info) = self.bindings.get(&node.name) {
            if let Some(slot) = self.matrices.get_mut(info.id) {
                *slot = global_transform * info.offset;
            }
        }

        for child in &node.children {
            self.visit(child, global_transform);
        }
    }
}
