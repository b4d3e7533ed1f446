//! JSON scene descriptions
//!
//! An external asset importer flattens a rigged model into a JSON document
//! holding the node tree, the bone list and the animation clips. This module
//! turns such a document into validated runtime objects.
//!
//! ```json
//! {
//!   "skeleton": {
//!     "name": "root",
//!     "children": [{ "name": "child", "translation": [0.0, 1.0, 0.0] }]
//!   },
//!   "bones": [
//!     { "name": "root" },
//!     { "name": "child", "offset": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,-1,0,1] }
//!   ],
//!   "clips": [{
//!     "name": "wave",
//!     "ticks_per_second": 1.0,
//!     "duration_in_ticks": 2.0,
//!     "channels": [{
//!       "bone": "child",
//!       "positions": [{ "timestamp": 0.0, "value": [0.0, 1.0, 0.0] }],
//!       "rotations": [{ "timestamp": 0.0, "value": [0.0, 0.0, 0.0, 1.0] }],
//!       "scales": [{ "timestamp": 0.0, "value": [1.0, 1.0, 1.0] }]
//!     }]
//!   }]
//! }
//! ```
//!
//! Matrices are column-major arrays of 16 floats and quaternions are
//! `[x, y, z, w]`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::animation::{
    AnimationClip, AnimationEvaluator, BoneBindingTable, ClipData, SkeletonNode,
};
use crate::config::{DEFAULT_MAX_BONES, EvaluatorConfig};
use crate::error::{AnimationError, Result};

/// A node of the imported scene graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDescription {
    pub name: String,
    /// Full local transform; takes precedence over translation/rotation/scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Mat4>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Quat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescription>,
}

impl NodeDescription {
    fn local_transform(&self) -> Mat4 {
        let has_trs = self.translation.is_some() || self.rotation.is_some() || self.scale.is_some();
        match self.matrix {
            Some(matrix) => {
                if has_trs {
                    warn!(
                        "Node '{}' has both a matrix and TRS components; using the matrix",
                        self.name
                    );
                }
                matrix
            }
            None => Mat4::from_scale_rotation_translation(
                self.scale.unwrap_or(Vec3::ONE),
                self.rotation.unwrap_or(Quat::IDENTITY).normalize(),
                self.translation.unwrap_or(Vec3::ZERO),
            ),
        }
    }

    fn to_skeleton(&self) -> SkeletonNode {
        SkeletonNode {
            name: self.name.clone(),
            local_bind_transform: self.local_transform(),
            children: self.children.iter().map(Self::to_skeleton).collect(),
        }
    }
}

/// A skinned bone and its offset matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneDescription {
    pub name: String,
    #[serde(default = "identity")]
    pub offset: Mat4,
}

fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// The whole imported document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub skeleton: NodeDescription,
    #[serde(default)]
    pub bones: Vec<BoneDescription>,
    #[serde(default)]
    pub clips: Vec<ClipData>,
}

/// Options controlling scene import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Capacity of the bone binding table
    pub max_bones: usize,
    /// Bind keyframed bones that are missing from the bone list
    pub bind_missing_bones: bool,
}

impl ImportOptions {
    /// Options sized to an evaluator's output buffer
    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self {
            max_bones: config.max_bones,
            ..Self::default()
        }
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            max_bones: DEFAULT_MAX_BONES,
            bind_missing_bones: true,
        }
    }
}

/// Validated runtime objects built from a [`SceneDescription`]
#[derive(Debug, Clone)]
pub struct Scene {
    pub skeleton: Arc<SkeletonNode>,
    pub bindings: Arc<BoneBindingTable>,
    pub clips: Vec<Arc<AnimationClip>>,
}

impl Scene {
    /// Build a scene, applying every load-time check
    pub fn from_description(
        description: SceneDescription,
        options: &ImportOptions,
    ) -> Result<Self> {
        let skeleton = Arc::new(description.skeleton.to_skeleton());

        for bone in &description.bones {
            if skeleton.find(&bone.name).is_none() {
                return Err(AnimationError::UnknownBone {
                    name: bone.name.clone(),
                });
            }
        }

        let mut bindings = BoneBindingTable::from_bones(
            description.bones.into_iter().map(|b| (b.name, b.offset)),
            options.max_bones,
        )?;

        let clips = description
            .clips
            .into_iter()
            .map(|data| AnimationClip::from_data(data, Arc::clone(&skeleton)).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        for clip in &clips {
            for bone in clip.keyframed_bones() {
                if skeleton.find(bone).is_none() {
                    warn!(
                        "Clip '{}' animates bone '{bone}' which is not in the skeleton",
                        clip.name()
                    );
                } else if options.bind_missing_bones {
                    bindings.register_missing(bone)?;
                }
            }
        }

        debug!(
            "Imported scene: {} nodes, {} bones, {} clips",
            skeleton.node_count(),
            bindings.len(),
            clips.len()
        );

        Ok(Self {
            skeleton,
            bindings: Arc::new(bindings),
            clips,
        })
    }

    pub fn from_json_str(json: &str, options: &ImportOptions) -> Result<Self> {
        let description: SceneDescription = serde_json::from_str(json)?;
        Self::from_description(description, options)
    }

    pub fn from_reader<R: Read>(reader: R, options: &ImportOptions) -> Result<Self> {
        let description: SceneDescription = serde_json::from_reader(reader)?;
        Self::from_description(description, options)
    }

    pub fn from_path(path: impl AsRef<Path>, options: &ImportOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Clip by name
    pub fn clip(&self, name: &str) -> Option<&Arc<AnimationClip>> {
        self.clips.iter().find(|clip| clip.name() == name)
    }

    /// A stopped evaluator over this scene's bones
    pub fn evaluator(&self, config: EvaluatorConfig) -> Result<AnimationEvaluator> {
        AnimationEvaluator::new(Arc::clone(&self.bindings), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "skeleton": {
            "name": "root",
            "children": [
                { "name": "child", "translation": [0.0, 1.0, 0.0] }
            ]
        },
        "bones": [
            { "name": "root" },
            { "name": "child", "offset": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,-1,0,1] }
        ],
        "clips": [{
            "name": "wave",
            "ticks_per_second": 1.0,
            "duration_in_ticks": 2.0,
            "channels": [{
                "bone": "child",
                "positions": [{ "timestamp": 0.0, "value": [0.0, 1.0, 0.0] }],
                "rotations": [{ "timestamp": 0.0, "value": [0.0, 0.0, 0.0, 1.0] }],
                "scales": [{ "timestamp": 0.0, "value": [1.0, 1.0, 1.0] }]
            }]
        }]
    }"#;

    #[test]
    fn test_import_scene() {
        let scene = Scene::from_json_str(SCENE, &ImportOptions::default()).unwrap();
        assert_eq!(scene.skeleton.node_count(), 2);
        assert_eq!(scene.bindings.names(), ["root", "child"]);
        assert_eq!(
            scene.bindings.get("child").map(|b| b.offset),
            Some(Mat4::from_translation(-Vec3::Y))
        );
        assert!(scene.clip("wave").is_some());
        assert_eq!(
            scene.skeleton.find("child").map(|n| n.local_bind_transform),
            Some(Mat4::from_translation(Vec3::Y))
        );
    }

    #[test]
    fn test_missing_track_rejected() {
        let json = SCENE.replace(
            r#""scales": [{ "timestamp": 0.0, "value": [1.0, 1.0, 1.0] }]"#,
            r#""scales": []"#,
        );
        let err = Scene::from_json_str(&json, &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, AnimationError::InvalidChannel { .. }));
    }

    #[test]
    fn test_unknown_bone_rejected() {
        let json = SCENE.replace(r#"{ "name": "root" }"#, r#"{ "name": "ghost" }"#);
        let err = Scene::from_json_str(&json, &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, AnimationError::UnknownBone { name } if name == "ghost"));
    }

    #[test]
    fn test_missing_bones_bound() {
        let json = SCENE.replace(
            r#"{ "name": "child", "offset": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,-1,0,1] }"#,
            r#"{ "name": "root" }"#,
        );

        let scene = Scene::from_json_str(&json, &ImportOptions::default()).unwrap();
        assert_eq!(scene.bindings.get("child").map(|b| b.id), Some(1));

        let options = ImportOptions {
            bind_missing_bones: false,
            ..ImportOptions::default()
        };
        let scene = Scene::from_json_str(&json, &options).unwrap();
        assert!(!scene.bindings.contains("child"));
    }

    #[test]
    fn test_malformed_json() {
        let err = Scene::from_json_str("{ not json", &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, AnimationError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err =
            Scene::from_path("/nonexistent/scene.json", &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, AnimationError::Io(_)));
    }
}
