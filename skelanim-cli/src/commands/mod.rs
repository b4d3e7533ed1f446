//! Command implementations for the skelanim CLI

pub mod info;
pub mod play;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use skelanim::{AnimationClip, EvaluatorConfig, ImportOptions, Scene};

/// Load a scene description with import options matching the evaluator
pub fn load_scene(file: &Path, config: &EvaluatorConfig) -> Result<Scene> {
    Scene::from_path(file, &ImportOptions::from_config(config))
        .with_context(|| format!("Failed to load scene: {}", file.display()))
}

/// Pick a clip by name, or the first clip when no name is given
pub fn select_clip(scene: &Scene, name: Option<&str>) -> Result<Arc<AnimationClip>> {
    match name {
        Some(name) => scene
            .clip(name)
            .cloned()
            .with_context(|| format!("Clip '{name}' not found")),
        None => match scene.clips.first() {
            Some(clip) => Ok(Arc::clone(clip)),
            None => bail!("Scene contains no clips"),
        },
    }
}
