//! Scene inspection commands

use std::path::Path;

use anyhow::Result;
use skelanim::EvaluatorConfig;

use super::{load_scene, select_clip};
use crate::utils::{TreeOptions, format_seconds, render_skeleton};

pub fn execute(
    file: &Path,
    config: &EvaluatorConfig,
    depth: Option<usize>,
    no_color: bool,
) -> Result<()> {
    let scene = load_scene(file, config)?;
    let clip = scene.clips.first().map(|clip| &**clip);

    println!("Scene: {}", file.display());
    println!();
    println!(
        "Skeleton ({} nodes, depth {}):",
        scene.skeleton.node_count(),
        scene.skeleton.depth()
    );
    let options = TreeOptions {
        max_depth: depth,
        no_color,
    };
    print!("{}", render_skeleton(&scene.skeleton, &scene.bindings, clip, &options));

    println!();
    println!(
        "Bones ({} of {} slots):",
        scene.bindings.len(),
        scene.bindings.capacity()
    );
    for (name, info) in scene.bindings.iter() {
        println!("  {:>3}  {name}", info.id);
    }

    println!();
    println!("Clips ({}):", scene.clips.len());
    for clip in &scene.clips {
        let mut line = format!(
            "  {}: {} ticks @ {} ticks/s ({}), {} channels",
            clip.name(),
            clip.duration_in_ticks(),
            clip.ticks_per_second(),
            format_seconds(clip.duration_in_seconds()),
            clip.channels().len()
        );
        if clip.is_degenerate() {
            line.push_str(" [degenerate]");
        }
        println!("{line}");
    }

    Ok(())
}

pub fn execute_bones(file: &Path, config: &EvaluatorConfig, clip: Option<&str>) -> Result<()> {
    let scene = load_scene(file, config)?;
    let clip = select_clip(&scene, clip)?;

    let mut evaluator = scene.evaluator(*config)?;
    evaluator.set_active_clip(clip)?;

    for name in evaluator.bone_names() {
        println!("{name}");
    }

    Ok(())
}
