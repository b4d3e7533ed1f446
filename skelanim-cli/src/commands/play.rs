//! Clip playback command

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use skelanim::{EvaluatorConfig, PlaybackMode};
use skelanim::animation::AnimationEvaluator;

use super::{load_scene, select_clip};
use crate::cli::{OutputFormat, PlayArgs};
use crate::utils::format_matrix;

#[derive(Serialize)]
struct FrameReport {
    frame: usize,
    time: f64,
    bones: Vec<BoneReport>,
}

#[derive(Serialize)]
struct BoneReport {
    id: usize,
    name: String,
    /// Column-major
    matrix: [f32; 16],
}

pub fn execute(args: &PlayArgs, config: &EvaluatorConfig) -> Result<()> {
    let scene = load_scene(&args.file, config)?;
    let clip = select_clip(&scene, args.clip.as_deref())?;

    let mut evaluator = scene.evaluator(*config)?;
    evaluator
        .set_active_clip(clip)
        .context("Failed to activate clip")?;
    evaluator.set_playback_enabled(!args.paused);
    evaluator.set_single_bone_filter(args.bone.as_deref());

    info!(
        "Playing {} frame(s) of {:.4} s in mode {:?}",
        args.frames,
        args.dt,
        evaluator.mode()
    );

    let mut reports = Vec::new();
    for frame in 1..=args.frames {
        evaluator.update(args.dt);
        if args.all_frames || frame == args.frames {
            reports.push(report(&evaluator, frame));
        }
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            let mode = match evaluator.mode() {
                PlaybackMode::Stopped => "stopped".to_string(),
                PlaybackMode::Playing => "playing".to_string(),
                PlaybackMode::Isolated(bone) => format!("isolating '{bone}'"),
            };
            println!("Mode: {mode}");
            for report in &reports {
                println!();
                println!("Frame {} (tick {:.4}):", report.frame, report.time);
                for bone in &report.bones {
                    println!("  [{}] {}", bone.id, bone.name);
                    let matrix = skelanim::Mat4::from_cols_array(&bone.matrix);
                    println!("{}", format_matrix(&matrix, "    "));
                }
            }
        }
    }

    Ok(())
}

fn report(evaluator: &AnimationEvaluator, frame: usize) -> FrameReport {
    let matrices = evaluator.bone_matrices();
    let bones = evaluator
        .bindings()
        .iter()
        .filter_map(|(name, info)| {
            matrices.get(info.id).map(|m| BoneReport {
                id: info.id,
                name: name.to_string(),
                matrix: m.to_cols_array(),
            })
        })
        .collect();

    FrameReport {
        frame,
        time: evaluator.current_time(),
        bones,
    }
}
