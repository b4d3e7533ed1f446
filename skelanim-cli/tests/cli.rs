//! CLI integration tests
//!
//! These run the `skelanim` binary against a small scene written to a
//! temporary directory.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENE: &str = r#"{
    "skeleton": {
        "name": "root",
        "children": [
            {
                "name": "child",
                "translation": [0.0, 1.0, 0.0],
                "children": [{ "name": "tip", "translation": [0.0, 1.0, 0.0] }]
            }
        ]
    },
    "bones": [
        { "name": "root" },
        { "name": "child", "offset": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,-1,0,1] },
        { "name": "tip", "offset": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,-2,0,1] }
    ],
    "clips": [{
        "name": "bend",
        "ticks_per_second": 1.0,
        "duration_in_ticks": 2.0,
        "channels": [{
            "bone": "child",
            "positions": [{ "timestamp": 0.0, "value": [0.0, 1.0, 0.0] }],
            "rotations": [
                { "timestamp": 0.0, "value": [0.0, 0.0, 0.0, 1.0] },
                { "timestamp": 1.0, "value": [0.0, 0.0, 0.70710677, 0.70710677] }
            ],
            "scales": [{ "timestamp": 0.0, "value": [1.0, 1.0, 1.0] }]
        }]
    }]
}"#;

fn write_scene(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("scene.json");
    fs::write(&path, contents).unwrap();
    path
}

fn skelanim() -> Command {
    Command::cargo_bin("skelanim").unwrap()
}

#[test]
fn test_info_lists_skeleton_and_clips() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skelanim()
        .args(["info", "--no-color"])
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skeleton (3 nodes, depth 3)"))
        .stdout(predicate::str::contains("child [id 1]"))
        .stdout(predicate::str::contains("bend: 2 ticks @ 1 ticks/s"));
}

#[test]
fn test_bones_starts_with_sentinel() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skelanim()
        .arg("bones")
        .arg(&scene)
        .assert()
        .success()
        .stdout("None\nchild\n");
}

#[test]
fn test_play_json_output() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    let output = skelanim()
        .args(["play", "--dt", "1.0", "--format", "json"])
        .arg(&scene)
        .output()
        .unwrap();
    assert!(output.status.success());

    let frames: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let frame = &frames[0];
    assert_eq!(frame["frame"], 1);
    assert!((frame["time"].as_f64().unwrap() - 1.0).abs() < 1e-9);

    let child = &frame["bones"][1];
    assert_eq!(child["name"], "child");
    // Rotated 90 degrees about Z: first column is (0, 1, 0)
    let m: Vec<f64> = child["matrix"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert!(m[0].abs() < 1e-5);
    assert!((m[1] - 1.0).abs() < 1e-5);
}

#[test]
fn test_play_all_frames() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skelanim()
        .args(["play", "-n", "3", "--dt", "0.5", "--all-frames"])
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: playing"))
        .stdout(predicate::str::contains("Frame 1 (tick 0.5000)"))
        .stdout(predicate::str::contains("Frame 3 (tick 1.5000)"));
}

#[test]
fn test_play_paused_and_isolated() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skelanim()
        .args(["play", "--paused"])
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: stopped"))
        .stdout(predicate::str::contains("tick 0.0000"));

    skelanim()
        .args(["play", "--bone", "child"])
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: isolating 'child'"));
}

#[test]
fn test_unknown_clip_fails() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skelanim()
        .args(["play", "--clip", "run"])
        .arg(&scene)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Clip 'run' not found"));
}

#[test]
fn test_invalid_channel_fails() {
    let dir = TempDir::new().unwrap();
    let broken = SCENE.replace(
        r#""scales": [{ "timestamp": 0.0, "value": [1.0, 1.0, 1.0] }]"#,
        r#""scales": []"#,
    );
    let scene = write_scene(&dir, &broken);

    skelanim()
        .arg("info")
        .arg(&scene)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid scale channel for bone 'child'"));
}

#[test]
fn test_capacity_from_environment() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, SCENE);

    skelanim()
        .env("SKELANIM_MAX_BONES", "2")
        .arg("info")
        .arg(&scene)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds capacity of 2"));
}
