use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use skelanim::animation::{
    AnimationClip, AnimationEvaluator, BoneBindingTable, BoneChannel, Keyframe, SkeletonNode,
};
use skelanim::{EvaluatorConfig, Mat4, Quat, Vec3};

const BONES: usize = 64;

fn create_chain() -> (Arc<BoneBindingTable>, Arc<AnimationClip>) {
    // Build a single chain of BONES nodes, leaf first
    let mut node = SkeletonNode::new(format!("bone{}", BONES - 1), Mat4::from_translation(Vec3::Y));
    for i in (0..BONES - 1).rev() {
        node = SkeletonNode::new(format!("bone{i}"), Mat4::from_translation(Vec3::Y)).with_child(node);
    }
    let skeleton = Arc::new(node);

    let bindings = BoneBindingTable::from_bones(
        (0..BONES).map(|i| (format!("bone{i}"), Mat4::from_translation(-(i as f32 + 1.0) * Vec3::Y))),
        BONES,
    )
    .unwrap();

    let channels = (0..BONES)
        .map(|i| {
            let rotations = (0..=30)
                .map(|k| Keyframe::new(f64::from(k), Quat::from_rotation_z(k as f32 * 0.05)))
                .collect();
            BoneChannel::new(
                format!("bone{i}"),
                vec![Keyframe::new(0.0, Vec3::Y)],
                rotations,
                vec![Keyframe::new(0.0, Vec3::ONE)],
            )
            .unwrap()
        })
        .collect();

    let clip = AnimationClip::new("bench", 30.0, 30.0, channels, skeleton).unwrap();
    (Arc::new(bindings), Arc::new(clip))
}

fn bench_update(c: &mut Criterion) {
    let (bindings, clip) = create_chain();
    let config = EvaluatorConfig::default().with_max_bones(BONES);
    let mut evaluator = AnimationEvaluator::new(bindings, config).unwrap();
    evaluator.set_active_clip(clip).unwrap();
    evaluator.set_playback_enabled(true);

    c.bench_function("update_64_bone_chain", |b| {
        b.iter(|| {
            evaluator.update(black_box(1.0 / 60.0));
            black_box(evaluator.bone_matrices());
        })
    });
}

fn bench_isolated_update(c: &mut Criterion) {
    let (bindings, clip) = create_chain();
    let config = EvaluatorConfig::default().with_max_bones(BONES);
    let mut evaluator = AnimationEvaluator::new(bindings, config).unwrap();
    evaluator.set_active_clip(clip).unwrap();
    evaluator.set_playback_enabled(true);
    evaluator.set_single_bone_filter(Some("bone32"));

    c.bench_function("update_64_bone_chain_isolated", |b| {
        b.iter(|| {
            evaluator.update(black_box(1.0 / 60.0));
            black_box(evaluator.bone_matrices());
        })
    });
}

criterion_group!(benches, bench_update, bench_isolated_update);
criterion_main!(benches);
