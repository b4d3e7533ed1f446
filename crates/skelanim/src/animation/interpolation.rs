//! Keyframe interpolation for bone animation tracks

use super::types::{Keyframe, Lerp};

/// Find the index of the keyframe at or before the given time
///
/// Returns None if the track has no keyframes.
/// For interpolation, this returns the index of the earlier keyframe
/// in the bracketing pair (so we can interpolate between `[index]` and `[index+1]`).
/// Times before the first keyframe map to index 0.
pub fn find_keyframe_index<T>(keys: &[Keyframe<T>], time: f64) -> Option<usize> {
    if keys.is_empty() {
        return None;
    }

    let last_index = keys.len() - 1;

    if time >= keys[last_index].timestamp {
        return Some(last_index);
    }

    // Largest index where keys[index].timestamp <= time
    let mut low = 0;
    let mut high = last_index;

    while low < high {
        let mid = (low + high).div_ceil(2);
        if keys[mid].timestamp <= time {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Some(low)
}

/// Blend factor between two keyframe timestamps, clamped to `[0, 1]`
///
/// Zero-length intervals yield 0.
pub fn blend_factor(start: f64, end: f64, time: f64) -> f32 {
    let span = end - start;
    if span <= 0.0 {
        return 0.0;
    }
    (((time - start) / span) as f32).clamp(0.0, 1.0)
}

/// Interpolate a keyframe track at the given time
///
/// Clamps to the first value before the track starts and to the last value
/// at or after it ends. Returns None only for an empty track.
pub fn sample_track<T: Lerp>(keys: &[Keyframe<T>], time: f64) -> Option<T> {
    let index = find_keyframe_index(keys, time)?;

    let Some(next) = keys.get(index + 1) else {
        return Some(keys[index].value.clone());
    };
    let current = &keys[index];

    let t = blend_factor(current.timestamp, next.timestamp, time);
    Some(current.value.lerp(&next.value, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use test_case::test_case;

    fn track() -> Vec<Keyframe<f32>> {
        vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(100.0, 10.0),
            Keyframe::new(200.0, 30.0),
            Keyframe::new(300.0, 30.0),
        ]
    }

    #[test]
    fn test_find_keyframe_index_empty() {
        let keys: Vec<Keyframe<f32>> = vec![];
        assert_eq!(find_keyframe_index(&keys, 0.0), None);
    }

    #[test]
    fn test_find_keyframe_index_single() {
        let keys = vec![Keyframe::new(100.0, 1.0f32)];
        assert_eq!(find_keyframe_index(&keys, 0.0), Some(0));
        assert_eq!(find_keyframe_index(&keys, 100.0), Some(0));
        assert_eq!(find_keyframe_index(&keys, 200.0), Some(0));
    }

    #[test_case(-50.0, 0 ; "before first")]
    #[test_case(0.0, 0 ; "at first")]
    #[test_case(50.0, 0 ; "between first and second")]
    #[test_case(100.0, 1 ; "at second")]
    #[test_case(150.0, 1 ; "between second and third")]
    #[test_case(250.0, 2 ; "between third and last")]
    #[test_case(300.0, 3 ; "at last")]
    #[test_case(400.0, 3 ; "after last")]
    fn test_find_keyframe_index_multiple(time: f64, expected: usize) {
        assert_eq!(find_keyframe_index(&track(), time), Some(expected));
    }

    #[test]
    fn test_blend_factor_zero_length_interval() {
        assert_eq!(blend_factor(5.0, 5.0, 5.0), 0.0);
        assert_eq!(blend_factor(5.0, 5.0, 7.0), 0.0);
    }

    #[test]
    fn test_blend_factor_clamped() {
        assert_eq!(blend_factor(0.0, 10.0, -5.0), 0.0);
        assert_eq!(blend_factor(0.0, 10.0, 15.0), 1.0);
        assert!((blend_factor(0.0, 10.0, 2.5) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_sample_track_linear() {
        let keys = track();
        assert!((sample_track(&keys, 50.0).unwrap_or_default() - 5.0).abs() < 1e-4);
        assert!((sample_track(&keys, 150.0).unwrap_or_default() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_sample_track_clamps() {
        let keys = track();
        assert_eq!(sample_track(&keys, -10.0), Some(0.0));
        assert_eq!(sample_track(&keys, 300.0), Some(30.0));
        assert_eq!(sample_track(&keys, 1_000.0), Some(30.0));
    }

    #[test]
    fn test_sample_track_continuous_at_boundary() {
        let keys = track();
        let eps = 1e-6;
        let before = sample_track(&keys, 100.0 - eps).unwrap_or_default();
        let at = sample_track(&keys, 100.0).unwrap_or_default();
        let after = sample_track(&keys, 100.0 + eps).unwrap_or_default();
        assert!((before - at).abs() < 1e-3);
        assert!((after - at).abs() < 1e-3);
    }

    #[test]
    fn test_sample_track_vec3() {
        let keys = vec![
            Keyframe::new(0.0, Vec3::ZERO),
            Keyframe::new(10.0, Vec3::new(10.0, -10.0, 2.0)),
        ];
        let v = sample_track(&keys, 5.0).unwrap_or_default();
        assert!(v.abs_diff_eq(Vec3::new(5.0, -5.0, 1.0), 1e-5));
    }

    #[test]
    fn test_sample_track_empty() {
        let keys: Vec<Keyframe<Vec3>> = vec![];
        assert_eq!(sample_track(&keys, 0.0), None);
    }
}
