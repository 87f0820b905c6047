// Host-side tests for tuning constants and their relationships.

use drift_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn field_constants_are_consistent() {
    assert_eq!(CLUSTER_CENTERS.len(), 6);
    assert_eq!(CLUSTER_COLORS.len(), CLUSTER_CENTERS.len());
    assert!(POINTS_PER_CLUSTER > 0);
    assert!(CLUSTER_RADIUS > 0.0);
    for c in CLUSTER_COLORS {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn drift_and_damping_are_bounded() {
    // a single step must never be able to escape the ball by more than the damping absorbs
    assert!(DRIFT_SPEED > 0.0 && DRIFT_SPEED < CLUSTER_RADIUS * (1.0 - CONTAINMENT_DAMPING));
    assert!(CONTAINMENT_DAMPING > 0.0 && CONTAINMENT_DAMPING < 1.0);
    assert!(ROTATION_SPEED > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn zoom_step_divides_one_into_fifty_frames() {
    assert!((1.0 / ZOOM_STEP - 50.0).abs() < 1e-3);
    assert!(camera_home_vec3().length() > CLUSTER_RADIUS * 2.0);
    assert!(zoom_offset_vec3().length() > CAMERA_ZNEAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbit_range_contains_home() {
    let home = camera_home_vec3().length();
    assert!(ORBIT_MIN_DISTANCE < home && home < ORBIT_MAX_DISTANCE);
    assert!(ORBIT_DOLLY_FACTOR > 0.0 && ORBIT_DOLLY_FACTOR < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn overlay_layout_is_sane() {
    assert!(THUMB_SIZE[0] < PRIMARY_SIZE[0] && THUMB_SIZE[1] < PRIMARY_SIZE[1]);
    assert!(DOT_DIAMETER_MIN < DOT_DIAMETER_MAX);
    assert!(FADE_IN_STEP > 0.0 && FADE_IN_STEP <= 1.0);
    assert!(FADE_IN_START_SCALE > 0.0 && FADE_IN_START_SCALE < 1.0);
    assert!(DISMISS_ARM_DELAY_MS > 0.0);
    assert!(FADE_OUT_MS > 0);
    assert_eq!(VIDEO_CATALOG_LEN, 23);
}
