// Host-side tests for the drift simulator and group rotation.

use drift_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field(seed: u64, drift: f32) -> (Vec<Cluster>, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers: Vec<Vec3> = CLUSTER_CENTERS.iter().copied().map(Vec3::from_array).collect();
    let clusters = generate_clusters(&centers, 240, 1.0, drift, &CLUSTER_COLORS, &mut rng);
    (clusters, rng)
}

#[test]
fn points_stay_contained_over_many_frames() {
    let (mut clusters, mut rng) = field(21, DRIFT_SPEED);
    let drift = Drift::new(DRIFT_SPEED, CONTAINMENT_DAMPING);
    for frame in 0..2000 {
        drift.step(&mut clusters, &mut rng);
        for (ci, c) in clusters.iter().enumerate() {
            for i in 0..c.len() {
                let r = c.local(i).length();
                assert!(r <= c.radius + 1e-5, "frame {frame} cluster {ci} point {i} at r={r}");
            }
            assert_eq!(c.velocities().len(), c.len());
        }
    }
}

#[test]
fn containment_holds_even_for_fast_drift() {
    // Drift far larger than the 2% damping margin still may not escape.
    let (mut clusters, mut rng) = field(22, 0.5);
    let drift = Drift::new(0.5, CONTAINMENT_DAMPING);
    for _ in 0..200 {
        drift.step(&mut clusters, &mut rng);
        for c in &clusters {
            for i in 0..c.len() {
                assert!(c.local(i).length() <= c.radius + 1e-5);
            }
        }
    }
}

#[test]
fn overshooting_point_is_damped_and_gets_new_velocity() {
    let (mut clusters, mut rng) = field(23, DRIFT_SPEED);
    let v = clusters[0].velocities()[0];
    assert!(v.length() > 0.0);
    // Park the point just inside the boundary, heading straight out.
    let start = v.normalize() * (1.0 - v.length() * 0.5);
    clusters[0].set_local(0, start);
    Drift::new(DRIFT_SPEED, CONTAINMENT_DAMPING).step(&mut clusters, &mut rng);
    let expected = (start + v) * CONTAINMENT_DAMPING;
    assert!((clusters[0].local(0) - expected).length() < 1e-5);
    assert_ne!(clusters[0].velocities()[0], v);
}

#[test]
fn interior_points_move_by_their_velocity() {
    let (mut clusters, mut rng) = field(24, DRIFT_SPEED);
    clusters[1].set_local(5, Vec3::ZERO);
    let v = clusters[1].velocities()[5];
    Drift::new(DRIFT_SPEED, CONTAINMENT_DAMPING).step(&mut clusters, &mut rng);
    assert!((clusters[1].local(5) - v).length() < 1e-6);
    assert_eq!(clusters[1].velocities()[5], v);
}

#[test]
fn step_marks_clusters_dirty() {
    let (mut clusters, mut rng) = field(25, DRIFT_SPEED);
    for c in clusters.iter_mut() {
        assert!(c.take_dirty());
        assert!(!c.is_dirty());
    }
    Drift::new(DRIFT_SPEED, CONTAINMENT_DAMPING).step(&mut clusters, &mut rng);
    assert!(clusters.iter().all(|c| c.is_dirty()));
}

#[test]
fn group_rotation_turns_around_vertical_axis() {
    let mut rot = GroupRotation::default();
    rot.advance(std::f32::consts::FRAC_PI_2);
    let p = rot.apply(Vec3::new(0.0, 0.3, 1.0));
    assert!((p - Vec3::new(1.0, 0.3, 0.0)).length() < 1e-5, "{p:?}");
}
