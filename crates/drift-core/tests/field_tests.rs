// Host-side tests for particle field generation.

use drift_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn centers() -> Vec<Vec3> {
    CLUSTER_CENTERS.iter().copied().map(Vec3::from_array).collect()
}

#[test]
fn unit_ball_sampler_never_leaves_the_ball() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20_000 {
        let p = sample_unit_ball(&mut rng);
        assert!(p.length_squared() <= 1.0, "sample outside unit ball: {p:?}");
    }
}

#[test]
fn unit_ball_sampler_fills_the_volume() {
    // Uniform by volume: P(r <= 0.5) = 0.125. A surface-biased sampler would
    // put almost nothing there.
    let mut rng = StdRng::seed_from_u64(11);
    let n = 20_000;
    let inner = (0..n)
        .filter(|_| sample_unit_ball(&mut rng).length() <= 0.5)
        .count();
    let frac = inner as f32 / n as f32;
    assert!((frac - 0.125).abs() < 0.02, "inner fraction {frac}");
}

#[test]
fn generates_one_cluster_per_center_with_requested_points() {
    let mut rng = StdRng::seed_from_u64(1);
    let clusters = generate_clusters(&centers(), 240, 1.0, DRIFT_SPEED, &CLUSTER_COLORS, &mut rng);
    assert_eq!(clusters.len(), 6);
    for (c, center) in clusters.iter().zip(centers()) {
        assert_eq!(c.len(), 240);
        assert_eq!(c.velocities().len(), c.len());
        assert_eq!(c.center, center);
        assert!(c.is_dirty());
    }
}

#[test]
fn generated_points_lie_within_radius_of_their_center() {
    let mut rng = StdRng::seed_from_u64(2);
    let radius = 0.75;
    let clusters = generate_clusters(&centers(), 300, radius, DRIFT_SPEED, &CLUSTER_COLORS, &mut rng);
    for c in &clusters {
        for i in 0..c.len() {
            assert!(c.local(i).length() <= radius + 1e-5);
        }
    }
}

#[test]
fn initial_velocities_stay_within_half_drift() {
    let mut rng = StdRng::seed_from_u64(3);
    let d = 0.01;
    let clusters = generate_clusters(&centers(), 100, 1.0, d, &CLUSTER_COLORS, &mut rng);
    for c in &clusters {
        for v in c.velocities() {
            assert!(v.abs().max_element() <= d / 2.0 + 1e-7, "velocity {v:?}");
        }
    }
}

#[test]
fn colors_cycle_when_fewer_than_clusters() {
    let mut rng = StdRng::seed_from_u64(4);
    let colors = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let clusters = generate_clusters(&centers(), 4, 1.0, DRIFT_SPEED, &colors, &mut rng);
    assert_eq!(clusters[0].color, colors[0]);
    assert_eq!(clusters[1].color, colors[1]);
    assert_eq!(clusters[2].color, colors[0]);
}

#[test]
fn same_seed_gives_same_field() {
    let a = generate_clusters(&centers(), 50, 1.0, DRIFT_SPEED, &CLUSTER_COLORS, &mut StdRng::seed_from_u64(9));
    let b = generate_clusters(&centers(), 50, 1.0, DRIFT_SPEED, &CLUSTER_COLORS, &mut StdRng::seed_from_u64(9));
    for (ca, cb) in a.iter().zip(&b) {
        assert_eq!(ca.positions(), cb.positions());
    }
}

#[test]
fn position_bytes_cover_the_whole_buffer() {
    let mut rng = StdRng::seed_from_u64(5);
    let clusters = generate_clusters(&centers()[..1], 10, 1.0, DRIFT_SPEED, &CLUSTER_COLORS, &mut rng);
    assert_eq!(clusters[0].position_bytes().len(), 10 * 3 * 4);
}
