// Host-side tests for ray picking, the drag filter and neighbour ranking.

use drift_core::*;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Clusters with exactly the given local points (radius 1).
fn clusters_with(points: &[(Vec3, &[Vec3])]) -> Vec<Cluster> {
    let mut rng = StdRng::seed_from_u64(0);
    let mut out = Vec::new();
    for (center, locals) in points {
        let mut c = generate_clusters(
            &[*center],
            locals.len(),
            1.0,
            DRIFT_SPEED,
            &CLUSTER_COLORS,
            &mut rng,
        )
        .remove(0);
        for (i, l) in locals.iter().enumerate() {
            c.set_local(i, *l);
        }
        out.push(c);
    }
    out
}

fn down_z_ray() -> Ray {
    Ray {
        origin: Vec3::new(0.0, 0.0, 5.0),
        dir: Vec3::new(0.0, 0.0, -1.0),
    }
}

#[test]
fn closer_cluster_wins_regardless_of_order() {
    let far_pts = [Vec3::new(0.0, 0.0, -0.5)];
    let near_pts = [Vec3::ZERO];
    let far = (Vec3::ZERO, far_pts.as_slice());
    let near = (Vec3::new(0.0, 0.0, 0.5), near_pts.as_slice());
    let rot = GroupRotation::default();

    let clusters = clusters_with(&[far, near]);
    let hit = pick(&down_z_ray(), &clusters, &rot, 0.05, 0.1, 100.0).expect("hit");
    assert_eq!(hit.cluster, 1);
    assert!((hit.distance - 4.5).abs() < 1e-5);

    let clusters = clusters_with(&[near, far]);
    let hit = pick(&down_z_ray(), &clusters, &rot, 0.05, 0.1, 100.0).expect("hit");
    assert_eq!(hit.cluster, 0);
    assert!((hit.point - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
}

#[test]
fn overlapping_sets_pick_the_strictly_nearer_point() {
    // Two interleaved sets along the same line of sight.
    let a: Vec<Vec3> = (0..5).map(|k| Vec3::new(0.0, 0.0, -0.8 + 0.4 * k as f32)).collect();
    let b: Vec<Vec3> = (0..5).map(|k| Vec3::new(0.0, 0.0, -0.6 + 0.4 * k as f32)).collect();
    let clusters = clusters_with(&[(Vec3::ZERO, a.as_slice()), (Vec3::ZERO, b.as_slice())]);
    let hit = pick(&down_z_ray(), &clusters, &GroupRotation::default(), 0.05, 0.1, 100.0).unwrap();
    // b[4] sits at z=1.0, a[4] at z=0.8
    assert_eq!((hit.cluster, hit.index), (1, 4));
}

#[test]
fn nearest_hit_within_one_cluster_is_closest_to_origin() {
    let locals = [
        Vec3::new(0.0, 0.0, -0.9),
        Vec3::new(0.0, 0.0, 0.7),
        Vec3::new(0.0, 0.0, 0.1),
    ];
    let clusters = clusters_with(&[(Vec3::ZERO, locals.as_slice())]);
    let (i, _, t) = nearest_hit(
        &down_z_ray(),
        clusters[0].positions(),
        &GroupRotation::default(),
        0.05,
        0.1,
        100.0,
    )
    .unwrap();
    assert_eq!(i, 1);
    assert!((t - 4.3).abs() < 1e-5);
}

#[test]
fn threshold_bounds_the_perpendicular_distance() {
    let near_axis = [Vec3::new(0.04, 0.0, 0.0)];
    let off_axis = [Vec3::new(0.06, 0.0, 0.0)];
    let inside = clusters_with(&[(Vec3::ZERO, near_axis.as_slice())]);
    let outside = clusters_with(&[(Vec3::ZERO, off_axis.as_slice())]);
    let rot = GroupRotation::default();
    assert!(pick(&down_z_ray(), &inside, &rot, 0.05, 0.1, 100.0).is_some());
    assert!(pick(&down_z_ray(), &outside, &rot, 0.05, 0.1, 100.0).is_none());
}

#[test]
fn points_behind_or_beyond_the_clip_range_are_ignored() {
    let single = [Vec3::ZERO];
    let behind = clusters_with(&[(Vec3::new(0.0, 0.0, 6.0), single.as_slice())]);
    let rot = GroupRotation::default();
    assert!(pick(&down_z_ray(), &behind, &rot, 0.05, 0.1, 100.0).is_none());
    let origin = clusters_with(&[(Vec3::ZERO, single.as_slice())]);
    assert!(pick(&down_z_ray(), &origin, &rot, 0.05, 0.1, 4.0).is_none());
}

#[test]
fn group_rotation_is_applied_before_testing() {
    // a quarter turn around +Y carries -X onto +Z, into the line of sight
    let pts = [Vec3::new(-0.5, 0.0, 0.0)];
    let clusters = clusters_with(&[(Vec3::ZERO, pts.as_slice())]);
    let mut rot = GroupRotation::default();
    assert!(pick(&down_z_ray(), &clusters, &rot, 0.05, 0.1, 100.0).is_none());
    rot.advance(std::f32::consts::FRAC_PI_2);
    let hit = pick(&down_z_ray(), &clusters, &rot, 0.05, 0.1, 100.0).expect("rotated hit");
    assert!((hit.point - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
}

#[test]
fn pick_at_hits_the_point_under_the_cursor() {
    let viewport = Viewport::new(800.0, 600.0);
    let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), viewport.aspect());
    let target = Vec3::new(0.3, -0.2, 0.9);
    let pts = [target, Vec3::new(-0.5, 0.5, 0.0)];
    let clusters = clusters_with(&[(Vec3::ZERO, pts.as_slice())]);
    let px = camera.world_to_screen(target, viewport).expect("on screen");
    let hit = pick_at(&camera, px, viewport, &clusters, &GroupRotation::default(), PICK_THRESHOLD)
        .expect("hit");
    assert_eq!(hit.index, 0);
}

#[test]
fn drag_threshold_separates_clicks_from_drags() {
    let press = Vec2::new(100.0, 100.0);
    for dx in -8..=8 {
        for dy in -8..=8 {
            let release = press + Vec2::new(dx as f32, dy as f32);
            let d = ((dx * dx + dy * dy) as f32).sqrt();
            assert_eq!(is_click(press, release, DRAG_THRESHOLD_PX), d <= 5.0, "({dx},{dy})");
        }
    }
}

#[test]
fn neighbours_rank_by_squared_distance_then_index() {
    let locals = [
        Vec3::ZERO,
        Vec3::new(0.3, 0.0, 0.0),
        Vec3::new(0.0, 0.1, 0.0),
        Vec3::new(0.0, -0.1, 0.0),
        Vec3::new(0.0, 0.0, 0.05),
        Vec3::new(0.9, 0.0, 0.0),
    ];
    let clusters = clusters_with(&[(Vec3::ONE, locals.as_slice())]);
    let n = nearest_neighbors(&clusters[0], 0, 3);
    assert_eq!(n.as_slice(), &[4, 2, 3]);
}

#[test]
fn neighbours_of_a_missing_index_are_empty() {
    let single = [Vec3::ZERO];
    let clusters = clusters_with(&[(Vec3::ZERO, single.as_slice())]);
    assert!(nearest_neighbors(&clusters[0], 3, 3).is_empty());
    assert!(nearest_neighbors(&clusters[0], 0, 3).is_empty());
}
