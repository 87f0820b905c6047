use crate::camera::{Camera, Ray};
use crate::drift::GroupRotation;
use crate::field::Cluster;
use crate::view::Viewport;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

/// A particle hit by a pick ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pick {
    pub cluster: usize,
    pub index: usize,
    /// World-space position of the particle at pick time.
    pub point: Vec3,
    /// Distance from the ray origin to the closest point on the ray.
    pub distance: f32,
}

/// Nearest point of one cluster within `threshold` of the ray.
///
/// Hit distance is measured along the ray (origin to the ray's closest point
/// to the particle) and must fall inside `[near, far]`.
pub fn nearest_hit(
    ray: &Ray,
    positions: &[Vec3],
    rotation: &GroupRotation,
    threshold: f32,
    near: f32,
    far: f32,
) -> Option<(usize, Vec3, f32)> {
    let threshold_sq = threshold * threshold;
    let q = rotation.quat();
    let mut best: Option<(usize, Vec3, f32)> = None;
    for (i, p) in positions.iter().enumerate() {
        let world = q * *p;
        let t = (world - ray.origin).dot(ray.dir);
        if t < near || t > far {
            continue;
        }
        if ray.at(t).distance_squared(world) > threshold_sq {
            continue;
        }
        match best {
            Some((_, _, bt)) if t >= bt => {}
            _ => best = Some((i, world, t)),
        }
    }
    best
}

/// Casts `ray` against every cluster and keeps the hit closest to the camera.
///
/// Clusters are compared by hit distance, not iteration order; on an exact
/// tie the earlier cluster wins.
pub fn pick(
    ray: &Ray,
    clusters: &[Cluster],
    rotation: &GroupRotation,
    threshold: f32,
    near: f32,
    far: f32,
) -> Option<Pick> {
    let mut best: Option<Pick> = None;
    for (ci, cluster) in clusters.iter().enumerate() {
        let Some((index, point, distance)) =
            nearest_hit(ray, cluster.positions(), rotation, threshold, near, far)
        else {
            continue;
        };
        match best {
            Some(b) if distance >= b.distance => {}
            _ => {
                best = Some(Pick {
                    cluster: ci,
                    index,
                    point,
                    distance,
                })
            }
        }
    }
    best
}

/// Picks from a pixel position using `camera`'s projection and clip range.
pub fn pick_at(
    camera: &Camera,
    px: Vec2,
    viewport: Viewport,
    clusters: &[Cluster],
    rotation: &GroupRotation,
    threshold: f32,
) -> Option<Pick> {
    let ray = camera.screen_to_world_ray(px, viewport);
    pick(&ray, clusters, rotation, threshold, camera.znear, camera.zfar)
}

/// Distinguishes a click/tap from a drag-to-orbit gesture.
#[inline]
pub fn is_click(press: Vec2, release: Vec2, threshold_px: f32) -> bool {
    press.distance(release) <= threshold_px
}

/// Up to `k` other points of the same cluster ordered by squared distance to
/// point `index`, lower index first on equal distance.
pub fn nearest_neighbors(cluster: &Cluster, index: usize, k: usize) -> SmallVec<[usize; 3]> {
    let positions = cluster.positions();
    let Some(&origin) = positions.get(index) else {
        return SmallVec::new();
    };
    let mut ranked: Vec<(f32, usize)> = positions
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(i, p)| (p.distance_squared(origin), i))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    ranked.into_iter().take(k).map(|(_, i)| i).collect()
}
