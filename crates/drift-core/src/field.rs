//! Particle field generation.
//!
//! Each cluster is a ball of points sampled uniformly by volume, not by
//! surface: samples are drawn from the enclosing cube and rejected when they
//! fall outside the unit ball, so roughly 1.9 draws are spent per point.

use glam::Vec3;
use rand::Rng;

/// One drifting sphere of particles.
///
/// `positions` holds absolute (group-space) coordinates in one contiguous
/// buffer; `velocities` is always the same length.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub center: Vec3,
    pub radius: f32,
    pub color: [f32; 3],
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    dirty: bool,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Raw position buffer for GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    #[inline]
    pub fn local(&self, i: usize) -> Vec3 {
        self.positions[i] - self.center
    }

    /// Overwrites a point's position relative to the center.
    pub fn set_local(&mut self, i: usize, local: Vec3) {
        if let Some(p) = self.positions.get_mut(i) {
            *p = self.center + local;
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the dirty flag and clears it (the renderer calls this after upload).
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn parts_mut(&mut self) -> (Vec3, f32, &mut [Vec3], &mut [Vec3]) {
        self.dirty = true;
        (
            self.center,
            self.radius,
            &mut self.positions,
            &mut self.velocities,
        )
    }
}

/// Draws a point uniformly from the unit ball by rejection.
pub fn sample_unit_ball<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Velocity with every component uniform in `[-drift/2, drift/2]`.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, drift: f32) -> Vec3 {
    let h = drift * 0.5;
    Vec3::new(
        rng.gen_range(-h..=h),
        rng.gen_range(-h..=h),
        rng.gen_range(-h..=h),
    )
}

/// Builds one cluster per center. `colors` are cycled if shorter than `centers`.
pub fn generate_clusters<R: Rng + ?Sized>(
    centers: &[Vec3],
    points_per_cluster: usize,
    radius: f32,
    drift: f32,
    colors: &[[f32; 3]],
    rng: &mut R,
) -> Vec<Cluster> {
    centers
        .iter()
        .enumerate()
        .map(|(ci, &center)| {
            let mut positions = Vec::with_capacity(points_per_cluster);
            let mut velocities = Vec::with_capacity(points_per_cluster);
            while positions.len() < points_per_cluster {
                positions.push(center + sample_unit_ball(rng) * radius);
                velocities.push(random_velocity(rng, drift));
            }
            let color = if colors.is_empty() {
                [1.0, 1.0, 1.0]
            } else {
                colors[ci % colors.len()]
            };
            Cluster {
                center,
                radius,
                color,
                positions,
                velocities,
                dirty: true,
            }
        })
        .collect()
}
