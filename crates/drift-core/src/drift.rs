use crate::field::{random_velocity, Cluster};
use glam::{Quat, Vec3};
use rand::Rng;

/// Bounded random walk applied to every point once per frame.
#[derive(Clone, Copy, Debug)]
pub struct Drift {
    pub speed: f32,
    pub damping: f32,
}

impl Drift {
    pub fn new(speed: f32, damping: f32) -> Self {
        Self { speed, damping }
    }

    /// Advances every point of every cluster by its velocity.
    ///
    /// A point leaving its cluster's radius is pulled back by `damping` and
    /// handed a fresh random velocity; the old velocity is not reflected.
    pub fn step<R: Rng + ?Sized>(&self, clusters: &mut [Cluster], rng: &mut R) {
        for cluster in clusters.iter_mut() {
            let (center, radius, positions, velocities) = cluster.parts_mut();
            for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
                let mut local = *p - center + *v;
                if local.length() > radius {
                    local *= self.damping;
                    // large drift speeds could still overshoot after damping
                    local = local.clamp_length_max(radius * self.damping);
                    *v = random_velocity(rng, self.speed);
                }
                *p = center + local;
            }
        }
    }
}

/// Slow spin of the whole cluster group around the vertical axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroupRotation {
    pub angle: f32,
}

impl GroupRotation {
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.angle += speed;
    }

    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_rotation_y(self.angle)
    }

    /// Group-space point to world space.
    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.quat() * p
    }
}
