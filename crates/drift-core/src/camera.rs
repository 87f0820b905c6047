//! Camera description, screen/world conversion and orbit controls.
//!
//! These types avoid platform APIs; the web frontend feeds them CSS-pixel
//! pointer positions and reads back matrices for the renderer.

use crate::constants::*;
use crate::view::Viewport;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Unit vector the camera is facing.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// World-space ray through a pixel of the viewport.
    pub fn screen_to_world_ray(&self, px: Vec2, viewport: Viewport) -> Ray {
        let ndc = viewport.to_ndc(px);
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }

    /// Pixel position of a world point, or `None` when it is behind the camera.
    pub fn world_to_screen(&self, p: Vec3, viewport: Viewport) -> Option<Vec2> {
        let clip = self.view_projection() * p.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        ndc.is_finite().then(|| viewport.from_ndc(ndc.truncate()))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Spherical orbit around a target point, driven by pointer drags and wheel.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    radius: f32,
    theta: f32, // azimuth around +Y, measured from +Z
    phi: f32,   // polar angle from +Y
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let mut controls = Self {
            target,
            enabled: true,
            radius: 1.0,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
        };
        controls.sync_from_eye(eye);
        controls
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Re-derives the spherical state from a camera position.
    pub fn sync_from_eye(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.radius = offset.length().max(1e-3);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.clamp_phi();
    }

    /// Rotates by a pointer delta in pixels; a full viewport height is one turn.
    pub fn rotate(&mut self, delta_px: Vec2, viewport: Viewport) {
        if !self.enabled {
            return;
        }
        let turn = std::f32::consts::TAU / viewport.height;
        self.theta -= delta_px.x * turn;
        self.phi -= delta_px.y * turn;
        self.clamp_phi();
    }

    /// Wheel zoom: positive `delta` moves away from the target.
    pub fn dolly(&mut self, delta: f32) {
        if !self.enabled || delta == 0.0 {
            return;
        }
        let scale = if delta > 0.0 {
            1.0 / ORBIT_DOLLY_FACTOR
        } else {
            ORBIT_DOLLY_FACTOR
        };
        self.radius = (self.radius * scale).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.look_at(self.target);
    }

    fn clamp_phi(&mut self) {
        self.phi = self.phi.clamp(
            ORBIT_POLAR_EPSILON,
            std::f32::consts::PI - ORBIT_POLAR_EPSILON,
        );
    }
}
