use crate::camera::Camera;
use glam::Vec3;

/// Cubic ease-out, `1 - (1 - t)^3`, used for every camera move.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraPhase {
    Idle,
    ZoomingIn,
    ZoomingOut,
}

/// Zoom-in / zoom-out state machine for the camera eye.
///
/// The look-at point eases with the same curve as the eye, from wherever the
/// camera was looking when the move started. After a zoom-in completes the
/// phase returns to `Idle` but `focus` keeps the selected particle, and the
/// camera stays parked looking at it until [`zoom_out`](Self::zoom_out) is
/// called.
#[derive(Clone, Debug)]
pub struct CameraTransition {
    phase: CameraPhase,
    progress: f32,
    step: f32,
    start: Vec3,
    target: Option<Vec3>,
    focus: Option<Vec3>,
    home: Vec3,
    // captured from the camera on the first frame of each move
    look_start: Option<Vec3>,
    look_home: Vec3,
}

impl CameraTransition {
    pub fn new(home: Vec3, step: f32) -> Self {
        Self {
            phase: CameraPhase::Idle,
            progress: 0.0,
            step,
            start: home,
            target: None,
            focus: None,
            home,
            look_start: None,
            look_home: Vec3::ZERO,
        }
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Camera destination of the current (or last) zoom-in.
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Selected particle the camera is oriented toward, if any.
    pub fn focus(&self) -> Option<Vec3> {
        self.focus
    }

    pub fn home(&self) -> Vec3 {
        self.home
    }

    pub fn is_zooming(&self) -> bool {
        self.phase != CameraPhase::Idle
    }

    /// Whether the camera is free for orbit controls.
    pub fn is_free(&self) -> bool {
        self.phase == CameraPhase::Idle && self.focus.is_none()
    }

    pub fn zoom_in(&mut self, from: Vec3, selected: Vec3, offset: Vec3) {
        self.start = from;
        self.target = Some(selected + offset);
        self.focus = Some(selected);
        self.look_start = None;
        self.progress = 0.0;
        self.phase = CameraPhase::ZoomingIn;
        log::debug!(
            "[camera] zoom in toward ({:.2},{:.2},{:.2})",
            selected.x,
            selected.y,
            selected.z
        );
    }

    /// Starts the return to the home eye, turning toward `look_home`.
    pub fn zoom_out(&mut self, look_home: Vec3) {
        self.focus = None;
        self.look_start = None;
        self.look_home = look_home;
        self.progress = 0.0;
        self.phase = CameraPhase::ZoomingOut;
        log::debug!("[camera] zoom out");
    }

    /// Advances one frame and moves `camera`. Returns true while the eye is moving.
    pub fn step(&mut self, camera: &mut Camera) -> bool {
        match self.phase {
            CameraPhase::Idle => {
                if let Some(focus) = self.focus {
                    camera.look_at(focus);
                }
                false
            }
            CameraPhase::ZoomingIn => {
                let target = self.target.unwrap_or(self.home);
                let look_from = *self.look_start.get_or_insert(camera.target);
                let done = self.advance();
                let e = ease_out_cubic(self.progress);
                camera.eye = self.start.lerp(target, e);
                if let Some(focus) = self.focus {
                    camera.look_at(look_from.lerp(focus, e));
                }
                if done {
                    camera.eye = target;
                    if let Some(focus) = self.focus {
                        camera.look_at(focus);
                    }
                    self.phase = CameraPhase::Idle;
                }
                true
            }
            CameraPhase::ZoomingOut => {
                let look_from = *self.look_start.get_or_insert(camera.target);
                let done = self.advance();
                let e = ease_out_cubic(self.progress);
                // eases from the live eye every frame, so the curve compounds
                camera.eye = camera.eye.lerp(self.home, e);
                camera.look_at(look_from.lerp(self.look_home, e));
                if done {
                    camera.eye = self.home;
                    camera.look_at(self.look_home);
                    self.phase = CameraPhase::Idle;
                }
                true
            }
        }
    }

    fn advance(&mut self) -> bool {
        self.progress += self.step;
        // absorb f32 accumulation error so 50 steps of 0.02 land exactly on 1
        if self.progress >= 1.0 - 1e-4 {
            self.progress = 1.0;
        }
        self.progress >= 1.0
    }
}
