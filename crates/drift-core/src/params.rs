use crate::constants::*;
use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("at least one cluster center is required")]
    NoClusters,
    #[error("at least one cluster color is required")]
    NoColors,
    #[error("points per cluster must be non-zero")]
    NoPoints,
    #[error("cluster radius must be positive, got {0}")]
    BadRadius(f32),
    #[error("drift speed must be finite and non-negative, got {0}")]
    BadDrift(f32),
    #[error("containment damping must lie in (0, 1), got {0}")]
    BadDamping(f32),
    #[error("zoom step must lie in (0, 1], got {0}")]
    BadZoomStep(f32),
    #[error("video catalog must hold at least one asset")]
    EmptyCatalog,
}

/// Everything a [`Session`](crate::Session) needs to build and drive a field.
///
/// `Default` reproduces the stock scene: six unit clusters of 240 points.
#[derive(Clone, Debug)]
pub struct SceneParams {
    pub cluster_centers: Vec<Vec3>,
    pub cluster_colors: Vec<[f32; 3]>,
    pub points_per_cluster: usize,
    pub cluster_radius: f32,
    pub drift_speed: f32,
    pub containment_damping: f32,
    pub rotation_speed: f32,
    pub pick_threshold: f32,
    pub drag_threshold_px: f32,
    pub zoom_step: f32,
    pub zoom_offset: Vec3,
    pub camera_home: Vec3,
    pub catalog_len: usize,
    pub dismiss_arm_delay_ms: f64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            cluster_centers: CLUSTER_CENTERS.iter().copied().map(Vec3::from_array).collect(),
            cluster_colors: CLUSTER_COLORS.to_vec(),
            points_per_cluster: POINTS_PER_CLUSTER,
            cluster_radius: CLUSTER_RADIUS,
            drift_speed: DRIFT_SPEED,
            containment_damping: CONTAINMENT_DAMPING,
            rotation_speed: ROTATION_SPEED,
            pick_threshold: PICK_THRESHOLD,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            zoom_step: ZOOM_STEP,
            zoom_offset: zoom_offset_vec3(),
            camera_home: camera_home_vec3(),
            catalog_len: VIDEO_CATALOG_LEN,
            dismiss_arm_delay_ms: DISMISS_ARM_DELAY_MS,
        }
    }
}

impl SceneParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cluster_centers.is_empty() {
            return Err(ConfigError::NoClusters);
        }
        if self.cluster_colors.is_empty() {
            return Err(ConfigError::NoColors);
        }
        if self.points_per_cluster == 0 {
            return Err(ConfigError::NoPoints);
        }
        if !(self.cluster_radius > 0.0 && self.cluster_radius.is_finite()) {
            return Err(ConfigError::BadRadius(self.cluster_radius));
        }
        if !(self.drift_speed >= 0.0 && self.drift_speed.is_finite()) {
            return Err(ConfigError::BadDrift(self.drift_speed));
        }
        if !(self.containment_damping > 0.0 && self.containment_damping < 1.0) {
            return Err(ConfigError::BadDamping(self.containment_damping));
        }
        if !(self.zoom_step > 0.0 && self.zoom_step <= 1.0) {
            return Err(ConfigError::BadZoomStep(self.zoom_step));
        }
        if self.catalog_len == 0 {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(())
    }

    /// Color of cluster `i`; colors repeat when there are fewer than clusters.
    #[inline]
    pub fn cluster_color(&self, i: usize) -> [f32; 3] {
        self.cluster_colors[i % self.cluster_colors.len()]
    }
}
