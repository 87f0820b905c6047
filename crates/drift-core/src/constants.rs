use glam::Vec3;

// Shared simulation/interaction tuning constants used by the web frontend.

// Field layout
pub const POINTS_PER_CLUSTER: usize = 240;
pub const CLUSTER_RADIUS: f32 = 1.0; // local containment radius of every cluster
pub const CLUSTER_CENTERS: [[f32; 3]; 6] = [
    [-0.8, 0.0, 0.0],
    [0.7, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -0.6, 0.0],
    [0.0, 0.0, 1.1],
    [0.0, 0.0, -0.8],
];

// Material colors, one per cluster (also tint the overlay dots)
pub const CLUSTER_COLORS: [[f32; 3]; 6] = [
    [0.36, 0.78, 1.0],  // sky
    [1.0, 0.42, 0.62],  // rose
    [0.55, 1.0, 0.62],  // mint
    [1.0, 0.8, 0.35],   // amber
    [0.72, 0.55, 1.0],  // violet
    [0.35, 1.0, 0.92],  // aqua
];

// Drift
pub const DRIFT_SPEED: f32 = 0.002; // velocity components drawn from [-d/2, d/2]
pub const CONTAINMENT_DAMPING: f32 = 0.98; // overshooting points are scaled by this
pub const ROTATION_SPEED: f32 = 0.0005; // radians per frame around +Y

// Picking
pub const PICK_THRESHOLD: f32 = 0.05; // max point-to-ray distance (world units)
pub const DRAG_THRESHOLD_PX: f32 = 5.0; // press/release distance separating click from drag
pub const NEIGHBOR_COUNT: usize = 3;

// Camera
pub const CAMERA_HOME: [f32; 3] = [0.0, 0.0, 5.0];
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const ZOOM_STEP: f32 = 0.02; // progress per frame, ~50 frames per transition
pub const ZOOM_OFFSET: [f32; 3] = [0.1, 0.1, 0.3]; // camera rest offset from the picked particle

// Orbit controls
pub const ORBIT_MIN_DISTANCE: f32 = 1.5;
pub const ORBIT_MAX_DISTANCE: f32 = 12.0;
pub const ORBIT_DOLLY_FACTOR: f32 = 0.95; // distance scale per wheel notch
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3;

// Video catalog
pub const VIDEO_CATALOG_LEN: usize = 23;
pub const VIDEO_PATH_PREFIX: &str = "videos/";
pub const VIDEO_PATH_SUFFIX: &str = ".mp4";

// Overlay layout (CSS pixels)
pub const PRIMARY_SIZE: [f32; 2] = [320.0, 180.0];
pub const THUMB_SIZE: [f32; 2] = [160.0, 90.0];
pub const THUMB_SPEED_MAX: f32 = 1.5; // px per frame, per axis
pub const DOT_SPEED_MAX: f32 = 1.0;
pub const DOT_DIAMETER_MIN: f32 = 6.0;
pub const DOT_DIAMETER_MAX: f32 = 14.0;
pub const DOT_SPAWN_SPREAD: f32 = 120.0; // max distance of a new dot from its video's center
pub const FADE_IN_STEP: f32 = 0.05; // fade/scale-in progress per frame
pub const FADE_IN_START_SCALE: f32 = 0.5;

// Dismissal
pub const DISMISS_ARM_DELAY_MS: f64 = 100.0;
pub const FADE_OUT_MS: i32 = 300; // DOM fade/scale-out before removal

#[inline]
pub fn camera_home_vec3() -> Vec3 {
    Vec3::from_array(CAMERA_HOME)
}

#[inline]
pub fn zoom_offset_vec3() -> Vec3 {
    Vec3::from_array(ZOOM_OFFSET)
}
