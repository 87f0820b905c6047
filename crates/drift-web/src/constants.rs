// Rendering and presentation tuning constants for the web frontend.

// Point sprites
pub const POINT_SIZE: f32 = 0.035; // world-space half extent of one particle sprite
pub const POINT_INTENSITY: f32 = 1.6; // HDR brightness before bloom

// Bloom
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6; // luminance above which pixels feed the bloom

// Scene clear color (linear)
pub const CLEAR_RGB: [f64; 3] = [0.01, 0.012, 0.025];

// Overlay DOM
pub const OVERLAY_LAYER_ID: &str = "overlay-layer";
pub const OVERLAY_Z_INDEX: i32 = 10;
pub const CONNECTOR_WIDTH_PX: f32 = 1.0;
pub const DOT_GLOW_SCALE: f32 = 1.5; // glow blur radius relative to dot diameter

// Wheel: pixels per dolly notch when the browser reports pixel deltas
pub const WHEEL_PIXELS_PER_NOTCH: f32 = 100.0;
pub const WHEEL_LINES_PER_NOTCH: f32 = 3.0;
