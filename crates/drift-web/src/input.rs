use crate::constants::{WHEEL_LINES_PER_NOTCH, WHEEL_PIXELS_PER_NOTCH};
use glam::Vec2;
use web_sys as web;

// ---------------- Pointer helpers ----------------

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Wheel delta in dolly notches; positive scrolls away.
///
/// `delta_mode` follows `WheelEvent.deltaMode`: 0 pixels, 1 lines, 2 pages.
#[inline]
pub fn wheel_notches(delta_y: f64, delta_mode: u32) -> f32 {
    let d = delta_y as f32;
    match delta_mode {
        0 => d / WHEEL_PIXELS_PER_NOTCH,
        1 => d / WHEEL_LINES_PER_NOTCH,
        _ => d.signum(),
    }
}

// ---------------- Keyboard mapping ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleAnimation,
    ToggleRotation,
    Dismiss,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " => Some(KeyAction::ToggleAnimation),
        "r" | "R" => Some(KeyAction::ToggleRotation),
        "Escape" => Some(KeyAction::Dismiss),
        _ => None,
    }
}
