// CSS value builders for overlay nodes.
//
// Pure string formatting so the presenter only applies values; kept free of
// `web_sys` so it can be exercised on the host.

use crate::constants::{CONNECTOR_WIDTH_PX, DOT_GLOW_SCALE, OVERLAY_Z_INDEX};
use drift_core::{CardRole, Connector};
use glam::Vec2;

#[inline]
pub fn px(v: f32) -> String {
    format!("{:.2}px", v)
}

/// `rgb()` from linear-ish 0..1 components.
pub fn rgb(color: [f32; 3]) -> String {
    let c = color.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgb({}, {}, {})", c[0], c[1], c[2])
}

pub fn rgba(color: [f32; 3], alpha: f32) -> String {
    let c = color.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgba({}, {}, {}, {:.2})", c[0], c[1], c[2], alpha.clamp(0.0, 1.0))
}

#[inline]
pub fn scale(s: f32) -> String {
    format!("scale({:.3})", s)
}

/// Inline style for a freshly created video card.
pub fn card_css(role: CardRole, width: f32, height: f32) -> String {
    let (radius, shadow) = match role {
        CardRole::Primary => (10, "0 0 24px rgba(255, 255, 255, 0.35)"),
        CardRole::Related => (6, "0 0 12px rgba(255, 255, 255, 0.2)"),
    };
    format!(
        "position:absolute;left:0;top:0;width:{};height:{};object-fit:cover;\
         border-radius:{}px;box-shadow:{};opacity:0;transform:scale(0.5);\
         transform-origin:50% 50%;pointer-events:auto;z-index:{}",
        px(width),
        px(height),
        radius,
        shadow,
        OVERLAY_Z_INDEX + if role == CardRole::Primary { 2 } else { 1 }
    )
}

/// Radial gradient fill for a decorative dot.
pub fn dot_background(color: [f32; 3]) -> String {
    format!(
        "radial-gradient(circle, {} 0%, {} 45%, {} 100%)",
        rgba([1.0, 1.0, 1.0], 1.0),
        rgba(color, 0.9),
        rgba(color, 0.0)
    )
}

pub fn dot_glow(color: [f32; 3], diameter: f32) -> String {
    format!("0 0 {} {}", px(diameter * DOT_GLOW_SCALE), rgba(color, 0.8))
}

pub fn dot_css(color: [f32; 3], diameter: f32) -> String {
    format!(
        "position:absolute;left:0;top:0;width:{d};height:{d};border-radius:50%;\
         background:{};box-shadow:{};opacity:0;pointer-events:none;z-index:{}",
        dot_background(color),
        dot_glow(color, diameter),
        OVERLAY_Z_INDEX,
        d = px(diameter),
    )
}

pub fn line_css(color: [f32; 3]) -> String {
    format!(
        "position:absolute;left:0;top:0;width:0;height:{};background:{};\
         transform-origin:0 50%;pointer-events:none;z-index:{}",
        px(CONNECTOR_WIDTH_PX),
        rgba(color, 0.6),
        OVERLAY_Z_INDEX
    )
}

/// Top-left corner for a connector line so its centerline starts at the
/// connector origin; the line rotates about its left-middle point.
#[inline]
pub fn connector_top_left(c: &Connector) -> Vec2 {
    Vec2::new(c.origin.x, c.origin.y - CONNECTOR_WIDTH_PX * 0.5)
}

/// Rotation applied to a connector whose left/top sit at its origin.
#[inline]
pub fn connector_transform(c: &Connector) -> String {
    format!("rotate({:.4}rad)", c.angle_rad)
}

/// Transition installed just before fade-out.
pub fn fade_out_transition(ms: i32) -> String {
    format!("opacity {ms}ms ease-out, transform {ms}ms ease-out")
}
