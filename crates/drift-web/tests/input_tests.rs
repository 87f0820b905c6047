// Host-side tests for pure input functions.
// The web crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn wheel_pixels_are_scaled_to_notches() {
    assert!((wheel_notches(100.0, 0) - 1.0).abs() < 1e-6);
    assert!((wheel_notches(-250.0, 0) + 2.5).abs() < 1e-6);
}

#[test]
fn wheel_lines_and_pages() {
    assert!((wheel_notches(3.0, 1) - 1.0).abs() < 1e-6);
    assert_eq!(wheel_notches(0.4, 2), 1.0);
    assert_eq!(wheel_notches(-7.0, 2), -1.0);
}

#[test]
fn key_mapping() {
    assert_eq!(key_action(" "), Some(KeyAction::ToggleAnimation));
    assert_eq!(key_action("r"), Some(KeyAction::ToggleRotation));
    assert_eq!(key_action("R"), Some(KeyAction::ToggleRotation));
    assert_eq!(key_action("Escape"), Some(KeyAction::Dismiss));
    assert_eq!(key_action("Enter"), None);
    assert_eq!(key_action("a"), None);
}
