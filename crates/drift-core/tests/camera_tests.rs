// Host-side tests for easing, the zoom state machine and orbit controls.

use drift_core::*;
use glam::{Vec2, Vec3};

fn approx(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).length() <= eps
}

#[test]
fn ease_out_cubic_endpoints_and_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    // clamped outside [0, 1]
    assert_eq!(ease_out_cubic(-1.0), 0.0);
    assert_eq!(ease_out_cubic(2.0), 1.0);
    let mut prev = 0.0;
    for k in 1..=100 {
        let e = ease_out_cubic(k as f32 / 100.0);
        assert!(e >= prev);
        prev = e;
    }
}

#[test]
fn zoom_in_reaches_target_after_fifty_steps_and_faces_it() {
    let home = camera_home_vec3();
    let mut camera = Camera::new(home, 16.0 / 9.0);
    let mut t = CameraTransition::new(home, ZOOM_STEP);
    let selected = Vec3::new(0.4, 1.2, -0.3);
    t.zoom_in(camera.eye, selected, zoom_offset_vec3());
    assert_eq!(t.phase(), CameraPhase::ZoomingIn);

    for frame in 0..49 {
        assert!(t.step(&mut camera));
        assert_eq!(t.phase(), CameraPhase::ZoomingIn, "finished early at {frame}");
    }
    assert!(t.step(&mut camera));
    assert_eq!(t.phase(), CameraPhase::Idle);
    assert_eq!(t.progress(), 1.0);

    let target = selected + zoom_offset_vec3();
    assert_eq!(t.target(), Some(target));
    assert!(approx(camera.eye, target, 1e-5));
    let want = (selected - camera.eye).normalize();
    assert!(camera.forward().dot(want) > 0.9999);
}

#[test]
fn parked_camera_stays_put_until_zoom_out() {
    let home = camera_home_vec3();
    let mut camera = Camera::new(home, 1.0);
    let mut t = CameraTransition::new(home, ZOOM_STEP);
    let selected = Vec3::new(-0.5, 0.2, 0.8);
    t.zoom_in(home, selected, zoom_offset_vec3());
    for _ in 0..50 {
        t.step(&mut camera);
    }
    let parked = camera.eye;
    for _ in 0..20 {
        assert!(!t.step(&mut camera));
    }
    assert_eq!(camera.eye, parked);
    assert_eq!(camera.target, selected);
    assert!(!t.is_free());
    assert!(!t.is_zooming());
}

#[test]
fn zoom_out_eases_from_the_live_eye_and_lands_home() {
    let home = camera_home_vec3();
    let mut camera = Camera::new(home, 1.0);
    let mut t = CameraTransition::new(home, ZOOM_STEP);
    t.zoom_in(home, Vec3::new(0.0, 1.0, 0.0), zoom_offset_vec3());
    for _ in 0..50 {
        t.step(&mut camera);
    }
    let parked = camera.eye;
    t.zoom_out(Vec3::ZERO);
    assert_eq!(t.focus(), None);

    t.step(&mut camera);
    // first frame: eased from the parked eye by ease(0.02)
    let expect = parked.lerp(home, ease_out_cubic(ZOOM_STEP));
    assert!(approx(camera.eye, expect, 1e-5));

    // second frame starts from the moved eye, not the snapshot
    let before = camera.eye;
    t.step(&mut camera);
    let expect = before.lerp(home, ease_out_cubic(2.0 * ZOOM_STEP));
    assert!(approx(camera.eye, expect, 1e-5));

    let mut frames = 2;
    while t.is_zooming() {
        t.step(&mut camera);
        frames += 1;
        assert!(frames <= 50);
    }
    assert_eq!(frames, 50);
    assert_eq!(camera.eye, home);
    assert!(t.is_free());
}

#[test]
fn look_point_eases_with_the_eye() {
    let home = camera_home_vec3();
    let mut camera = Camera::new(home, 1.0);
    let mut t = CameraTransition::new(home, ZOOM_STEP);
    let selected = Vec3::new(0.6, 1.0, 0.2);
    t.zoom_in(home, selected, zoom_offset_vec3());

    // no snap on the first frame: the look point has only begun to turn
    t.step(&mut camera);
    let e = ease_out_cubic(ZOOM_STEP);
    assert!(approx(camera.target, Vec3::ZERO.lerp(selected, e), 1e-5));
    let mut prev = camera.target.distance(selected);
    while t.is_zooming() {
        t.step(&mut camera);
        let d = camera.target.distance(selected);
        assert!(d <= prev + 1e-6);
        prev = d;
    }
    assert_eq!(camera.target, selected);

    let look_home = Vec3::new(0.0, 0.5, 0.0);
    t.zoom_out(look_home);
    t.step(&mut camera);
    assert!(approx(camera.target, selected.lerp(look_home, e), 1e-5));
    while t.is_zooming() {
        t.step(&mut camera);
    }
    assert_eq!(camera.target, look_home);
}

#[test]
fn zoom_out_from_idle_is_harmless() {
    let home = camera_home_vec3();
    let mut camera = Camera::new(home, 1.0);
    let mut t = CameraTransition::new(home, 0.5);
    t.zoom_out(Vec3::ZERO);
    t.step(&mut camera);
    t.step(&mut camera);
    assert_eq!(t.phase(), CameraPhase::Idle);
    assert_eq!(camera.eye, home);
}

#[test]
fn world_to_screen_and_ray_agree() {
    let viewport = Viewport::new(1024.0, 768.0);
    let camera = Camera::new(Vec3::new(1.0, 2.0, 6.0), viewport.aspect());
    let p = Vec3::new(0.4, -0.3, 0.2);
    let px = camera.world_to_screen(p, viewport).expect("in front");
    let ray = camera.screen_to_world_ray(px, viewport);
    assert!((ray.dir.length() - 1.0).abs() < 1e-5);
    assert_eq!(ray.origin, camera.eye);
    let t = (p - ray.origin).dot(ray.dir);
    assert!(ray.at(t).distance(p) < 1e-3);
}

#[test]
fn screen_center_maps_to_the_view_direction() {
    let viewport = Viewport::new(800.0, 600.0);
    let camera = Camera::new(camera_home_vec3(), viewport.aspect());
    let ray = camera.screen_to_world_ray(viewport.center(), viewport);
    assert!(approx(ray.dir, Vec3::new(0.0, 0.0, -1.0), 1e-5));
    assert!(camera.world_to_screen(Vec3::new(0.0, 0.0, 9.0), viewport).is_none());
}

#[test]
fn orbit_round_trips_the_home_eye() {
    let orbit = OrbitControls::new(camera_home_vec3(), Vec3::ZERO);
    assert!(approx(orbit.eye(), camera_home_vec3(), 1e-5));
    assert!((orbit.radius() - 5.0).abs() < 1e-6);
}

#[test]
fn orbit_rotate_keeps_distance_and_respects_enabled() {
    let viewport = Viewport::new(800.0, 600.0);
    let mut orbit = OrbitControls::new(camera_home_vec3(), Vec3::ZERO);
    orbit.rotate(Vec2::new(150.0, 0.0), viewport);
    let eye = orbit.eye();
    assert!((eye.length() - 5.0).abs() < 1e-4);
    assert!(eye.x < 0.0, "dragging right swings the eye to -X, got {eye:?}");

    orbit.enabled = false;
    orbit.rotate(Vec2::new(0.0, 200.0), viewport);
    assert!(approx(orbit.eye(), eye, 1e-6));
}

#[test]
fn orbit_never_flips_over_the_pole() {
    let viewport = Viewport::new(800.0, 600.0);
    let mut orbit = OrbitControls::new(camera_home_vec3(), Vec3::ZERO);
    orbit.rotate(Vec2::new(0.0, 10_000.0), viewport);
    let eye = orbit.eye();
    assert!(eye.y > 4.99);
    assert!(eye.is_finite());
}

#[test]
fn dolly_scales_and_clamps_distance() {
    let mut orbit = OrbitControls::new(camera_home_vec3(), Vec3::ZERO);
    orbit.dolly(-1.0);
    assert!((orbit.radius() - 5.0 * ORBIT_DOLLY_FACTOR).abs() < 1e-5);
    for _ in 0..200 {
        orbit.dolly(-1.0);
    }
    assert_eq!(orbit.radius(), ORBIT_MIN_DISTANCE);
    for _ in 0..200 {
        orbit.dolly(1.0);
    }
    assert_eq!(orbit.radius(), ORBIT_MAX_DISTANCE);
}

#[test]
fn apply_moves_camera_onto_the_sphere() {
    let mut camera = Camera::new(camera_home_vec3(), 1.0);
    let mut orbit = OrbitControls::new(camera.eye, Vec3::ZERO);
    orbit.dolly(1.0);
    orbit.apply(&mut camera);
    assert!((camera.eye.length() - orbit.radius()).abs() < 1e-5);
    assert_eq!(camera.target, Vec3::ZERO);
}
