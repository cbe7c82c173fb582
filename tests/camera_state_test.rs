use approx::assert_relative_eq;
use cgmath::{Point3, Vector3};
use pool_scene::{
    camera::{Camera, CameraUniform, Direction, Projection},
    config::SceneConfig,
    state::{Key, MouseButtonState, SceneState},
};

use crate::common::test_utils::default_state;

mod common;

fn camera() -> Camera {
    Camera::new(Point3::new(50.0, 50.0, 150.0), Point3::new(0.0, 0.0, 0.0))
}

#[test]
fn moving_keeps_the_view() {
    let mut cam = camera();
    let offset = cam.look_at() - cam.viewer();
    let direction = cam.direction();

    cam.move_along_view(Direction::Forward);
    assert_relative_eq!(cam.look_at() - cam.viewer(), offset, epsilon = 1e-4);
    assert_relative_eq!(cam.direction(), direction, epsilon = 1e-5);
    assert_relative_eq!(cam.viewer(), Point3::new(50.0, 50.0, 150.0) + direction, epsilon = 1e-4);

    cam.move_along_view(Direction::Backward);
    assert_relative_eq!(cam.viewer(), Point3::new(50.0, 50.0, 150.0), epsilon = 1e-4);
    assert_relative_eq!(cam.look_at(), Point3::new(0.0, 0.0, 0.0), epsilon = 1e-4);
}

#[test]
fn a_zero_drag_changes_nothing() {
    let mut cam = camera();
    let before = cam;
    cam.orbit(0.0, 0.0, 20.0);
    assert_eq!(cam, before);
}

#[test]
fn orbiting_swings_the_look_at_point() {
    let start = camera();

    let mut yawed = start;
    yawed.orbit(15.0, 0.0, 20.0);
    assert_eq!(yawed.viewer(), start.viewer());
    assert_relative_eq!(yawed.distance(), start.distance(), epsilon = 1e-3);
    // Yaw turns around world up, so the vertical component is unchanged
    assert_relative_eq!(yawed.direction().y, start.direction().y, epsilon = 1e-5);
    assert!((yawed.direction().x - start.direction().x).abs() > 1e-3);

    let mut pitched = start;
    pitched.orbit(0.0, 15.0, 20.0);
    assert_relative_eq!(pitched.distance(), start.distance(), epsilon = 1e-3);
    assert_relative_eq!(pitched.direction().x, start.direction().x, epsilon = 1e-5);
    assert!((pitched.direction().y - start.direction().y).abs() > 1e-3);
}

/// `v * m` with `m` given row by row, as a row vector times a 3x3 matrix.
fn row_times(v: Vector3<f32>, m: [[f32; 3]; 3]) -> Vector3<f32> {
    Vector3::new(
        v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0],
        v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1],
        v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2],
    )
}

fn yaw_rows(angle: f32) -> [[f32; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

fn pitch_rows(angle: f32) -> [[f32; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

#[test]
fn orbit_turns_by_drag_over_sensitivity() {
    let start = camera();
    let d = start.direction();

    let mut yawed = start;
    yawed.orbit(15.0, 0.0, 20.0);
    let expected = row_times(row_times(d, yaw_rows(0.75)), pitch_rows(0.0));
    assert_relative_eq!(yawed.direction(), expected, epsilon = 1e-5);
    assert_relative_eq!(
        yawed.look_at(),
        start.viewer() + expected * start.distance(),
        epsilon = 1e-3
    );

    let mut pitched = start;
    pitched.orbit(0.0, 15.0, 20.0);
    let expected = row_times(row_times(d, yaw_rows(0.0)), pitch_rows(0.75));
    assert_relative_eq!(pitched.direction(), expected, epsilon = 1e-5);

    // Yaw is applied before pitch
    let mut both = start;
    both.orbit(10.0, -6.0, 20.0);
    let expected = row_times(row_times(d, yaw_rows(0.5)), pitch_rows(-0.3));
    assert_relative_eq!(both.direction(), expected, epsilon = 1e-5);
}

#[test]
#[should_panic]
fn viewer_and_look_at_must_differ() {
    Camera::new(Point3::new(1.0, 2.0, 3.0), Point3::new(1.0, 2.0, 3.0));
}

#[test]
fn projection_follows_the_window() {
    let mut projection = Projection::new(750, 750, 1.5, 1000.0);
    assert_eq!(projection.aspect(), 1.0);
    projection.resize(1500, 750);
    assert_eq!(projection.aspect(), 2.0);
    projection.resize(10, 0);
    assert!(projection.aspect().is_finite());
}

#[test]
fn uniform_tracks_the_viewer() {
    let cam = camera();
    let mut uniform = CameraUniform::new();
    uniform.update_view_proj(&cam, &Projection::new(750, 750, 1.5, 1000.0));
    assert_eq!(uniform.view_position, [50.0, 50.0, 150.0, 1.0]);
    assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
}

#[test]
fn initial_state() {
    let config = SceneConfig::default();
    let state = SceneState::new(&config);
    assert_eq!(state.lights, [true, true, true]);
    assert!(!state.textured_water);
    assert!(!state.plain_walls);
    assert!(!state.mouse.is_dragging());
    assert_eq!(state.camera.viewer(), config.viewer);
    assert_eq!(state.camera.look_at(), config.look_at);
}

#[test]
fn function_keys_toggle() {
    let mut state = default_state();
    for (key, light) in [(Key::F1, 0), (Key::F2, 1), (Key::F3, 2)] {
        assert!(state.on_key(key));
        assert!(!state.lights[light]);
        assert!(state.on_key(key));
        assert!(state.lights[light]);
    }

    assert!(state.on_key(Key::F4));
    assert!(state.textured_water);
    state.on_key(Key::F4);
    assert!(!state.textured_water);

    assert!(state.on_key(Key::F5));
    assert!(state.plain_walls);
    state.on_key(Key::F5);
    assert!(!state.plain_walls);
}

#[test]
fn arrow_keys_move_the_camera() {
    let mut state = default_state();
    let start = state.camera;
    assert!(state.on_key(Key::Up));
    assert!(state.camera.viewer() != start.viewer());
    assert!(state.on_key(Key::Down));
    assert_relative_eq!(state.camera.viewer(), start.viewer(), epsilon = 1e-4);
}

#[test]
fn hovering_only_tracks_the_cursor() {
    let mut state = default_state();
    let start = state.camera;
    assert!(!state.on_cursor_moved(100.0, 200.0));
    assert_eq!(state.mouse.coords, (100.0, 200.0));
    assert_eq!(state.camera, start);
}

#[test]
fn dragging_orbits_from_the_last_position() {
    let mut state = default_state();
    let start = state.camera;
    state.on_cursor_moved(100.0, 100.0);
    state.on_mouse_button(MouseButtonState::Left, true);
    assert!(state.mouse.is_dragging());

    assert!(!state.on_cursor_moved(100.0, 100.0));
    assert_eq!(state.camera, start);

    assert!(state.on_cursor_moved(130.0, 90.0));
    assert!(state.camera != start);
    assert_eq!(state.camera.viewer(), start.viewer());
    assert_eq!(state.mouse.coords, (130.0, 90.0));

    state.on_mouse_button(MouseButtonState::Left, false);
    let after = state.camera;
    assert!(!state.on_cursor_moved(500.0, 500.0));
    assert_eq!(state.camera, after);
}

#[test]
fn any_button_drags() {
    for button in [MouseButtonState::Right, MouseButtonState::Middle] {
        let mut state = default_state();
        state.on_mouse_button(button, true);
        assert!(state.on_cursor_moved(5.0, 0.0));
        let moved: Vector3<f32> = state.camera.look_at() - default_state().camera.look_at();
        assert!(moved.x != 0.0 || moved.z != 0.0);
    }
}

#[test]
fn releasing_one_button_keeps_dragging_with_another() {
    let mut state = default_state();
    state.on_cursor_moved(0.0, 0.0);
    state.on_mouse_button(MouseButtonState::Left, true);
    state.on_mouse_button(MouseButtonState::Right, true);
    state.on_mouse_button(MouseButtonState::Right, false);
    assert!(state.mouse.is_held(MouseButtonState::Left));
    assert!(!state.mouse.is_held(MouseButtonState::Right));
    assert!(state.mouse.is_dragging());

    let before = state.camera;
    assert!(state.on_cursor_moved(10.0, 0.0));
    assert!(state.camera != before);

    state.on_mouse_button(MouseButtonState::Left, false);
    assert!(!state.mouse.is_dragging());
    let after = state.camera;
    assert!(!state.on_cursor_moved(40.0, 0.0));
    assert_eq!(state.camera, after);
}

#[test]
fn releasing_an_unheld_button_changes_nothing() {
    let mut state = default_state();
    state.on_mouse_button(MouseButtonState::Middle, true);
    state.on_mouse_button(MouseButtonState::Left, false);
    assert!(state.mouse.is_held(MouseButtonState::Middle));
    assert!(state.mouse.is_dragging());
}
