//! Interactive scene state and its input handlers.
//!
//! Handlers mutate the state synchronously and report whether the change is
//! visible, so the event loop only asks for a redraw when one is needed.

use crate::{
    camera::{Camera, Direction},
    config::SceneConfig,
};

/// Keys the scene reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    /// Toggle the red spotlight.
    F1,
    /// Toggle the green spotlight.
    F2,
    /// Toggle the blue spotlight.
    F3,
    /// Toggle the water texture.
    F4,
    /// Toggle between tiled and plain walls.
    F5,
}

/// Mouse buttons that start a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButtonState {
    Left = 0,
    Right = 1,
    Middle = 2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseState {
    pub coords: (f64, f64),
    /// Held flags indexed by [`MouseButtonState`].
    pub held: [bool; 3],
}

impl MouseState {
    pub fn is_held(&self, button: MouseButtonState) -> bool {
        self.held[button as usize]
    }

    /// True while any button is down.
    pub fn is_dragging(&self) -> bool {
        self.held.iter().any(|&held| held)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub camera: Camera,
    /// Red, green and blue spotlights.
    pub lights: [bool; 3],
    pub textured_water: bool,
    pub plain_walls: bool,
    pub mouse: MouseState,
    mouse_sensitivity: f32,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            camera: Camera::new(config.viewer, config.look_at),
            lights: [true; 3],
            textured_water: false,
            plain_walls: false,
            mouse: MouseState::default(),
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }

    pub fn on_key(&mut self, key: Key) -> bool {
        log::debug!("Key {:?}", key);
        match key {
            Key::Up => self.camera.move_along_view(Direction::Forward),
            Key::Down => self.camera.move_along_view(Direction::Backward),
            Key::F1 => self.lights[0] = !self.lights[0],
            Key::F2 => self.lights[1] = !self.lights[1],
            Key::F3 => self.lights[2] = !self.lights[2],
            Key::F4 => self.textured_water = !self.textured_water,
            Key::F5 => self.plain_walls = !self.plain_walls,
        }
        true
    }

    /// Press or release one button. The others keep their state.
    pub fn on_mouse_button(&mut self, button: MouseButtonState, pressed: bool) {
        self.mouse.held[button as usize] = pressed;
    }

    /// Route a cursor move to [`on_drag`](Self::on_drag) or
    /// [`on_hover`](Self::on_hover) depending on the button state.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> bool {
        if self.mouse.is_dragging() {
            self.on_drag(x, y)
        } else {
            self.on_hover(x, y)
        }
    }

    /// Orbit the camera by the distance travelled since the last known cursor position.
    pub fn on_drag(&mut self, x: f64, y: f64) -> bool {
        let (last_x, last_y) = self.mouse.coords;
        let (dx, dy) = ((x - last_x) as f32, (y - last_y) as f32);
        self.camera.orbit(dx, dy, self.mouse_sensitivity);
        self.mouse.coords = (x, y);
        dx != 0.0 || dy != 0.0
    }

    /// Only remember where the cursor is.
    pub fn on_hover(&mut self, x: f64, y: f64) -> bool {
        self.mouse.coords = (x, y);
        false
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}
