use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Pixels of touchpad scroll that count as one wheel line
const PIXELS_PER_LINE: f32 = 50.0;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    pressed_keys: HashSet<Button>,
    /// Same buttons in press order, for get_down_keys
    pressed_vec: Vec<Button>,
    mouse_position: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
    scroll: f32,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.set_button(button, event.state);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = Self::mouse_button_to_button(*button) {
                    self.set_button(button, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                }
            }
            ElementState::Released => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
            }
        }
    }

    fn move_cursor(&mut self, x: f32, y: f32) {
        if let Some((old_x, old_y)) = self.mouse_position {
            self.mouse_delta.0 += x - old_x;
            self.mouse_delta.1 += y - old_y;
        }
        self.mouse_position = Some((x, y));
    }

    /// Buttons held while the window lost focus never see their release
    fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
    }

    /// Reset per-frame state; call once the frame has consumed the input
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
    }

    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }

    fn pointer_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit events carry device ids that cannot be built in tests, so these
    // drive the state helpers directly.

    #[test]
    fn test_new_controller_empty() {
        let controller = WinitController::new();
        assert!(!controller.is_down(Button::KeyW));
        assert_eq!(controller.get_down_keys().len(), 0);
        assert_eq!(controller.mouse_position(), None);
        assert_eq!(controller.pointer_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_press_and_release() {
        let mut controller = WinitController::new();
        controller.set_button(Button::MouseLeft, ElementState::Pressed);
        controller.set_button(Button::MouseLeft, ElementState::Pressed);
        assert_eq!(controller.get_down_keys(), &[Button::MouseLeft]);

        controller.set_button(Button::MouseLeft, ElementState::Released);
        assert!(!controller.is_down(Button::MouseLeft));
        assert!(controller.get_down_keys().is_empty());
    }

    #[test]
    fn test_cursor_accumulates_delta() {
        let mut controller = WinitController::new();
        // First position only anchors
        controller.move_cursor(100.0, 100.0);
        controller.move_cursor(110.0, 95.0);
        controller.move_cursor(115.0, 95.0);
        assert_eq!(controller.pointer_delta(), (15.0, -5.0));
    }

    #[test]
    fn test_delta_reset() {
        let mut controller = WinitController::new();
        controller.move_cursor(100.0, 200.0);
        controller.move_cursor(110.0, 205.0);
        controller.scroll = 2.0;

        controller.reset_deltas();
        assert_eq!(controller.pointer_delta(), (0.0, 0.0));
        assert_eq!(controller.scroll_delta(), 0.0);
        // Position should remain
        assert_eq!(controller.mouse_position(), Some((110.0, 205.0)));
    }

    #[test]
    fn test_focus_loss_releases_buttons() {
        let mut controller = WinitController::new();
        controller.set_button(Button::KeyQ, ElementState::Pressed);
        controller.release_all();
        assert!(!controller.is_down(Button::KeyQ));
    }
}
