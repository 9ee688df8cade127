/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    Space,
    Shift,
    Escape,
    MouseLeft,
    MouseRight,
}

/// Controller - button states plus per-frame pointer motion
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];

    /// Pointer movement in pixels since the last frame
    fn pointer_delta(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    /// Scroll in lines since the last frame, positive away from the user
    fn scroll_delta(&self) -> f32 {
        0.0
    }
}

/// Controller that never reports input; used by headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl Controller for NoInput {
    fn is_down(&self, _button: Button) -> bool {
        false
    }

    fn get_down_keys(&self) -> &[Button] {
        &[]
    }
}
