use bevy_ecs::prelude::*;
use std::collections::HashSet;
use winit::event::MouseButton;

/// Resource that tracks mouse input state for the scene controls
#[derive(Resource, Default)]
pub struct InputState {
    /// Currently held mouse buttons
    pub buttons_pressed: HashSet<MouseButton>,
    /// Cursor movement while dragging since last frame (x, y)
    pub mouse_delta: (f32, f32),
    /// Mouse position in window coordinates
    pub mouse_position: Option<(f32, f32)>,
    /// Scroll lines since last frame, positive is away from the user
    pub scroll_delta: f32,
    /// Set by the UI layer when the pointer belongs to a panel
    pub pointer_over_ui: bool,
    /// Window height in physical pixels, the unit of `mouse_delta`
    pub window_height: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Reset per-frame state (call at end of each frame)
    pub fn reset_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.buttons_pressed.insert(button);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.buttons_pressed.remove(&button);
    }

    /// Update mouse position; movement counts as drag only while the left button is held
    pub fn set_mouse_position(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.mouse_position {
            if self.is_button_pressed(MouseButton::Left) {
                self.mouse_delta.0 += x - last_x;
                self.mouse_delta.1 += y - last_y;
            }
        }
        self.mouse_position = Some((x, y));
    }

    pub fn add_scroll(&mut self, lines: f32) {
        self.scroll_delta += lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_without_drag_is_ignored() {
        let mut input = InputState::new();
        input.set_mouse_position(10.0, 10.0);
        input.set_mouse_position(20.0, 15.0);
        assert_eq!(input.mouse_delta, (0.0, 0.0));
        assert_eq!(input.mouse_position, Some((20.0, 15.0)));
    }

    #[test]
    fn drag_accumulates_until_reset() {
        let mut input = InputState::new();
        input.set_mouse_position(10.0, 10.0);
        input.press_button(MouseButton::Left);
        input.set_mouse_position(15.0, 12.0);
        input.set_mouse_position(18.0, 9.0);
        input.add_scroll(1.5);
        assert_eq!(input.mouse_delta, (8.0, -1.0));
        assert_eq!(input.scroll_delta, 1.5);

        input.reset_frame();
        assert_eq!(input.mouse_delta, (0.0, 0.0));
        assert_eq!(input.scroll_delta, 0.0);
        assert!(input.is_button_pressed(MouseButton::Left));

        input.release_button(MouseButton::Left);
        assert!(!input.is_button_pressed(MouseButton::Left));
    }
}
