//! Maps winit key codes onto orbit controls.

use corelib::{Vec2, controls::OrbitInput};
use winit::keyboard::KeyCode;

/// What the event loop should do after a key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
    Exit,
}

/// Held keys plus mouse motion accumulated between frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    held: OrbitInput,
}

impl InputState {
    pub fn on_key(&mut self, code: KeyCode, pressed: bool) -> KeyOutcome {
        let slot = match code {
            KeyCode::Escape if pressed => return KeyOutcome::Exit,
            KeyCode::KeyW => &mut self.held.zoom_in,
            KeyCode::KeyS => &mut self.held.zoom_out,
            KeyCode::KeyA => &mut self.held.orbit_left,
            KeyCode::KeyD => &mut self.held.orbit_right,
            KeyCode::ArrowUp => &mut self.held.tilt_up,
            KeyCode::ArrowDown => &mut self.held.tilt_down,
            KeyCode::KeyL => &mut self.held.toggle_light,
            _ => return KeyOutcome::Ignored,
        };
        *slot = pressed;
        KeyOutcome::Handled
    }

    pub fn add_mouse_delta(&mut self, dx: f64, dy: f64) {
        self.held.mouse_delta += Vec2::new(dx as f32, dy as f32);
    }

    /// Input for this frame; mouse motion is consumed, held keys stay held.
    pub fn take_frame(&mut self) -> OrbitInput {
        let frame = self.held;
        self.held.mouse_delta = Vec2::ZERO;
        frame
    }

    /// Forget everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held = OrbitInput::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_survive_frames() {
        let mut input = InputState::default();
        assert_eq!(input.on_key(KeyCode::KeyW, true), KeyOutcome::Handled);
        assert!(input.take_frame().zoom_in);
        assert!(input.take_frame().zoom_in);
        input.on_key(KeyCode::KeyW, false);
        assert!(!input.take_frame().zoom_in);
    }

    #[test]
    fn mouse_motion_is_consumed_per_frame() {
        let mut input = InputState::default();
        input.add_mouse_delta(3.0, -1.0);
        input.add_mouse_delta(2.0, 0.5);
        assert_eq!(input.take_frame().mouse_delta, Vec2::new(5.0, -0.5));
        assert_eq!(input.take_frame().mouse_delta, Vec2::ZERO);
    }

    #[test]
    fn escape_exits_and_unknown_keys_are_ignored() {
        let mut input = InputState::default();
        assert_eq!(input.on_key(KeyCode::Escape, true), KeyOutcome::Exit);
        assert_eq!(input.on_key(KeyCode::Escape, false), KeyOutcome::Ignored);
        assert_eq!(input.on_key(KeyCode::KeyQ, true), KeyOutcome::Ignored);
        input.on_key(KeyCode::ArrowUp, true);
        input.on_key(KeyCode::KeyL, true);
        input.clear();
        assert_eq!(input.take_frame(), OrbitInput::default());
    }
}
