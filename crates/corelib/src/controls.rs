//! Keyboard/mouse driven orbit controls.

use crate::{Vec2, camera::OrbitCamera, light::PointLight};

/// Units (or radians) per second for keyboard movement.
pub const ORBIT_SPEED: f32 = 6.0;
/// Radians per pixel of mouse motion.
pub const MOUSE_SPEED: f32 = 0.005;
pub const MIN_RADIUS: f32 = 0.1;

/// Input snapshot for one frame. Booleans are "key currently held".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitInput {
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub orbit_left: bool,
    pub orbit_right: bool,
    pub tilt_up: bool,
    pub tilt_down: bool,
    pub toggle_light: bool,
    /// Accumulated pointer motion in pixels since the last frame.
    pub mouse_delta: Vec2,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OrbitControls {
    toggle_was_down: bool,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame of input. Mouse motion is applied before keys.
    pub fn update(
        &mut self,
        camera: &mut OrbitCamera,
        light: &mut PointLight,
        input: &OrbitInput,
        dt: f32,
    ) {
        camera.horizontal_angle -= MOUSE_SPEED * input.mouse_delta.x;
        camera.vertical_angle -= MOUSE_SPEED * input.mouse_delta.y;

        let step = dt * ORBIT_SPEED;
        if input.zoom_in {
            camera.radius = (camera.radius - step).max(MIN_RADIUS);
        }
        if input.zoom_out {
            camera.radius += step;
        }
        if input.orbit_left {
            camera.horizontal_angle -= step;
        }
        if input.orbit_right {
            camera.horizontal_angle += step;
        }
        if input.tilt_up {
            camera.vertical_angle += step;
        }
        if input.tilt_down {
            camera.vertical_angle -= step;
        }

        if input.toggle_light && !self.toggle_was_down {
            light.toggle();
        }
        self.toggle_was_down = input.toggle_light;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (OrbitControls, OrbitCamera, PointLight) {
        (OrbitControls::new(), OrbitCamera::default(), PointLight::default())
    }

    #[test]
    fn zoom_in_is_clamped_to_min_radius() {
        let (mut controls, mut cam, mut light) = fixture();
        let input = OrbitInput {
            zoom_in: true,
            ..Default::default()
        };
        controls.update(&mut cam, &mut light, &input, 10.0);
        assert_eq!(cam.radius, MIN_RADIUS);
    }

    #[test]
    fn keys_move_at_orbit_speed() {
        let (mut controls, mut cam, mut light) = fixture();
        let before = cam;
        let input = OrbitInput {
            zoom_out: true,
            orbit_right: true,
            tilt_up: true,
            ..Default::default()
        };
        controls.update(&mut cam, &mut light, &input, 0.5);
        assert!((cam.radius - (before.radius + 3.0)).abs() < 1e-5);
        assert!((cam.horizontal_angle - (before.horizontal_angle + 3.0)).abs() < 1e-5);
        assert!((cam.vertical_angle - 3.0).abs() < 1e-5);
    }

    #[test]
    fn mouse_motion_turns_against_the_pointer() {
        let (mut controls, mut cam, mut light) = fixture();
        let before = cam;
        let input = OrbitInput {
            mouse_delta: Vec2::new(100.0, -40.0),
            ..Default::default()
        };
        controls.update(&mut cam, &mut light, &input, 0.0);
        assert!((cam.horizontal_angle - (before.horizontal_angle - 0.5)).abs() < 1e-5);
        assert!((cam.vertical_angle - 0.2).abs() < 1e-5);
    }

    #[test]
    fn light_toggles_once_per_press() {
        let (mut controls, mut cam, mut light) = fixture();
        let held = OrbitInput {
            toggle_light: true,
            ..Default::default()
        };
        controls.update(&mut cam, &mut light, &held, 0.016);
        controls.update(&mut cam, &mut light, &held, 0.016);
        assert!(!light.enabled);

        controls.update(&mut cam, &mut light, &OrbitInput::default(), 0.016);
        controls.update(&mut cam, &mut light, &held, 0.016);
        assert!(light.enabled);
    }
}
