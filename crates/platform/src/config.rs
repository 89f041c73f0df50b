use std::path::PathBuf;

use corelib::{CoreResult, camera::OrbitCamera, light::PointLight};
use renderer::Backends;

pub const WINDOW_TITLE: &str = "ChessApplication";

/// Runtime settings for the viewer, filled in by the binary's CLI.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub backends: Backends,
    /// Log average frame time once per second.
    pub show_fps: bool,
    /// Directory holding `Chess/` and `Stone_Chess_Board/`.
    pub asset_root: PathBuf,
    /// Hide and lock the cursor so mouse motion orbits the camera.
    pub grab_cursor: bool,
    pub light_power: f32,
    /// Initial distance of the camera from the board centre.
    pub camera_radius: f32,
    pub fov_y_deg: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            backends: Backends::all(),
            show_fps: false,
            asset_root: PathBuf::from("."),
            grab_cursor: true,
            light_power: PointLight::DEFAULT_POWER,
            camera_radius: 5.0,
            fov_y_deg: 45.0,
        }
    }
}

impl AppConfig {
    /// Starting orbit camera; rejects a non-positive radius or an out-of-range fov.
    pub fn orbit_camera(&self) -> CoreResult<OrbitCamera> {
        let defaults = OrbitCamera::default();
        OrbitCamera::new(
            self.camera_radius,
            self.fov_y_deg,
            defaults.z_near,
            defaults.z_far,
        )
    }
}
