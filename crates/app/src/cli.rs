//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use platform::AppConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum GpuBackend {
    #[default]
    Auto,
    #[value(alias = "vk")]
    Vulkan,
    #[value(alias = "d3d12")]
    Dx12,
    #[value(alias = "mtl")]
    Metal,
    #[value(alias = "opengl", alias = "gles")]
    Gl,
}

impl GpuBackend {
    pub fn backends(self) -> wgpu::Backends {
        match self {
            GpuBackend::Auto => wgpu::Backends::all(),
            GpuBackend::Vulkan => wgpu::Backends::VULKAN,
            GpuBackend::Dx12 => wgpu::Backends::DX12,
            GpuBackend::Metal => wgpu::Backends::METAL,
            GpuBackend::Gl => wgpu::Backends::GL,
        }
    }
}

/// Window size given as `WIDTHxHEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

fn parse_size(value: &str) -> Result<WindowSize, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad width '{w}': {e}"))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok(WindowSize { width, height })
}

/// Orbit-camera viewer for a 3D chess set.
#[derive(Debug, Parser)]
#[command(name = "chessview", version, about)]
pub struct Cli {
    /// Graphics backend to request.
    #[arg(long, value_enum, default_value_t = GpuBackend::Auto)]
    pub gpu_backend: GpuBackend,

    /// Log average frame time once per second.
    #[arg(long)]
    pub show_fps: bool,

    /// Window size, e.g. 1280x720.
    #[arg(long, value_parser = parse_size)]
    pub size: Option<WindowSize>,

    /// Window width; overrides --size.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height; overrides --size.
    #[arg(long)]
    pub height: Option<u32>,

    /// Directory containing Chess/ and Stone_Chess_Board/.
    #[arg(long, env = "CHESSVIEW_ASSETS", default_value = ".")]
    pub assets: PathBuf,

    /// Leave the cursor free (disables mouse orbit).
    #[arg(long)]
    pub no_grab: bool,

    /// Point light intensity.
    #[arg(long)]
    pub light_power: Option<f32>,

    /// Starting camera distance from the board centre.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Vertical field of view in degrees.
    #[arg(long)]
    pub fov: Option<f32>,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        let defaults = AppConfig::default();
        let width = self
            .width
            .or(self.size.map(|s| s.width))
            .unwrap_or(defaults.width)
            .max(1);
        let height = self
            .height
            .or(self.size.map(|s| s.height))
            .unwrap_or(defaults.height)
            .max(1);
        AppConfig {
            width,
            height,
            backends: self.gpu_backend.backends(),
            show_fps: self.show_fps,
            asset_root: self.assets,
            grab_cursor: !self.no_grab,
            light_power: self.light_power.unwrap_or(defaults.light_power),
            camera_radius: self.radius.unwrap_or(defaults.camera_radius),
            fov_y_deg: self.fov.unwrap_or(defaults.fov_y_deg),
        }
    }
}
