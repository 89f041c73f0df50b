//! Platform layer: windowing, event loop and per-frame orchestration.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use asset::scene::{ChessAssets, LoadedScene};
use corelib::{camera::OrbitCamera, controls::OrbitControls, ecs::World, light::PointLight};
use renderer::GpuState;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowId},
};

pub mod config;
pub mod input;
pub mod scene;
pub mod stats;

pub use config::AppConfig;
use input::{InputState, KeyOutcome};
use stats::FrameStats;

/// Load the chess scene, open a window and render until it is closed.
pub fn run_with_renderer(config: AppConfig) -> Result<()> {
    let orbit = config.orbit_camera().context("Invalid camera settings")?;
    let assets = ChessAssets::standard(&config.asset_root);
    let scene = assets.load().with_context(|| {
        format!(
            "Failed to load chess assets from {}",
            config.asset_root.display()
        )
    })?;

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ChessApp::new(config, orbit, scene);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct ChessApp {
    config: AppConfig,
    /// CPU-side assets, dropped once uploaded.
    pending: Option<LoadedScene>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    world: World,
    orbit: OrbitCamera,
    controls: OrbitControls,
    light: PointLight,
    input: InputState,
    stats: FrameStats,
    last_frame: Instant,
    cursor_grabbed: bool,
    failure: Option<anyhow::Error>,
}

impl ChessApp {
    fn new(config: AppConfig, orbit: OrbitCamera, scene: LoadedScene) -> Self {
        let now = Instant::now();
        let light = PointLight::default().with_power(config.light_power);
        Self {
            config,
            pending: Some(scene),
            window: None,
            gpu: None,
            world: World::new(),
            orbit,
            controls: OrbitControls::new(),
            light,
            input: InputState::default(),
            stats: FrameStats::new(now),
            last_frame: now,
            cursor_grabbed: false,
            failure: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(config::WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("Failed to create window")?,
        );
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let mut gpu = pollster::block_on(GpuState::new(window.clone(), self.config.backends))?;
        if let Some(scene) = self.pending.take() {
            self.world = scene::build_world(&scene, &mut gpu)?;
        }

        if self.config.grab_cursor {
            self.cursor_grabbed = grab_cursor(&window);
        }

        self.gpu = Some(gpu);
        self.window = Some(window);
        self.last_frame = Instant::now();
        self.stats = FrameStats::new(self.last_frame);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let frame_input = self.input.take_frame();
        self.controls
            .update(&mut self.orbit, &mut self.light, &frame_input, dt);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let camera = self.orbit.camera(gpu.aspect());
        match gpu.render(&camera, &self.light, &self.world) {
            Ok(()) => {}
            Err(e) if GpuState::is_surface_lost(&e) => {
                log::warn!("Surface lost/outdated; reconfiguring");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU out of memory"));
                return;
            }
            Err(e) => log::warn!("Dropped frame: {e:?}"),
        }

        if let Some(ms) = self.stats.tick(now) {
            if self.config.show_fps {
                log::info!("{:.3} ms/frame", ms);
            }
        }
    }
}

/// Hide the cursor and lock it to the window. Returns whether it worked.
fn grab_cursor(window: &Window) -> bool {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    match grabbed {
        Ok(()) => {
            window.set_cursor_visible(false);
            true
        }
        Err(e) => {
            log::warn!("Cursor grab unavailable ({e}); mouse orbit disabled");
            false
        }
    }
}

impl ApplicationHandler for ChessApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::Focused(false) => self.input.clear(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if self.input.on_key(code, state == ElementState::Pressed) == KeyOutcome::Exit {
                    log::info!("Escape pressed. Exiting event loop.");
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.cursor_grabbed {
                self.input.add_mouse_delta(dx, dy);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
