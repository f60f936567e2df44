//! Windowed runner for the star field.
//!
//! [`Galaxy`] is the builder: configure with `with_*` calls, then
//! [`run`](Galaxy::run) to open a window and animate until it closes.
//! The internal winit app owns everything for the window's lifetime; the
//! frame loop is redraw-driven (each frame requests the next) and gated
//! on a [`FrameLoop`] token, so teardown stops scheduling at the current
//! frame boundary.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::RunError;
use crate::field::StarField;
use crate::gpu::GpuState;
use crate::input::Pointer;
use crate::scheduler::FrameLoop;
use crate::star::Sprite;
use crate::time::Time;

/// A windowed star field builder.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// # Example
///
/// ```ignore
/// use galaxy::Galaxy;
///
/// Galaxy::new()
///     .with_density(1.5)
///     .with_saturation(0.8)
///     .with_hue_shift(220.0)
///     .run()?;
/// ```
pub struct Galaxy {
    config: FieldConfig,
    title: String,
    size: (u32, u32),
}

impl Galaxy {
    /// Create a runner with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            title: "Galaxy".to_string(),
            size: (1280, 720),
        }
    }

    /// Replace the whole configuration at once.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the particle count multiplier.
    pub fn with_density(mut self, density: f32) -> Self {
        self.config.density = density;
        self
    }

    /// Set the glow halo intensity. `0.0` disables the halo.
    pub fn with_glow_intensity(mut self, glow_intensity: f32) -> Self {
        self.config.glow_intensity = glow_intensity;
        self
    }

    /// Set color saturation. `0.0` yields a grayscale field.
    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.config.saturation = saturation;
        self
    }

    /// Set the base hue in degrees for colored fields.
    pub fn with_hue_shift(mut self, hue_shift: f32) -> Self {
        self.config.hue_shift = hue_shift;
        self
    }

    /// Set the twinkle amplitude. `0.0` disables twinkle.
    pub fn with_twinkle_intensity(mut self, twinkle_intensity: f32) -> Self {
        self.config.twinkle_intensity = twinkle_intensity;
        self
    }

    /// Set the per-frame rotation of the whole field.
    pub fn with_rotation_speed(mut self, rotation_speed: f32) -> Self {
        self.config.rotation_speed = rotation_speed;
        self
    }

    /// Set the pointer repulsion multiplier.
    pub fn with_repulsion_strength(mut self, repulsion_strength: f32) -> Self {
        self.config.repulsion_strength = repulsion_strength;
        self
    }

    /// Set the star depth-velocity multiplier.
    pub fn with_star_speed(mut self, star_speed: f32) -> Self {
        self.config.star_speed = star_speed;
        self
    }

    /// Set the global speed multiplier.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.config.speed = speed;
        self
    }

    /// Enable or disable pointer tracking entirely.
    pub fn with_mouse_interaction(mut self, enabled: bool) -> Self {
        self.config.mouse_interaction = enabled;
        self
    }

    /// Enable or disable pointer repulsion.
    pub fn with_mouse_repulsion(mut self, enabled: bool) -> Self {
        self.config.mouse_repulsion = enabled;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Open the window and animate until it closes.
    ///
    /// Blocks for the lifetime of the window. A machine without a usable
    /// GPU still opens the window and runs the simulation; rendering is
    /// silently disabled after one logged warning.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, self.title, self.size);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Galaxy {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: StarField,
    pointer: Pointer,
    time: Time,
    frame_loop: FrameLoop,
    sprites: Vec<Sprite>,
    title: String,
    size: (u32, u32),
    error: Option<RunError>,
}

impl App {
    fn new(config: FieldConfig, title: String, size: (u32, u32)) -> Self {
        Self {
            window: None,
            gpu: None,
            field: StarField::new(config),
            pointer: Pointer::new(),
            time: Time::new(),
            frame_loop: FrameLoop::new(),
            sprites: Vec::new(),
            title,
            size,
            error: None,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.frame_loop.cancel();
        event_loop.exit();
    }

    /// Whether another frame should be scheduled after this one.
    ///
    /// A field with no renderer is a disabled decoration: stepping it at
    /// full rate with nothing to present would just spin the CPU, so the
    /// loop parks instead.
    fn should_reschedule(&self) -> bool {
        self.gpu.is_some() && self.frame_loop.should_continue()
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_none() {
            return;
        }

        let (elapsed, _delta) = self.time.update();
        self.field.step(elapsed);
        self.field.sprites(&mut self.sprites);

        if let Some(gpu) = &mut self.gpu {
            match gpu.render(&self.sprites) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    gpu.resize(winit::dpi::PhysicalSize {
                        width: gpu.config.width,
                        height: gpu.config.height,
                    })
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    self.shutdown(event_loop);
                    return;
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        if self.time.frame() % 300 == 0 {
            log::debug!(
                "{} stars, {} drawn, {:.1} fps",
                self.field.len(),
                self.sprites.len(),
                self.time.fps()
            );
        }

        // Schedule the next frame only after finishing this one, and only
        // while the loop is alive.
        if self.should_reschedule() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(RunError::Window(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let inner = window.inner_size();
        self.field.resize(inner.width as f32, inner.height as f32);

        match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu) => self.gpu = Some(gpu),
            // Decorative layer: no GPU means no backdrop, nothing fatal.
            Err(e) => log::warn!("starfield rendering disabled: {}", e),
        }

        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.frame_loop.is_cancelled() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.shutdown(event_loop);
                }
            }
            WindowEvent::Resized(physical_size) => {
                self.field
                    .resize(physical_size.width as f32, physical_size.height as f32);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::CursorMoved { .. } => {
                if self.field.config().mouse_interaction && self.pointer.handle_event(&event) {
                    self.field.set_pointer(self.pointer.position());
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }
}
