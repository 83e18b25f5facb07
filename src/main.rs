//! Ambient Particle Field
//!
//! A pointer-reactive particle background with proximity lines, drawn behind a demo page
//! whose cards tilt under the pointer and fade in as they scroll into view.

mod gui;
mod page;

use field_core::{Canvas, Theme};
use field_renderer::{CanvasRenderer, MeshCanvas, RendererError};
use field_simulation::{AnimationLoop, FieldParams, FrameScheduler, LoopState, ParticleField};
use glam::Vec2;
use gui::{Gui, UiState};
use page::Page;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use wgpu::SurfaceError;
use winit::{
    application::ApplicationHandler,
    error::EventLoopError,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const WINDOW_TITLE: &str = "Ambient Field";
const INITIAL_WIDTH: u32 = 1280;
const INITIAL_HEIGHT: u32 = 800;

/// Pixels scrolled per wheel line
const SCROLL_LINE_HEIGHT: f32 = 48.0;

/// Longest step fed to page transitions, so a long idle gap doesn't skip them
const MAX_TICK: f32 = 0.1;

/// Delivers animation frames as window redraws
struct WindowScheduler<'a>(&'a Window);

impl FrameScheduler for WindowScheduler<'_> {
    fn request_frame(&self) {
        self.0.request_redraw();
    }
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scale_factor: f64,

    canvas: MeshCanvas,
    renderer: CanvasRenderer,
    field: ParticleField,
    animation: AnimationLoop,
    page: Page,

    gui: Gui,
    ui_state: UiState,

    last_frame_time: Instant,
    frame_times: VecDeque<f32>,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let logical = size.to_logical::<f32>(scale_factor);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RendererError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let canvas = MeshCanvas::new(logical.width, logical.height);
        let renderer = CanvasRenderer::new(&device, config.format);
        log::info!("✓ Renderer initialized");

        let field = ParticleField::new(logical.width, logical.height, FieldParams::default());
        let page = Page::new(logical.width, logical.height);
        let animation = AnimationLoop::start(&WindowScheduler(window.as_ref()));
        log::info!("✓ Animation loop started");

        let gui = Gui::new(&device, config.format, &window);
        let ui_state = UiState {
            field_params: *field.params(),
            theme: field.theme(),
            ..Default::default()
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scale_factor,
            canvas,
            renderer,
            field,
            animation,
            page,
            gui,
            ui_state,
            last_frame_time: Instant::now(),
            frame_times: VecDeque::with_capacity(100),
        })
    }

    fn logical_size(&self) -> Vec2 {
        let logical = winit::dpi::PhysicalSize::new(self.config.width, self.config.height)
            .to_logical::<f32>(self.scale_factor);
        Vec2::new(logical.width, logical.height)
    }

    /// Reapply the current surface configuration after the surface went stale
    fn reconfigure_surface(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.reconfigure_surface();

        // Only a changed viewport respawns the field and relayouts the page
        let size = self.logical_size();
        if self.field.resize(size.x, size.y) {
            self.canvas.resize(size.x, size.y);
            self.page.resize(size.x, size.y);
        }
    }

    /// Physical window position to canvas coordinates
    fn to_canvas(&self, position: winit::dpi::PhysicalPosition<f64>) -> Vec2 {
        let logical = position.to_logical::<f32>(self.scale_factor);
        Vec2::new(logical.x, logical.y)
    }

    fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.field.set_pointer(pointer);
        self.page.pointer_moved(pointer);
    }

    fn scroll(&mut self, delta: MouseScrollDelta) {
        let pixels = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * SCROLL_LINE_HEIGHT,
            MouseScrollDelta::PixelDelta(pos) => -(pos.y / self.scale_factor) as f32,
        };
        let revealed = self.page.scroll_by(pixels);
        if revealed > 0 {
            log::debug!("Scrolled {:.0}px, {} elements revealed", pixels, revealed);
        }
    }

    fn toggle_theme(&mut self) {
        self.ui_state.theme = self.ui_state.theme.toggled();
        log::debug!("Theme switched to {:?}", self.ui_state.theme);
    }

    /// Cancel the running loop, or start a fresh one if it was cancelled
    fn toggle_animation(&mut self, window: &Window) {
        if self.animation.is_running() {
            self.animation.cancel_handle().cancel();
            log::debug!(
                "Animation loop cancelled after {} frames",
                self.animation.frames()
            );
        } else {
            self.animation = AnimationLoop::start(&WindowScheduler(window));
            log::debug!("Animation loop restarted");
        }
    }

    /// Push panel edits into the simulation
    fn apply_ui_changes(&mut self) {
        if self.ui_state.field_params_changed {
            self.field.set_params(self.ui_state.field_params);
            self.ui_state.field_params_changed = false;
        }
        if self.ui_state.theme != self.field.theme() {
            self.field.set_theme(self.ui_state.theme);
        }
    }

    fn render(&mut self, window: &Window) -> Result<(f32, f32), SurfaceError> {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = 1000.0 / avg_frame_time;

        self.apply_ui_changes();
        self.page.tick((frame_time * 0.001).min(MAX_TICK));

        let theme: Theme = self.field.theme();
        self.canvas.set_background(theme.background());

        let scheduler = WindowScheduler(window);
        let state = self
            .animation
            .on_frame(&mut self.field, &mut self.canvas, &scheduler);
        if state == LoopState::Cancelled {
            // Frozen: keep showing the last particle positions
            self.field.draw(&mut self.canvas);
        }
        self.page.draw(&mut self.canvas, theme);

        if state == LoopState::Cancelled && self.page.is_animating() {
            window.request_redraw();
        }

        self.ui_state.fps = fps;
        self.ui_state.frame_time = avg_frame_time;
        self.ui_state.particle_count = self.field.particles().len();
        self.ui_state.frames = self.animation.frames();
        self.ui_state.loop_running = state == LoopState::Running;
        self.ui_state.scroll_y = self.page.viewport().scroll_y;
        self.ui_state.revealed = self.page.reveal_progress();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            self.canvas.mesh(),
            self.canvas.size(),
            theme.background(),
        );

        if self.ui_state.visible {
            self.gui.render(
                &self.device,
                &self.queue,
                &mut encoder,
                window,
                &view,
                &mut self.ui_state,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok((fps, avg_frame_time))
    }
}

#[derive(Default)]
struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu_state) => {
                self.gpu_state = Some(gpu_state);
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) else {
            return;
        };

        if gpu_state.ui_state.visible && gpu_state.gui.handle_event(window, &event) {
            window.request_redraw();
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key_code {
                KeyCode::KeyT => gpu_state.toggle_theme(),
                KeyCode::Space => gpu_state.toggle_animation(window),
                KeyCode::KeyH => {
                    gpu_state.ui_state.visible = !gpu_state.ui_state.visible;
                    log::debug!("Panels visible: {}", gpu_state.ui_state.visible);
                }
                _ => {}
            },

            WindowEvent::Resized(physical_size) => gpu_state.resize(physical_size),

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                gpu_state.scale_factor = scale_factor;
                gpu_state.resize(window.inner_size());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let pointer = gpu_state.to_canvas(position);
                if gpu_state.ui_state.visible && gpu_state.gui.wants_pointer() {
                    gpu_state.set_pointer(None);
                } else {
                    gpu_state.set_pointer(Some(pointer));
                }
            }

            WindowEvent::CursorLeft { .. } => gpu_state.set_pointer(None),

            WindowEvent::MouseWheel { delta, .. } => gpu_state.scroll(delta),

            // Frames schedule themselves; never chain another redraw from here
            WindowEvent::RedrawRequested => {
                match gpu_state.render(window) {
                    Ok((fps, frame_time)) => {
                        window.set_title(&format!(
                            "{} - {:.0} FPS ({:.2}ms) - {} particles",
                            WINDOW_TITLE,
                            fps,
                            frame_time,
                            gpu_state.field.particles().len()
                        ));
                    }
                    Err(e @ (SurfaceError::Lost | SurfaceError::Outdated)) => {
                        log::warn!("Surface {:?}, reconfiguring", e);
                        gpu_state.reconfigure_surface();
                        window.request_redraw();
                    }
                    Err(SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory, exiting");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
                return;
            }

            _ => return,
        }

        // A cancelled loop no longer schedules frames; redraw once for the change
        if !gpu_state.animation.is_running() {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), EventLoopError> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting ambient particle field...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::default();
    event_loop.run_app(&mut app)
}
