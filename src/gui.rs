use egui::Context;
use egui_wgpu::Renderer;
use egui_winit::State;
use field_core::Theme;
use field_simulation::FieldParams;
use std::ops::RangeInclusive;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

pub struct UiState {
    pub visible: bool,
    pub fps: f32,
    pub frame_time: f32,
    pub particle_count: usize,
    pub frames: u64,
    pub loop_running: bool,
    pub scroll_y: f32,
    /// (revealed, tracked) page elements
    pub revealed: (usize, usize),
    pub field_params: FieldParams,
    /// Set when a control changed `field_params` this frame
    pub field_params_changed: bool,
    pub theme: Theme,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            visible: false,
            fps: 0.0,
            frame_time: 0.0,
            particle_count: 0,
            frames: 0,
            loop_running: true,
            scroll_y: 0.0,
            revealed: (0, 0),
            field_params: FieldParams::default(),
            field_params_changed: false,
            theme: Theme::default(),
        }
    }
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: false,
                ..Default::default()
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// `true` while the pointer is over a panel
    pub fn wants_pointer(&self) -> bool {
        self.context.wants_pointer_input()
    }

    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
    ) {
        let raw_input = self.state.take_egui_input(window);
        let egui::FullOutput {
            platform_output,
            textures_delta,
            shapes,
            pixels_per_point,
            ..
        } = self.context.run(raw_input, |ctx| Self::ui(ctx, ui_state));

        self.state.handle_platform_output(window, platform_output);
        let primitives = self.context.tessellate(shapes, pixels_per_point);

        let size = window.inner_size();
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point,
        };

        for (id, delta) in &textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &primitives, &screen);

        // Panels draw over the canvas pass, so load instead of clear
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Panel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        self.renderer.render(&mut pass, &primitives, &screen);
        drop(pass);

        for id in &textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn ui(ctx: &Context, state: &mut UiState) {
        egui::Window::new("Diagnostics")
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", state.fps));
                ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
                ui.separator();
                ui.label(format!("Particles: {}", state.particle_count));
                ui.label(format!("Frames drawn: {}", state.frames));
                let loop_state = if state.loop_running {
                    "running"
                } else {
                    "cancelled"
                };
                ui.label(format!("Loop: {loop_state}"));
                ui.label(format!("Scroll: {:.0} px", state.scroll_y));
                let (revealed, tracked) = state.revealed;
                ui.label(format!("Revealed: {revealed} / {tracked}"));
            });

        egui::Window::new("Field Controls")
            .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                let params = &mut state.field_params;
                let mut changed = false;

                ui.heading("Population");
                changed |= ui
                    .add(
                        egui::Slider::new(&mut params.area_per_particle, 2000.0..=30000.0)
                            .text("Area per Particle (px²)")
                            .logarithmic(true),
                    )
                    .changed();

                ui.separator();
                ui.heading("Pointer");
                changed |= slider(
                    ui,
                    &mut params.interaction_radius,
                    0.0..=400.0,
                    "Interaction Radius",
                );
                changed |= slider(ui, &mut params.return_rate, 0.0..=1.0, "Return Rate");

                ui.separator();
                ui.heading("Connections");
                changed |= slider(
                    ui,
                    &mut params.connect_area_divisor,
                    20.0..=400.0,
                    "Area Divisor",
                );
                changed |= slider(
                    ui,
                    &mut params.opacity_falloff,
                    1000.0..=60000.0,
                    "Opacity Falloff (px²)",
                );
                changed |= slider(ui, &mut params.line_width, 0.5..=4.0, "Line Width");
                changed |= ui
                    .checkbox(&mut params.connect_self_pairs, "Visit Self Pairs")
                    .changed();

                ui.separator();
                ui.heading("Rendering");
                changed |= slider(ui, &mut params.particle_alpha, 0.0..=1.0, "Particle Alpha");
                ui.horizontal(|ui| {
                    ui.label("Theme");
                    ui.radio_value(&mut state.theme, Theme::Dark, "Dark");
                    ui.radio_value(&mut state.theme, Theme::Light, "Light");
                });

                state.field_params_changed |= changed;
            });
    }
}

/// Labeled linear slider; `true` if the value was edited
fn slider(ui: &mut egui::Ui, value: &mut f32, range: RangeInclusive<f32>, label: &str) -> bool {
    let slider = egui::Slider::new(value, range).text(label);
    ui.add(slider).changed()
}
