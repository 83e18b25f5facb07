//! wgpu backend for `MeshCanvas` output

use crate::mesh::Mesh;
use crate::vertex::GpuVertex;
use bytemuck::{Pod, Zeroable};
use field_core::Color;
use glam::Vec2;

const INITIAL_VERTEX_CAPACITY: usize = 4096;
const INITIAL_INDEX_CAPACITY: usize = 8192;

/// Logical canvas size the vertex shader divides by
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ScreenUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

impl ScreenUniform {
    fn new(screen_size: Vec2) -> Self {
        Self {
            size: screen_size.max(Vec2::ONE).to_array(),
            _pad: [0.0; 2],
        }
    }
}

/// Capacity to reallocate to when `needed` elements no longer fit
fn grown_capacity(current: usize, needed: usize) -> Option<usize> {
    (needed > current).then(|| (needed * 2).next_power_of_two())
}

/// Per-frame upload target that reallocates when the mesh outgrows it
struct StreamBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    element_size: usize,
    capacity: usize,
    buffer: wgpu::Buffer,
}

impl StreamBuffer {
    fn new<T>(
        device: &wgpu::Device,
        label: &'static str,
        usage: wgpu::BufferUsages,
        capacity: usize,
    ) -> Self {
        let element_size = std::mem::size_of::<T>();
        Self {
            label,
            usage,
            element_size,
            capacity,
            buffer: Self::allocate(device, label, usage, element_size * capacity),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        usage: wgpu::BufferUsages,
        bytes: usize,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: bytes as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload<T: Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        if let Some(capacity) = grown_capacity(self.capacity, data.len()) {
            self.capacity = capacity;
            self.buffer =
                Self::allocate(device, self.label, self.usage, self.element_size * capacity);
            log::debug!("{} grown to {} elements", self.label, capacity);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
    }
}

fn clear_color(background: Color) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(background.r),
        g: f64::from(background.g),
        b: f64::from(background.b),
        a: f64::from(background.a),
    }
}

/// Draws a canvas mesh in a single alpha-blended pass
pub struct CanvasRenderer {
    pipeline: wgpu::RenderPipeline,
    vertices: StreamBuffer,
    indices: StreamBuffer,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    staging: Vec<GpuVertex>,
}

impl CanvasRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let screen_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Screen Uniform"),
            size: std::mem::size_of::<ScreenUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let screen_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Canvas Screen Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas Screen Bind Group"),
            layout: &screen_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        let pipeline = Self::create_pipeline(device, surface_format, &screen_layout);

        log::info!("✓ Canvas renderer initialized ({:?})", surface_format);

        Self {
            pipeline,
            vertices: StreamBuffer::new::<GpuVertex>(
                device,
                "Canvas Vertex Buffer",
                wgpu::BufferUsages::VERTEX,
                INITIAL_VERTEX_CAPACITY,
            ),
            indices: StreamBuffer::new::<u32>(
                device,
                "Canvas Index Buffer",
                wgpu::BufferUsages::INDEX,
                INITIAL_INDEX_CAPACITY,
            ),
            screen_buffer,
            screen_bind_group,
            staging: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        screen_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/canvas.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[screen_layout],
            push_constant_ranges: &[],
        });

        // Canvas primitives are unordered 2D triangles, so no culling or depth
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Canvas Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[GpuVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Clear `target` to `background` and draw `mesh` on top.
    ///
    /// `screen_size` is the logical size the mesh coordinates refer to.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        mesh: &Mesh,
        screen_size: Vec2,
        background: Color,
    ) {
        self.staging.clear();
        self.staging
            .extend(mesh.vertices.iter().map(GpuVertex::from));
        self.vertices.upload(device, queue, &self.staging);
        self.indices.upload(device, queue, &mesh.indices);

        queue.write_buffer(
            &self.screen_buffer,
            0,
            bytemuck::bytes_of(&ScreenUniform::new(screen_size)),
        );

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Canvas Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color(background)),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if mesh.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.screen_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.buffer.slice(..));
        pass.set_index_buffer(self.indices.buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.indices.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_grow_only_when_outgrown() {
        assert_eq!(grown_capacity(4096, 4096), None);
        assert_eq!(grown_capacity(4096, 10), None);
        assert_eq!(grown_capacity(4096, 5000), Some(16384));
    }

    #[test]
    fn test_screen_uniform_never_divides_by_zero() {
        let uniform = ScreenUniform::new(Vec2::new(0.0, 600.0));
        assert_eq!(uniform.size, [1.0, 600.0]);
        assert_eq!(std::mem::size_of::<ScreenUniform>(), 16);
    }
}
