// Batched quad rendering

use super::{Camera, CameraUniform, TextureHandle, TextureManager, Vertex};
use anyhow::Result;
use glam::{Vec2, Vec4};
use wgpu::util::DeviceExt;

/// Quads the buffers are sized for before the first growth
const INITIAL_QUAD_CAPACITY: usize = 256;

/// Consecutive quads sharing one texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRun {
    pub texture: TextureHandle,
    pub index_start: u32,
    pub index_count: u32,
}

/// CPU side of a frame: quads in submission order, grouped into runs.
///
/// Order is preserved across texture changes so later quads always paint
/// over earlier ones.
#[derive(Debug, Default)]
pub struct SpriteBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    runs: Vec<DrawRun>,
}

impl SpriteBatch {
    pub fn push_quad(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        color: Vec4,
        flip_horizontal: bool,
    ) {
        let base = self.vertices.len() as u32;
        self.vertices
            .extend_from_slice(&Vertex::quad(position, size, color, flip_horizontal));

        let index_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&Vertex::quad_indices(base));

        match self.runs.last_mut() {
            Some(run) if run.texture == texture => run.index_count += 6,
            _ => self.runs.push(DrawRun {
                texture,
                index_start,
                index_count: 6,
            }),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.runs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn runs(&self) -> &[DrawRun] {
        &self.runs
    }
}

/// Draws a [`SpriteBatch`] with one pipeline and one bind group per run
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    quad_capacity: usize,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    batch: SpriteBatch,
}

impl SpriteRenderer {
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y flip reverses winding, quads are never back-facing anyway
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let (vertex_buffer, index_buffer) = Self::create_buffers(device, INITIAL_QUAD_CAPACITY);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            quad_capacity: INITIAL_QUAD_CAPACITY,
            camera_buffer,
            camera_bind_group,
            texture_layout,
            batch: SpriteBatch::default(),
        })
    }

    fn create_buffers(device: &wgpu::Device, quads: usize) -> (wgpu::Buffer, wgpu::Buffer) {
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: (quads * 4 * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Index Buffer"),
            size: (quads * 6 * std::mem::size_of::<u32>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        (vertex_buffer, index_buffer)
    }

    /// Queue a textured quad for this frame
    pub fn push_quad(
        &mut self,
        texture: TextureHandle,
        position: Vec2,
        size: Vec2,
        color: Vec4,
        flip_horizontal: bool,
    ) {
        self.batch
            .push_quad(texture, position, size, color, flip_horizontal);
    }

    /// Upload the camera and the queued quads, growing buffers as needed
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, camera: &Camera) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(camera)]),
        );

        if self.batch.is_empty() {
            return;
        }

        let needed = self.batch.quad_count();
        if needed > self.quad_capacity {
            let capacity = needed.next_power_of_two();
            let (vertex_buffer, index_buffer) = Self::create_buffers(device, capacity);
            self.vertex_buffer = vertex_buffer;
            self.index_buffer = index_buffer;
            self.quad_capacity = capacity;
            log::debug!("Sprite buffers grown to {} quads", capacity);
        }

        queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&self.batch.vertices),
        );
        queue.write_buffer(
            &self.index_buffer,
            0,
            bytemuck::cast_slice(&self.batch.indices),
        );
    }

    /// Draw the prepared batch
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        texture_manager: &'a TextureManager,
    ) {
        if self.batch.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for run in self.batch.runs() {
            let Some(texture) = texture_manager.get(run.texture) else {
                continue;
            };
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.draw_indexed(run.index_start..run.index_start + run.index_count, 0, 0..1);
        }
    }

    /// Drop the queued quads once the frame is submitted
    pub fn clear(&mut self) {
        self.batch.clear();
    }

    pub fn quad_count(&self) -> usize {
        self.batch.quad_count()
    }

    /// Layout every texture bind group must be created with
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }
}
