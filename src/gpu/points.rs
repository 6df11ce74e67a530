//! Alpha-masked point sprites for the galaxy.

use wgpu::util::DeviceExt;

use super::DEPTH_FORMAT;
use crate::galaxy::ParticleBuffer;
use crate::shader::{PointUniforms, POINTS_SOURCE};
use crate::textures::AlphaMask;
use crate::visuals::PointStyle;

/// Bytes per particle in each vertex buffer (three `f32`).
const VERTEX_STRIDE: wgpu::BufferAddress = 12;

/// GPU copies of a [`ParticleBuffer`].
pub struct GpuParticles {
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    count: u32,
}

impl GpuParticles {
    pub fn upload(device: &wgpu::Device, particles: &ParticleBuffer) -> Self {
        Self {
            positions: create_vertex_buffer(
                device,
                "Particle Positions",
                particles.positions(),
                wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            ),
            colors: create_vertex_buffer(
                device,
                "Particle Colors",
                particles.colors(),
                wgpu::BufferUsages::VERTEX,
            ),
            count: particles.len() as u32,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    fn destroy(self) {
        self.positions.destroy();
        self.colors.destroy();
    }
}

/// Zero-sized vertex buffers are avoided; an empty galaxy gets one unused
/// vertex and a draw count of zero.
fn create_vertex_buffer(
    device: &wgpu::Device,
    label: &str,
    data: &[f32],
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    let placeholder = [0.0f32; 3];
    let contents = if data.is_empty() { &placeholder[..] } else { data };
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(contents),
        usage,
    })
}

/// Pipeline, mask texture and particle buffers for drawing the galaxy.
pub struct PointsRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    particles: GpuParticles,
    style: PointStyle,
}

impl PointsRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        mask: &AlphaMask,
        style: PointStyle,
        particles: &mut ParticleBuffer,
    ) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Point Uniforms"),
            size: std::mem::size_of::<PointUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mask_view = create_mask_texture(device, queue, mask);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Mask Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Point Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Point Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&mask_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Shader"),
            source: wgpu::ShaderSource::Wgsl(POINTS_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Point Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: VERTEX_STRIDE,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: VERTEX_STRIDE,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![1 => Float32x3],
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(style.blend.blend_state()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: style.depth_write,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let gpu_particles = GpuParticles::upload(device, particles);
        particles.mark_clean();

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            particles: gpu_particles,
            style,
        }
    }

    pub fn style(&self) -> PointStyle {
        self.style
    }

    pub fn particle_count(&self) -> u32 {
        self.particles.count()
    }

    /// Swap in buffers for a freshly generated galaxy.
    ///
    /// The new buffers are created before the old ones are destroyed.
    pub fn replace(&mut self, device: &wgpu::Device, particles: &mut ParticleBuffer) {
        let fresh = GpuParticles::upload(device, particles);
        let old = std::mem::replace(&mut self.particles, fresh);
        log::debug!(
            "Replaced particle buffers: {} -> {} particles",
            old.count(),
            self.particles.count()
        );
        old.destroy();
        particles.mark_clean();
    }

    /// Upload positions if they changed since the last upload.
    pub fn sync(&self, queue: &wgpu::Queue, particles: &mut ParticleBuffer) {
        if !particles.is_dirty() {
            return;
        }
        if particles.len() as u32 == self.particles.count() && !particles.is_empty() {
            queue.write_buffer(
                &self.particles.positions,
                0,
                bytemuck::cast_slice(particles.positions()),
            );
        }
        particles.mark_clean();
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &PointUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.particles.count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.particles.positions.slice(..));
        pass.set_vertex_buffer(1, self.particles.colors.slice(..));
        pass.draw(0..6, 0..self.particles.count);
    }
}

fn create_mask_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    mask: &AlphaMask,
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: mask.width,
        height: mask.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Particle Mask"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &mask.data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * mask.width),
            rows_per_image: Some(mask.height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
