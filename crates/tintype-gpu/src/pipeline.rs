//! The grading render pipeline and its fixed binding slots.

use std::num::NonZeroU64;

use tintype_core::ParameterSet;

use crate::buffers::{QuadGeometry, SourceTexture, TEXTURE_FORMAT};

/// Slot of the source texture in bind group 0.
pub const SOURCE_TEXTURE_BINDING: u32 = 0;
/// Slot of the source sampler in bind group 0.
pub const SOURCE_SAMPLER_BINDING: u32 = 1;
/// Slot of the [`GradeUniforms`] block in bind group 0.
pub const UNIFORMS_BINDING: u32 = 2;

/// GPU layout of a [`ParameterSet`] plus the frame time.
///
/// Vectors are padded to `vec4` for uniform alignment. Field order matches
/// `GradeUniforms` in `grade.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GradeUniforms {
    pub lift: [f32; 4],
    pub gamma: [f32; 4],
    pub gain: [f32; 4],
    pub shadow_tint: [f32; 4],
    pub highlight_tint: [f32; 4],
    pub exposure: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub temperature: f32,
    pub tint: f32,
    pub vignette: f32,
    pub grain: f32,
    pub time: f32,
    pub shadow_strength: f32,
    pub highlight_strength: f32,
    pub flash_strength: f32,
    pub flash_threshold: f32,
    pub background_crush: f32,
    pub _pad: [f32; 3],
}

fn pad(v: [f32; 3]) -> [f32; 4] {
    [v[0], v[1], v[2], 0.0]
}

impl GradeUniforms {
    pub fn from_params(params: &ParameterSet, time: f32) -> Self {
        Self {
            lift: pad(params.lift),
            gamma: pad(params.gamma),
            gain: pad(params.gain),
            shadow_tint: pad(params.shadow_tint),
            highlight_tint: pad(params.highlight_tint),
            exposure: params.exposure,
            contrast: params.contrast,
            saturation: params.saturation,
            temperature: params.temperature,
            tint: params.tint,
            vignette: params.vignette,
            grain: params.grain,
            time,
            shadow_strength: params.shadow_strength,
            highlight_strength: params.highlight_strength,
            flash_strength: params.flash_strength,
            flash_threshold: params.flash_threshold,
            background_crush: params.background_crush,
            _pad: [0.0; 3],
        }
    }
}

/// Compiled `grade.wgsl` program, its layout, sampler, and uniform buffer.
///
/// Binding slots are fixed at construction; each frame only rewrites the
/// uniform buffer contents.
pub struct GradePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
}

impl GradePipeline {
    /// Create the grading pipeline. Compiles `grade.wgsl`.
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tintype_grade_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/grade.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tintype_grade_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: SOURCE_TEXTURE_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: SOURCE_SAMPLER_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: UNIFORMS_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<GradeUniforms>() as u64
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tintype_grade_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_layouts = QuadGeometry::layouts();
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tintype_grade_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &vertex_layouts,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: TEXTURE_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tintype_source_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tintype_grade_uniforms"),
            size: std::mem::size_of::<GradeUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            uniform_buffer,
        }
    }

    /// Bind a source texture to the fixed slots. Called once per image load.
    pub fn bind_source(&self, device: &wgpu::Device, source: &SourceTexture) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tintype_grade_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: SOURCE_TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(&source.view),
                },
                wgpu::BindGroupEntry {
                    binding: SOURCE_SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: UNIFORMS_BINDING,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Write this frame's parameters into the uniform slot.
    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &GradeUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Record the full-screen pass onto `encoder`.
    ///
    /// The caller is responsible for submitting the encoder.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        bind_group: &wgpu::BindGroup,
        quad: &QuadGeometry,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tintype_grade_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.set_vertex_buffer(0, quad.positions.slice(..));
        pass.set_vertex_buffer(1, quad.uvs.slice(..));
        pass.draw(0..QuadGeometry::VERTEX_COUNT, 0..1);
    }

    pub fn destroy(&self) {
        self.uniform_buffer.destroy();
    }
}
