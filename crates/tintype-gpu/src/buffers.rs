//! GPU buffer and texture management for the grading pass.

use tintype_core::SourceImage;
use wgpu::util::DeviceExt;

/// Texel format of both the source texture and the drawing surface.
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Clip-space corners of the full-screen quad, triangle-strip order.
const QUAD_POSITIONS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
/// Texture coordinates matching [`QUAD_POSITIONS`]. `v = 0` is the top row.
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]];

/// Width/height of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Same dimensions as `image`.
    pub fn of(image: &SourceImage) -> Self {
        Self::new(image.width, image.height)
    }

    fn extent(self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

/// Full-screen quad: one position buffer and one UV buffer.
pub struct QuadGeometry {
    pub positions: wgpu::Buffer,
    pub uvs: wgpu::Buffer,
}

impl QuadGeometry {
    pub const VERTEX_COUNT: u32 = 4;

    pub fn new(device: &wgpu::Device) -> Self {
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tintype_quad_positions"),
            contents: bytemuck::cast_slice(&QUAD_POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uvs = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tintype_quad_uvs"),
            contents: bytemuck::cast_slice(&QUAD_UVS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self { positions, uvs }
    }

    /// Vertex layouts for slot 0 (positions) and slot 1 (UVs).
    pub fn layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
        const POSITION_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
        const UV_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];
        [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION_ATTR,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &UV_ATTR,
            },
        ]
    }

    pub fn destroy(&self) {
        self.positions.destroy();
        self.uvs.destroy();
    }
}

/// The single resident source texture.
pub struct SourceTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl SourceTexture {
    /// Upload a [`SourceImage`] into a new sampled texture.
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &SourceImage) -> Self {
        let size = SurfaceSize::of(image);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tintype_source_texture"),
            size: size.extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
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
            image.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width * 4),
                rows_per_image: Some(image.height),
            },
            size.extent(),
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width: image.width,
            height: image.height,
        }
    }
}

/// Offscreen render target the grading pass draws into.
pub struct RenderSurface {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub size: SurfaceSize,
}

impl RenderSurface {
    pub fn new(device: &wgpu::Device, size: SurfaceSize) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tintype_render_surface"),
            size: size.extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size,
        }
    }

    /// Row pitch of a readback buffer, padded to the copy alignment.
    pub fn padded_bytes_per_row(&self) -> u32 {
        (self.size.width * 4).next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
    }

    /// Bytes needed to read the whole surface back.
    pub fn readback_size(&self) -> u64 {
        self.padded_bytes_per_row() as u64 * self.size.height as u64
    }

    pub fn extent(&self) -> wgpu::Extent3d {
        self.size.extent()
    }
}
