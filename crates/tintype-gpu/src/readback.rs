//! GPU-to-CPU readback of the drawing surface.

use std::sync::mpsc;

use tintype_core::SourceImage;

use crate::buffers::RenderSurface;
use crate::context::GpuContext;
use crate::error::EngineError;

/// Copies the render surface into a cached staging buffer and unpads it.
#[derive(Default)]
pub struct SurfaceReadback {
    staging: Option<wgpu::Buffer>,
}

impl SurfaceReadback {
    pub fn new() -> Self {
        Self::default()
    }

    fn staging(&mut self, device: &wgpu::Device, size: u64) -> &wgpu::Buffer {
        let needs_new = match self.staging.as_ref() {
            Some(buf) => buf.size() < size,
            None => true,
        };
        if needs_new {
            if let Some(old) = self.staging.take() {
                old.destroy();
            }
            tracing::debug!(size, "allocating readback staging buffer");
        }
        self.staging.get_or_insert_with(|| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tintype_surface_staging"),
                size,
                usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
                mapped_at_creation: false,
            })
        })
    }

    /// Download the surface as tightly packed RGBA8. Blocks until complete.
    pub fn download(
        &mut self,
        ctx: &GpuContext,
        surface: &RenderSurface,
    ) -> Result<SourceImage, EngineError> {
        let padded_row = surface.padded_bytes_per_row();
        let size = surface.readback_size();
        let staging = self.staging(&ctx.device, size);

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tintype_readback_encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &surface.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(surface.size.height),
                },
            },
            surface.extent(),
        );
        ctx.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..size);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        ctx.wait_idle()?;
        rx.recv()
            .map_err(|_| EngineError::Readback("map callback never fired".into()))?
            .map_err(|e| EngineError::Readback(e.to_string()))?;

        let width = surface.size.width;
        let height = surface.size.height;
        let row_bytes = width as usize * 4;
        let mut bytes = Vec::with_capacity(row_bytes * height as usize);
        {
            let data = slice.get_mapped_range();
            for row in data.chunks_exact(padded_row as usize) {
                bytes.extend_from_slice(&row[..row_bytes]);
            }
        }
        staging.unmap();

        SourceImage::from_rgba8(width, height, &bytes)
            .map_err(|e| EngineError::Readback(e.to_string()))
    }

    pub fn destroy(&mut self) {
        if let Some(buf) = self.staging.take() {
            buf.destroy();
        }
    }
}
