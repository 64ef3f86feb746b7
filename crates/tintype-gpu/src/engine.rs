//! The render engine: owns the grading program, quad, source texture, and
//! drawing surface, and runs one full-screen pass per `render` call.

use tintype_core::{ParameterSet, SourceImage};

use crate::buffers::{QuadGeometry, RenderSurface, SourceTexture, SurfaceSize};
use crate::context::{GpuConfig, GpuContext};
use crate::error::EngineError;
use crate::export::encode_png;
use crate::pipeline::{GradePipeline, GradeUniforms};
use crate::readback::SurfaceReadback;

/// Lifecycle of a [`RenderEngine`].
///
/// A failed [`RenderEngine::initialize`] never yields an engine, so there is
/// no observable uninitialized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Ready,
    Disposed,
}

/// The resident source image and the bind group that samples it.
struct LoadedSource {
    texture: SourceTexture,
    bind_group: wgpu::BindGroup,
}

/// Everything `dispose` releases.
struct Resources {
    pipeline: GradePipeline,
    quad: QuadGeometry,
    surface: RenderSurface,
    source: Option<LoadedSource>,
    readback: SurfaceReadback,
}

impl Resources {
    fn destroy(mut self) {
        if let Some(source) = self.source.take() {
            source.texture.texture.destroy();
        }
        self.surface.texture.destroy();
        self.quad.destroy();
        self.pipeline.destroy();
        self.readback.destroy();
    }
}

/// Headless grading renderer.
///
/// Every call is synchronous: `render` returns after the GPU has finished the
/// pass. Callers sharing an engine across threads must serialize access.
pub struct RenderEngine {
    ctx: GpuContext,
    resources: Option<Resources>,
    size: SurfaceSize,
    has_frame: bool,
}

impl RenderEngine {
    /// Acquire a device and build the grading program for a surface of `size`.
    pub fn initialize(size: SurfaceSize, config: &GpuConfig) -> Result<Self, EngineError> {
        let ctx = GpuContext::new(config)?;
        Self::with_context(ctx, size)
    }

    /// Build the grading program on an existing device.
    pub fn with_context(ctx: GpuContext, size: SurfaceSize) -> Result<Self, EngineError> {
        check_surface(&ctx, size)?;

        ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = GradePipeline::new(&ctx.device);
        let quad = QuadGeometry::new(&ctx.device);
        let surface = RenderSurface::new(&ctx.device, size);
        if let Some(err) = pollster::block_on(ctx.device.pop_error_scope()) {
            surface.texture.destroy();
            quad.destroy();
            pipeline.destroy();
            return Err(EngineError::Initialization(format!(
                "grading program failed to build: {err}"
            )));
        }

        tracing::info!(
            width = size.width,
            height = size.height,
            "render engine ready"
        );
        Ok(Self {
            ctx,
            resources: Some(Resources {
                pipeline,
                quad,
                surface,
                source: None,
                readback: SurfaceReadback::new(),
            }),
            size,
            has_frame: false,
        })
    }

    pub fn state(&self) -> EngineState {
        if self.resources.is_some() {
            EngineState::Ready
        } else {
            EngineState::Disposed
        }
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    /// Adapter description, when the engine acquired its own device.
    pub fn adapter_info(&self) -> Option<&wgpu::AdapterInfo> {
        self.ctx.adapter_info.as_ref()
    }

    /// Whether a source image is resident.
    pub fn has_image(&self) -> bool {
        self.resources
            .as_ref()
            .is_some_and(|r| r.source.is_some())
    }

    fn resources(&mut self) -> Result<&mut Resources, EngineError> {
        self.resources.as_mut().ok_or(EngineError::Disposed)
    }

    /// Replace the resident source texture with `image`.
    ///
    /// Rejected input leaves the previous image bound. No resizing happens
    /// here; see [`SourceImage::to_working_resolution`].
    pub fn load_image(&mut self, image: &SourceImage) -> Result<(), EngineError> {
        let max = self.ctx.device.limits().max_texture_dimension_2d;
        let ctx = &self.ctx;
        let resources = self.resources.as_mut().ok_or(EngineError::Disposed)?;

        if let Err(err) = image.validate() {
            tracing::warn!(%err, "rejected source image");
            return Err(err.into());
        }
        if image.width > max || image.height > max {
            tracing::warn!(
                width = image.width,
                height = image.height,
                max,
                "source image exceeds texture limit"
            );
            return Err(EngineError::ImageTooLarge {
                width: image.width,
                height: image.height,
                max,
            });
        }

        let texture = SourceTexture::upload(&ctx.device, &ctx.queue, image);
        let bind_group = resources.pipeline.bind_source(&ctx.device, &texture);
        if let Some(old) = resources.source.replace(LoadedSource {
            texture,
            bind_group,
        }) {
            old.texture.texture.destroy();
        }

        tracing::info!(
            width = image.width,
            height = image.height,
            "source image loaded"
        );
        Ok(())
    }

    /// Grade the resident image into the surface.
    ///
    /// `time_ms` only feeds the grain pattern. Identical inputs produce
    /// identical surface contents.
    pub fn render(&mut self, params: &ParameterSet, time_ms: f32) -> Result<(), EngineError> {
        let ctx = &self.ctx;
        let resources = self.resources.as_mut().ok_or(EngineError::Disposed)?;
        let source = resources.source.as_ref().ok_or(EngineError::NoActiveImage)?;

        resources
            .pipeline
            .write_uniforms(&ctx.queue, &GradeUniforms::from_params(params, time_ms));

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tintype_grade_encoder"),
            });
        resources.pipeline.encode(
            &mut encoder,
            &resources.surface.view,
            &source.bind_group,
            &resources.quad,
        );
        ctx.queue.submit(std::iter::once(encoder.finish()));
        ctx.wait_idle()?;

        self.has_frame = true;
        tracing::debug!(time_ms, "frame rendered");
        Ok(())
    }

    /// Raw RGBA8 contents of the most recently rendered frame.
    pub fn read_pixels(&mut self) -> Result<SourceImage, EngineError> {
        let has_frame = self.has_frame;
        let ctx = &self.ctx;
        let resources = self.resources.as_mut().ok_or(EngineError::Disposed)?;
        if !has_frame {
            return Err(EngineError::EmptyFrame);
        }
        resources.readback.download(ctx, &resources.surface)
    }

    /// PNG snapshot of the most recently rendered frame.
    pub fn export_snapshot(&mut self) -> Result<Vec<u8>, EngineError> {
        let frame = self.read_pixels()?;
        let png = encode_png(&frame)?;
        tracing::info!(
            width = frame.width,
            height = frame.height,
            bytes = png.len(),
            "snapshot exported"
        );
        Ok(png)
    }

    /// Reallocate the drawing surface. The previous frame is discarded.
    pub fn resize_surface(&mut self, size: SurfaceSize) -> Result<(), EngineError> {
        if self.resources.is_none() {
            return Err(EngineError::Disposed);
        }
        check_surface(&self.ctx, size)?;
        let surface = RenderSurface::new(&self.ctx.device, size);
        let resources = self.resources()?;
        let old = std::mem::replace(&mut resources.surface, surface);
        old.texture.destroy();

        self.size = size;
        self.has_frame = false;
        tracing::debug!(width = size.width, height = size.height, "surface resized");
        Ok(())
    }

    /// Release the program, buffers, and textures. Further calls fail with
    /// [`EngineError::Disposed`]; disposing twice is a no-op.
    pub fn dispose(&mut self) {
        if let Some(resources) = self.resources.take() {
            resources.destroy();
            self.has_frame = false;
            tracing::info!("render engine disposed");
        }
    }
}

fn check_surface(ctx: &GpuContext, size: SurfaceSize) -> Result<(), EngineError> {
    let max = ctx.device.limits().max_texture_dimension_2d;
    if size.width == 0 || size.height == 0 || size.width > max || size.height > max {
        return Err(EngineError::InvalidSurface {
            width: size.width,
            height: size.height,
            max,
        });
    }
    Ok(())
}
