use tintype_core::ImageError;

/// Errors surfaced by the render engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No usable adapter/device, or the device failed fatally. Not retried.
    #[error("GPU initialization failed: {0}")]
    Initialization(String),
    #[error("surface size {width}x{height} is outside 1..={max}")]
    InvalidSurface { width: u32, height: u32, max: u32 },
    #[error("unsupported input image: {0}")]
    UnsupportedInput(#[from] ImageError),
    #[error("image {width}x{height} exceeds the device texture limit {max}")]
    ImageTooLarge { width: u32, height: u32, max: u32 },
    #[error("no image loaded")]
    NoActiveImage,
    #[error("nothing has been rendered yet")]
    EmptyFrame,
    #[error("engine has been disposed")]
    Disposed,
    #[error("surface readback failed: {0}")]
    Readback(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
