//! Tintype GPU — wgpu render engine for the grading transform.
//!
//! This crate owns all GPU resources. It runs the WGSL port of
//! `tintype_core::evaluate_transform` as a full-screen pass into an offscreen
//! surface and reads the result back for display or PNG export.

pub mod buffers;
pub mod context;
pub mod engine;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod readback;

pub use buffers::SurfaceSize;
pub use context::{GpuConfig, GpuContext};
pub use engine::{EngineState, RenderEngine};
pub use error::EngineError;
pub use export::encode_png;
pub use pipeline::GradeUniforms;
