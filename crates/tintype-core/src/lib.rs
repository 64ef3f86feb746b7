//! Tintype Core — domain layer for still-image color grading.
//!
//! This crate contains the parameter model, the preset catalog, the session
//! state, and the CPU reference of the grading transform. No GPU or
//! framework dependencies.

pub mod color;
pub mod grading;
pub mod image;
pub mod presets;
pub mod session;
pub mod transform;

// Re-exports for convenience.
pub use image::{ImageError, SourceImage, WORKING_MAX_HEIGHT, WORKING_MAX_WIDTH};
pub use presets::{CatalogError, Preset, PresetCatalog, PresetCategory};
pub use session::{GradeSession, PresetBinding};
pub use transform::evaluate::{evaluate_transform, render_frame};
pub use transform::params::{Channel, FieldParseError, ParamField, ParameterSet};
