//! Color representations used as grading intermediates.

pub mod hsl;

pub use hsl::{hsl_to_rgb, luma, rgb_to_hsl};
