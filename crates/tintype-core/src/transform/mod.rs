//! The grading transform: its parameters and its per-pixel evaluation.

pub mod evaluate;
pub mod params;
