//! Grading stages, one module per group of the pixel chain.

pub mod finishing;
pub mod flash;
pub mod tone;
pub mod wheels;
pub mod zones;
