//! Finishing stages that run on the fully graded signal: saturation,
//! vignette, and film grain.

use crate::color::{hsl_to_rgb, rgb_to_hsl};

/// Scale HSL saturation, clamping the result to `[0, 1]`.
pub fn apply_saturation(rgb: [f32; 3], saturation: f32) -> [f32; 3] {
    let mut hsl = rgb_to_hsl(rgb);
    hsl[1] = (hsl[1] * saturation).clamp(0.0, 1.0);
    hsl_to_rgb(hsl)
}

/// Radial darkening factor for a normalized screen coordinate.
///
/// ```text
/// d      = uv − (0.5, 0.5)
/// factor = clamp(1 − dot(d, d) × vignette × 3, 0, 1)
/// ```
pub fn vignette_factor(uv: [f32; 2], vignette: f32) -> f32 {
    let dx = uv[0] - 0.5;
    let dy = uv[1] - 0.5;
    (1.0 - (dx * dx + dy * dy) * vignette * 3.0).clamp(0.0, 1.0)
}

/// Multiply by the vignette factor at `uv`.
pub fn apply_vignette(rgb: [f32; 3], uv: [f32; 2], vignette: f32) -> [f32; 3] {
    let factor = vignette_factor(uv, vignette);
    rgb.map(|c| c * factor)
}

/// Stateless 2-D hash in `[0, 1)`. Same input, same output.
pub fn hash(co: [f32; 2]) -> f32 {
    let s = (co[0] * 12.9898 + co[1] * 78.233).sin() * 43758.5453;
    s - s.floor()
}

/// Add signed grain. The hash input is offset along x by `time × 0.001`,
/// so grain animates with time while staying deterministic.
pub fn apply_grain(rgb: [f32; 3], uv: [f32; 2], time: f32, grain: f32) -> [f32; 3] {
    if grain <= 0.0 {
        return rgb;
    }
    let noise = hash([uv[0] + time * 0.001, uv[1]]) * 2.0 - 1.0;
    let delta = noise * grain * 0.08;
    rgb.map(|c| c + delta)
}
