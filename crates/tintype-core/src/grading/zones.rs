//! Luma-selective shadow and highlight tinting.
//!
//! ```text
//!   shadow_mix    = clamp(1 − 3.5 × luma, 0, 1)          × shadow_strength
//!   highlight_mix = clamp((luma − 0.55) × 3, 0, 1)        × highlight_strength
//!   rgb = mix(rgb, shadow_tint, shadow_mix)
//!   rgb = mix(rgb, highlight_tint, highlight_mix)
//! ```
//!
//! Both weights come from the luma of the incoming color; the highlight mix
//! is applied to the result of the shadow mix.

use crate::color::luma;

/// Linear interpolation, matching WGSL `mix`.
pub fn mix3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Shadow weight before strength scaling.
pub fn shadow_weight(luma: f32) -> f32 {
    (1.0 - luma * 3.5).clamp(0.0, 1.0)
}

/// Highlight weight before strength scaling.
pub fn highlight_weight(luma: f32) -> f32 {
    ((luma - 0.55) * 3.0).clamp(0.0, 1.0)
}

/// Blend shadows toward `shadow_tint` and highlights toward `highlight_tint`.
pub fn apply_zone_tint(
    rgb: [f32; 3],
    shadow_tint: &[f32; 3],
    shadow_strength: f32,
    highlight_tint: &[f32; 3],
    highlight_strength: f32,
) -> [f32; 3] {
    let l = luma(rgb);
    let shadow_mix = shadow_weight(l) * shadow_strength;
    let highlight_mix = highlight_weight(l) * highlight_strength;

    let shadowed = mix3(rgb, *shadow_tint, shadow_mix);
    mix3(shadowed, *highlight_tint, highlight_mix)
}
