//! Flash / crush look: on-camera-flash subject separation.
//!
//! Pixels whose luma sits below the threshold are treated as background and
//! pushed toward black. Everything then receives a fixed cool bias and a
//! slight desaturation scaled by the effect strength.
//!
//! ```text
//!   L    = dot(rgb, rec709)
//!   m    = smoothstep(threshold − 0.15, threshold + 0.2, L)
//!   rgb *= 1 − crush × (1 − m)
//!   r   *= 1 − 0.08 × strength
//!   b   *= 1 + 0.06 × strength
//!   hsl.s *= 1 − 0.25 × strength
//! ```

use crate::color::{hsl_to_rgb, luma, rgb_to_hsl};

/// Distance below the threshold where the subject mask starts rising.
const MASK_LOWER: f32 = 0.15;
/// Distance above the threshold where the subject mask reaches 1.
const MASK_UPPER: f32 = 0.2;

/// Hermite interpolation between two edges, matching WGSL `smoothstep`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Soft subject mask: 0 for background, 1 for subject.
pub fn subject_mask(rgb: [f32; 3], threshold: f32) -> f32 {
    smoothstep(threshold - MASK_LOWER, threshold + MASK_UPPER, luma(rgb))
}

/// Apply the flash/crush stage. `strength <= 0` returns the input untouched.
pub fn apply_flash(rgb: [f32; 3], strength: f32, threshold: f32, crush: f32) -> [f32; 3] {
    if strength <= 0.0 {
        return rgb;
    }

    let m = subject_mask(rgb, threshold);
    let darken = 1.0 - crush * (1.0 - m);
    let mut out = [rgb[0] * darken, rgb[1] * darken, rgb[2] * darken];

    out[0] *= 1.0 - 0.08 * strength;
    out[2] *= 1.0 + 0.06 * strength;

    let mut hsl = rgb_to_hsl(out);
    hsl[1] *= 1.0 - 0.25 * strength;
    hsl_to_rgb(hsl)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.2, 0.6, 0.1), 0.0);
        assert_eq!(smoothstep(0.2, 0.6, 0.9), 1.0);
        assert!((smoothstep(0.2, 0.6, 0.4) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_zero_strength_is_identity() {
        let rgb = [0.3, 0.6, 0.2];
        assert_eq!(apply_flash(rgb, 0.0, 0.1, 1.0), rgb);
    }

    #[test]
    fn test_background_is_crushed() {
        // Luma 0.05 is well under the lower edge of a 0.5 threshold.
        let dark = [0.05, 0.05, 0.05];
        let out = apply_flash(dark, 1.0, 0.5, 1.0);
        for c in out {
            assert!(c.abs() < EPSILON, "full crush should reach black, got {c}");
        }
    }

    #[test]
    fn test_subject_keeps_brightness_and_cools() {
        let bright = [0.8, 0.8, 0.8];
        let out = apply_flash(bright, 1.0, 0.3, 1.0);
        // Above the upper edge the mask is 1, so only the channel bias applies.
        assert!(out[2] > out[0], "subject should be biased cool: {out:?}");
        let l = luma(out);
        assert!(l > 0.7, "subject luma should survive the crush: {l}");
    }
}
