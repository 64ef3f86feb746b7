//! Lift/Gamma/Gain three-way color wheels.
//!
//! # Formula
//! For each channel `c` in `{R, G, B}`:
//! ```text
//!   x   = in × gain[c] + lift[c]
//!   out = clamp(pow(max(x, 0), 1 / max(gamma[c], 0.001)), 0, 1)
//! ```
//!
//! ```text
//!   Input ──→ ×Gain ──→ +Lift ──→ max(0) ──→ ^(1/Gamma) ──→ clamp ──→ Output
//! ```

/// Smallest gamma used as a divisor. Keeps degenerate wheels finite.
pub const GAMMA_FLOOR: f32 = 0.001;

/// Apply lift/gamma/gain per channel.
///
/// Default identity values: lift=`[0,0,0]`, gamma=`[1,1,1]`, gain=`[1,1,1]`.
pub fn apply_lift_gamma_gain(
    rgb: [f32; 3],
    lift: &[f32; 3],
    gamma: &[f32; 3],
    gain: &[f32; 3],
) -> [f32; 3] {
    let mut out = [0.0_f32; 3];
    for c in 0..3 {
        let x = rgb[c] * gain[c] + lift[c];
        // Clamp to zero before power to avoid NaN from negative bases
        let base = x.max(0.0);
        out[c] = base.powf(1.0 / gamma[c].max(GAMMA_FLOOR)).clamp(0.0, 1.0);
    }
    out
}
