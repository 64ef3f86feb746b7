//! Primary tone adjustments: exposure, white balance, contrast.

/// Multiply by `2^exposure`. Output is not clamped.
pub fn apply_exposure(rgb: [f32; 3], exposure: f32) -> [f32; 3] {
    let scale = exposure.exp2();
    [rgb[0] * scale, rgb[1] * scale, rgb[2] * scale]
}

/// Shift red/blue by temperature and green by tint.
///
/// ```text
/// r += 0.1 × temperature
/// g += 0.05 × tint
/// b −= 0.1 × temperature
/// ```
pub fn apply_white_balance(rgb: [f32; 3], temperature: f32, tint: f32) -> [f32; 3] {
    [
        rgb[0] + temperature * 0.1,
        rgb[1] + tint * 0.05,
        rgb[2] - temperature * 0.1,
    ]
}

/// Linear contrast around mid-gray, clamped to `[0, 1]`.
///
/// ```text
/// out = clamp((in − 0.5) × contrast + 0.5, 0, 1)
/// ```
pub fn apply_contrast(rgb: [f32; 3], contrast: f32) -> [f32; 3] {
    rgb.map(|c| ((c - 0.5) * contrast + 0.5).clamp(0.0, 1.0))
}
