//! Core transform evaluation: applies the full grading chain to a single pixel.

use crate::grading::finishing::{apply_grain, apply_saturation, apply_vignette};
use crate::grading::flash::apply_flash;
use crate::grading::tone::{apply_contrast, apply_exposure, apply_white_balance};
use crate::grading::wheels::apply_lift_gamma_gain;
use crate::grading::zones::apply_zone_tint;
use crate::image::{ImageError, SourceImage};
use crate::transform::params::ParameterSet;

/// The core function. GPU `grade.wgsl` mirrors this exactly.
///
/// Applies the complete grading chain to one RGBA pixel in `[0, 1]`:
/// 1. Flash / crush (skipped when `flash_strength <= 0`)
/// 2. Exposure
/// 3. White balance
/// 4. Contrast
/// 5. Lift / gamma / gain
/// 6. Zone tinting
/// 7. Saturation
/// 8. Vignette
/// 9. Grain
/// 10. Final clamp
///
/// `uv` is the normalized screen coordinate, `time` is in milliseconds.
/// Alpha is passed through untouched.
pub fn evaluate_transform(
    rgba: [f32; 4],
    params: &ParameterSet,
    uv: [f32; 2],
    time: f32,
) -> [f32; 4] {
    let mut rgb = [rgba[0], rgba[1], rgba[2]];

    rgb = apply_flash(
        rgb,
        params.flash_strength,
        params.flash_threshold,
        params.background_crush,
    );
    rgb = apply_exposure(rgb, params.exposure);
    rgb = apply_white_balance(rgb, params.temperature, params.tint);
    rgb = apply_contrast(rgb, params.contrast);
    rgb = apply_lift_gamma_gain(rgb, &params.lift, &params.gamma, &params.gain);
    rgb = apply_zone_tint(
        rgb,
        &params.shadow_tint,
        params.shadow_strength,
        &params.highlight_tint,
        params.highlight_strength,
    );
    rgb = apply_saturation(rgb, params.saturation);
    rgb = apply_vignette(rgb, uv, params.vignette);
    rgb = apply_grain(rgb, uv, time, params.grain);

    // NaN from pathological inputs (e.g. infinite exposure) collapses to 0.
    let [r, g, b] = rgb.map(clamp_unit);
    [r, g, b, rgba[3]]
}

fn clamp_unit(c: f32) -> f32 {
    if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) }
}

/// CPU reference of the full-screen pass.
///
/// Evaluates [`evaluate_transform`] at every pixel centre and quantizes back
/// to RGBA8. The output has the source dimensions. Grids whose pixel count
/// disagrees with their dimensions are rejected.
pub fn render_frame(
    image: &SourceImage,
    params: &ParameterSet,
    time: f32,
) -> Result<SourceImage, ImageError> {
    image.validate()?;
    let w = image.width as f32;
    let h = image.height as f32;
    let mut pixels = Vec::with_capacity(image.pixels.len());

    for y in 0..image.height {
        for x in 0..image.width {
            let uv = [(x as f32 + 0.5) / w, (y as f32 + 0.5) / h];
            let src = image.pixel(x, y).map(|c| c as f32 / 255.0);
            let out = evaluate_transform(src, params, uv, time);
            pixels.push(out.map(|c| (c * 255.0).round() as u8));
        }
    }

    Ok(SourceImage {
        width: image.width,
        height: image.height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{luma, rgb_to_hsl};
    use crate::grading::tone::{apply_contrast, apply_exposure, apply_white_balance};
    use crate::grading::wheels::apply_lift_gamma_gain;

    const EPSILON: f32 = 1e-5;
    const CENTER: [f32; 2] = [0.5, 0.5];

    #[test]
    fn test_default_params_are_identity() {
        let params = ParameterSet::default();
        for rgba in [
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 0.5],
            [0.8, 0.4, 0.2, 1.0],
            [0.13, 0.77, 0.42, 0.0],
        ] {
            let out = evaluate_transform(rgba, &params, [0.1, 0.9], 500.0);
            for i in 0..4 {
                assert!(
                    (out[i] - rgba[i]).abs() < EPSILON,
                    "channel {i}: {:.8} vs {:.8}",
                    out[i],
                    rgba[i]
                );
            }
        }
    }

    #[test]
    fn test_saturation_zero_yields_post_wheel_lightness() {
        let mut params = ParameterSet::default();
        params.saturation = 0.0;
        params.exposure = 0.3;
        params.temperature = 0.4;
        params.contrast = 1.2;
        params.gain = [1.1, 0.9, 1.0];
        let src = [0.6, 0.3, 0.2];

        let out = evaluate_transform([src[0], src[1], src[2], 1.0], &params, CENTER, 0.0);

        let mut expected = apply_exposure(src, params.exposure);
        expected = apply_white_balance(expected, params.temperature, params.tint);
        expected = apply_contrast(expected, params.contrast);
        expected = apply_lift_gamma_gain(expected, &params.lift, &params.gamma, &params.gain);
        let lightness = rgb_to_hsl(expected)[2];

        for c in &out[..3] {
            assert!((c - lightness).abs() < EPSILON, "{out:?} vs {lightness}");
        }
    }

    #[test]
    fn test_one_stop_doubles_mid_gray() {
        let mut params = ParameterSet::default();
        let gray = [0.25, 0.25, 0.25, 1.0];
        let base = evaluate_transform(gray, &params, CENTER, 0.0);
        params.exposure = 1.0;
        let doubled = evaluate_transform(gray, &params, CENTER, 0.0);
        for i in 0..3 {
            assert!((doubled[i] - base[i] * 2.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_flash_disabled_ignores_threshold_and_crush() {
        let mut a = ParameterSet::default();
        a.exposure = 0.2;
        a.saturation = 1.3;
        let mut b = a.clone();
        b.flash_threshold = 0.9;
        b.background_crush = 1.0;
        let src = [0.12, 0.34, 0.56, 1.0];
        let out_a = evaluate_transform(src, &a, [0.2, 0.3], 40.0);
        let out_b = evaluate_transform(src, &b, [0.2, 0.3], 40.0);
        assert_eq!(out_a.map(f32::to_bits), out_b.map(f32::to_bits));
    }

    #[test]
    fn test_flash_crushes_background_before_exposure() {
        let mut params = ParameterSet::default();
        params.flash_strength = 1.0;
        params.flash_threshold = 0.5;
        params.background_crush = 1.0;
        params.exposure = 2.0;
        let out = evaluate_transform([0.05, 0.05, 0.05, 1.0], &params, CENTER, 0.0);
        // Crushed to black first, so exposure has nothing to amplify.
        assert!(luma([out[0], out[1], out[2]]) < EPSILON);
    }

    #[test]
    fn test_vignette_blacks_out_corner() {
        let mut params = ParameterSet::default();
        params.vignette = 1.0;
        let out = evaluate_transform([0.9, 0.9, 0.9, 1.0], &params, [0.0, 0.0], 0.0);
        assert_eq!(&out[..3], &[0.0, 0.0, 0.0]);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_pathological_params_stay_in_range() {
        let params = ParameterSet {
            exposure: 200.0,
            contrast: -50.0,
            saturation: f32::INFINITY,
            gamma: [0.0, -2.0, f32::MIN_POSITIVE],
            gain: [1e30, -1e30, 0.0],
            grain: 10.0,
            vignette: -4.0,
            ..ParameterSet::default()
        };
        let out = evaluate_transform([0.5, 0.2, 0.9, 1.0], &params, [0.7, 0.1], 99.0);
        for c in out {
            assert!(c.is_finite() && (0.0..=1.0).contains(&c), "{out:?}");
        }
    }

    #[test]
    fn test_render_frame_identity_preserves_pixels() {
        let mut image = SourceImage::solid(3, 2, [0, 0, 0, 255]);
        for (i, px) in image.pixels.iter_mut().enumerate() {
            *px = [(i * 40) as u8, (255 - i * 30) as u8, (i * 7) as u8, (200 + i) as u8];
        }
        let out = render_frame(&image, &ParameterSet::default(), 0.0).unwrap();
        assert_eq!(out, image);
    }

    #[test]
    fn test_render_frame_rejects_malformed_grid() {
        let short = SourceImage {
            width: 4,
            height: 4,
            pixels: vec![[128, 128, 128, 255]; 3],
        };
        assert_eq!(
            render_frame(&short, &ParameterSet::default(), 0.0),
            Err(ImageError::BufferSizeMismatch {
                expected: 64,
                actual: 12,
            })
        );

        let empty = SourceImage {
            width: 0,
            height: 4,
            pixels: Vec::new(),
        };
        assert_eq!(
            render_frame(&empty, &ParameterSet::default(), 0.0),
            Err(ImageError::Empty)
        );
    }
}
