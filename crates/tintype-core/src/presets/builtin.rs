//! Built-in preset table. New looks are added by appending records here.

use super::{Preset, PresetCategory};
use crate::transform::params::ParameterSet;

fn preset(
    id: &str,
    name: &str,
    category: PresetCategory,
    description: &str,
    params: ParameterSet,
) -> Preset {
    Preset {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        params,
    }
}

pub(super) fn presets() -> Vec<Preset> {
    use PresetCategory::*;

    vec![
        preset(
            "none",
            "Original",
            Base,
            "No filter applied",
            ParameterSet::default(),
        ),
        // ── Classic ─────────────────────────────────────────────────
        preset(
            "apple_cinematic",
            "Apple Cinematic",
            Classic,
            "Warm tones · Lifted blacks · Skin-friendly",
            ParameterSet {
                exposure: 0.15,
                contrast: 1.08,
                saturation: 0.82,
                temperature: 0.25,
                tint: 0.05,
                lift: [0.04, 0.02, 0.01],
                gamma: [0.96, 0.98, 1.02],
                gain: [1.05, 1.0, 0.92],
                vignette: 0.3,
                grain: 0.15,
                ..ParameterSet::default()
            },
        ),
        preset(
            "old_money",
            "Old Money",
            Classic,
            "Muted greens · Warm skin · Film grain",
            ParameterSet {
                exposure: -0.1,
                contrast: 1.05,
                saturation: 0.65,
                temperature: 0.15,
                tint: -0.05,
                lift: [0.03, 0.03, 0.02],
                gamma: [1.0, 0.97, 0.94],
                gain: [1.02, 0.98, 0.88],
                vignette: 0.45,
                grain: 0.35,
                ..ParameterSet::default()
            },
        ),
        preset(
            "moody_cinematic",
            "Moody Cinema",
            Classic,
            "Deep shadows · Cool tones · Desaturated",
            ParameterSet {
                exposure: -0.25,
                contrast: 1.18,
                saturation: 0.72,
                temperature: -0.3,
                tint: 0.0,
                lift: [0.0, 0.01, 0.03],
                gamma: [0.93, 0.95, 1.0],
                gain: [0.92, 0.96, 1.08],
                vignette: 0.6,
                grain: 0.2,
                ..ParameterSet::default()
            },
        ),
        preset(
            "instagram_warm",
            "IG Warm",
            Classic,
            "Vibrant · High contrast · Golden hour",
            ParameterSet {
                exposure: 0.1,
                contrast: 1.15,
                saturation: 1.25,
                temperature: 0.4,
                tint: 0.1,
                lift: [0.02, 0.01, -0.01],
                gamma: [0.98, 0.98, 1.0],
                gain: [1.08, 1.02, 0.88],
                vignette: 0.2,
                grain: 0.05,
                ..ParameterSet::default()
            },
        ),
        preset(
            "vintage_film",
            "Vintage Film",
            Classic,
            "Teal & orange · Film grain · Light leak",
            ParameterSet {
                exposure: -0.05,
                contrast: 1.1,
                saturation: 0.9,
                temperature: 0.2,
                tint: -0.1,
                lift: [0.02, 0.04, 0.05],
                gamma: [1.0, 0.96, 0.9],
                gain: [1.06, 0.98, 0.85],
                vignette: 0.5,
                grain: 0.5,
                ..ParameterSet::default()
            },
        ),
        // ── Prequel ─────────────────────────────────────────────────
        preset(
            "prequel_dreamy",
            "Dreamy",
            Prequel,
            "Lavender shadows · Peach highlights · Soft contrast",
            ParameterSet {
                exposure: 0.2,
                contrast: 0.88,
                saturation: 0.85,
                temperature: 0.05,
                tint: 0.08,
                lift: [0.05, 0.04, 0.06],
                vignette: 0.15,
                grain: 0.1,
                shadow_tint: [0.45, 0.38, 0.6],
                highlight_tint: [1.0, 0.86, 0.76],
                shadow_strength: 0.35,
                highlight_strength: 0.25,
                ..ParameterSet::default()
            },
        ),
        preset(
            "prequel_teal_orange",
            "Teal & Orange",
            Prequel,
            "Teal shadows · Orange skin · Punchy",
            ParameterSet {
                contrast: 1.12,
                saturation: 1.1,
                temperature: 0.1,
                gain: [1.04, 1.0, 0.96],
                vignette: 0.25,
                shadow_tint: [0.0, 0.35, 0.42],
                highlight_tint: [1.0, 0.7, 0.42],
                shadow_strength: 0.45,
                highlight_strength: 0.3,
                ..ParameterSet::default()
            },
        ),
        preset(
            "prequel_y2k",
            "Y2K",
            Prequel,
            "Cyan tint · Blown highlights · Digicam grain",
            ParameterSet {
                exposure: 0.3,
                contrast: 1.2,
                saturation: 1.15,
                temperature: -0.2,
                tint: -0.05,
                gain: [0.98, 1.02, 1.08],
                grain: 0.25,
                shadow_tint: [0.1, 0.2, 0.35],
                highlight_tint: [0.85, 1.0, 1.0],
                shadow_strength: 0.2,
                highlight_strength: 0.4,
                ..ParameterSet::default()
            },
        ),
        // ── Royy ────────────────────────────────────────────────────
        preset(
            "royy_flash",
            "Flash",
            Royy,
            "Direct flash · Crushed background · Cool subject",
            ParameterSet {
                exposure: 0.1,
                contrast: 1.15,
                saturation: 0.95,
                vignette: 0.2,
                grain: 0.12,
                flash_strength: 0.8,
                flash_threshold: 0.45,
                background_crush: 0.6,
                ..ParameterSet::default()
            },
        ),
        preset(
            "royy_night_flash",
            "Night Flash",
            Royy,
            "Pitch-black background · Hard flash · Grain",
            ParameterSet {
                exposure: 0.05,
                contrast: 1.25,
                saturation: 0.9,
                temperature: -0.1,
                lift: [0.0, 0.0, 0.01],
                vignette: 0.35,
                grain: 0.3,
                flash_strength: 1.0,
                flash_threshold: 0.5,
                background_crush: 0.9,
                ..ParameterSet::default()
            },
        ),
        preset(
            "royy_party",
            "Party",
            Royy,
            "Flash pop · Magenta highlights · Deep shadows",
            ParameterSet {
                contrast: 1.1,
                saturation: 1.2,
                tint: 0.1,
                grain: 0.18,
                highlight_tint: [1.0, 0.75, 0.95],
                highlight_strength: 0.2,
                flash_strength: 0.6,
                flash_threshold: 0.4,
                background_crush: 0.45,
                ..ParameterSet::default()
            },
        ),
    ]
}
