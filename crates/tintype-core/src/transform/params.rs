//! Central parameter struct that defines one complete grade.
//!
//! `ParameterSet` is the single source of truth for every adjustment. Presets
//! store one, the session mutates one, and the GPU uniform block is packed
//! from one every frame.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every tool writes here. The fragment shader reads the full struct.
///
/// Ranges noted on each field are the documented control ranges. Nothing in
/// this type enforces them; the transform stays well-defined for any value.
/// Fields missing from serialized input take their identity value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterSet {
    /// Exposure in stops, applied as `2^exposure`. Range `[-2, 2]`.
    pub exposure: f32,
    /// Contrast slope around mid-gray. Range `[0.5, 2]`, 1.0 = neutral.
    pub contrast: f32,
    /// HSL saturation multiplier. Range `[0, 2]`, 1.0 = neutral.
    pub saturation: f32,
    /// Red/blue balance offset. Range `[-1, 1]`.
    pub temperature: f32,
    /// Green offset. Range `[-1, 1]`.
    pub tint: f32,

    // Primary wheels [R, G, B]
    /// Additive shadow offset. Default: `[0, 0, 0]`.
    pub lift: [f32; 3],
    /// Midtone power curve, applied as the inverse exponent. Default: `[1, 1, 1]`.
    pub gamma: [f32; 3],
    /// Multiplicative highlight scale. Default: `[1, 1, 1]`.
    pub gain: [f32; 3],

    // Finishing
    /// Radial darkening strength. Range `[0, 1]`.
    pub vignette: f32,
    /// Film grain amplitude. Range `[0, 1]`.
    pub grain: f32,

    // Zone tinting
    /// Target color blended into the shadows.
    pub shadow_tint: [f32; 3],
    /// Target color blended into the highlights.
    pub highlight_tint: [f32; 3],
    /// Shadow blend amount. Range `[0, 1]`.
    pub shadow_strength: f32,
    /// Highlight blend amount. Range `[0, 1]`.
    pub highlight_strength: f32,

    // Flash / crush
    /// Scales the flash look. 0.0 disables the stage entirely.
    pub flash_strength: f32,
    /// Luma threshold separating subject from background.
    pub flash_threshold: f32,
    /// Darkening applied to background (sub-threshold) pixels.
    pub background_crush: f32,
}

impl Default for ParameterSet {
    /// Produces an identity (no-op) grade. The image passes through unchanged.
    fn default() -> Self {
        Self {
            exposure: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            temperature: 0.0,
            tint: 0.0,
            lift: [0.0, 0.0, 0.0],
            gamma: [1.0, 1.0, 1.0],
            gain: [1.0, 1.0, 1.0],
            vignette: 0.0,
            grain: 0.0,
            shadow_tint: [0.0, 0.0, 0.0],
            highlight_tint: [1.0, 1.0, 1.0],
            shadow_strength: 0.0,
            highlight_strength: 0.0,
            flash_strength: 0.0,
            flash_threshold: 0.5,
            background_crush: 0.0,
        }
    }
}

/// One color channel of a vector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    pub const fn index(self) -> usize {
        match self {
            Self::R => 0,
            Self::G => 1,
            Self::B => 2,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::G => "g",
            Self::B => "b",
        }
    }
}

/// Addresses exactly one scalar of a [`ParameterSet`]: a scalar field or one
/// component of a vector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    Exposure,
    Contrast,
    Saturation,
    Temperature,
    Tint,
    Lift(Channel),
    Gamma(Channel),
    Gain(Channel),
    Vignette,
    Grain,
    ShadowTint(Channel),
    HighlightTint(Channel),
    ShadowStrength,
    HighlightStrength,
    FlashStrength,
    FlashThreshold,
    BackgroundCrush,
}

impl ParamField {
    /// Every addressable scalar, in declaration order.
    pub fn all() -> Vec<ParamField> {
        let mut fields = vec![
            Self::Exposure,
            Self::Contrast,
            Self::Saturation,
            Self::Temperature,
            Self::Tint,
        ];
        fields.extend(Channel::ALL.map(Self::Lift));
        fields.extend(Channel::ALL.map(Self::Gamma));
        fields.extend(Channel::ALL.map(Self::Gain));
        fields.extend([Self::Vignette, Self::Grain]);
        fields.extend(Channel::ALL.map(Self::ShadowTint));
        fields.extend(Channel::ALL.map(Self::HighlightTint));
        fields.extend([
            Self::ShadowStrength,
            Self::HighlightStrength,
            Self::FlashStrength,
            Self::FlashThreshold,
            Self::BackgroundCrush,
        ]);
        fields
    }

    /// Serialized name of the owning field (`shadowTint` for `ShadowTint(_)`).
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::Exposure => "exposure",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Temperature => "temperature",
            Self::Tint => "tint",
            Self::Lift(_) => "lift",
            Self::Gamma(_) => "gamma",
            Self::Gain(_) => "gain",
            Self::Vignette => "vignette",
            Self::Grain => "grain",
            Self::ShadowTint(_) => "shadowTint",
            Self::HighlightTint(_) => "highlightTint",
            Self::ShadowStrength => "shadowStrength",
            Self::HighlightStrength => "highlightStrength",
            Self::FlashStrength => "flashStrength",
            Self::FlashThreshold => "flashThreshold",
            Self::BackgroundCrush => "backgroundCrush",
        }
    }

    const fn channel(self) -> Option<Channel> {
        match self {
            Self::Lift(c)
            | Self::Gamma(c)
            | Self::Gain(c)
            | Self::ShadowTint(c)
            | Self::HighlightTint(c) => Some(c),
            _ => None,
        }
    }

    fn vector(base: &str, channel: Channel) -> Option<Self> {
        Some(match base {
            "lift" => Self::Lift(channel),
            "gamma" => Self::Gamma(channel),
            "gain" => Self::Gain(channel),
            "shadowTint" => Self::ShadowTint(channel),
            "highlightTint" => Self::HighlightTint(channel),
            _ => return None,
        })
    }

    fn scalar(name: &str) -> Option<Self> {
        Some(match name {
            "exposure" => Self::Exposure,
            "contrast" => Self::Contrast,
            "saturation" => Self::Saturation,
            "temperature" => Self::Temperature,
            "tint" => Self::Tint,
            "vignette" => Self::Vignette,
            "grain" => Self::Grain,
            "shadowStrength" => Self::ShadowStrength,
            "highlightStrength" => Self::HighlightStrength,
            "flashStrength" => Self::FlashStrength,
            "flashThreshold" => Self::FlashThreshold,
            "backgroundCrush" => Self::BackgroundCrush,
            _ => return None,
        })
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel() {
            Some(c) => write!(f, "{}.{}", self.base_name(), c.suffix()),
            None => f.write_str(self.base_name()),
        }
    }
}

/// Errors from parsing field names and `field=value` assignments.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("unknown parameter field: {0}")]
    UnknownField(String),
    #[error("expected FIELD=VALUE, got: {0}")]
    InvalidAssignment(String),
    #[error("invalid numeric value: {0}")]
    InvalidValue(String),
}

impl FromStr for ParamField {
    type Err = FieldParseError;

    /// Accepts `exposure`, `lift.r`, `shadowTint.b`, and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FieldParseError::UnknownField(s.to_string());
        match s.split_once('.') {
            Some((base, suffix)) => {
                let channel = match suffix {
                    "r" => Channel::R,
                    "g" => Channel::G,
                    "b" => Channel::B,
                    _ => return Err(unknown()),
                };
                Self::vector(base, channel).ok_or_else(unknown)
            }
            None => Self::scalar(s).ok_or_else(unknown),
        }
    }
}

/// Parse a `FIELD=VALUE` assignment such as `lift.r=0.02`.
pub fn parse_assignment(text: &str) -> Result<(ParamField, f32), FieldParseError> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| FieldParseError::InvalidAssignment(text.to_string()))?;
    let field: ParamField = name.trim().parse()?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| FieldParseError::InvalidValue(value.to_string()))?;
    Ok((field, value))
}

impl ParameterSet {
    /// Read one scalar.
    pub fn get(&self, field: ParamField) -> f32 {
        match field {
            ParamField::Exposure => self.exposure,
            ParamField::Contrast => self.contrast,
            ParamField::Saturation => self.saturation,
            ParamField::Temperature => self.temperature,
            ParamField::Tint => self.tint,
            ParamField::Lift(c) => self.lift[c.index()],
            ParamField::Gamma(c) => self.gamma[c.index()],
            ParamField::Gain(c) => self.gain[c.index()],
            ParamField::Vignette => self.vignette,
            ParamField::Grain => self.grain,
            ParamField::ShadowTint(c) => self.shadow_tint[c.index()],
            ParamField::HighlightTint(c) => self.highlight_tint[c.index()],
            ParamField::ShadowStrength => self.shadow_strength,
            ParamField::HighlightStrength => self.highlight_strength,
            ParamField::FlashStrength => self.flash_strength,
            ParamField::FlashThreshold => self.flash_threshold,
            ParamField::BackgroundCrush => self.background_crush,
        }
    }

    /// Write one scalar, leaving every other field untouched. No validation.
    pub fn set(&mut self, field: ParamField, value: f32) {
        let slot = match field {
            ParamField::Exposure => &mut self.exposure,
            ParamField::Contrast => &mut self.contrast,
            ParamField::Saturation => &mut self.saturation,
            ParamField::Temperature => &mut self.temperature,
            ParamField::Tint => &mut self.tint,
            ParamField::Lift(c) => &mut self.lift[c.index()],
            ParamField::Gamma(c) => &mut self.gamma[c.index()],
            ParamField::Gain(c) => &mut self.gain[c.index()],
            ParamField::Vignette => &mut self.vignette,
            ParamField::Grain => &mut self.grain,
            ParamField::ShadowTint(c) => &mut self.shadow_tint[c.index()],
            ParamField::HighlightTint(c) => &mut self.highlight_tint[c.index()],
            ParamField::ShadowStrength => &mut self.shadow_strength,
            ParamField::HighlightStrength => &mut self.highlight_strength,
            ParamField::FlashStrength => &mut self.flash_strength,
            ParamField::FlashThreshold => &mut self.flash_threshold,
            ParamField::BackgroundCrush => &mut self.background_crush,
        };
        *slot = value;
    }
}
