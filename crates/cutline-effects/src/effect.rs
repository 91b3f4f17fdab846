//! Effect types, parameter schema and the two numeric mappings.
//!
//! Every effect stores its parameters in the editor's internal domain
//! (mostly -100..100 or 0..100). The same value is mapped one way for the
//! CSS preview and another way for the export backend; both mappings send
//! the default value to the target's neutral value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_2;
use uuid::Uuid;

/// Effect kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    Brightness,
    Contrast,
    Saturation,
    Exposure,
    Temperature,
    Hue,
    Blur,
    Sharpen,
    Grayscale,
    Sepia,
    Invert,
    Vignette,
    Noise,
}

impl EffectType {
    pub const ALL: [EffectType; 13] = [
        EffectType::Brightness,
        EffectType::Contrast,
        EffectType::Saturation,
        EffectType::Exposure,
        EffectType::Temperature,
        EffectType::Hue,
        EffectType::Blur,
        EffectType::Sharpen,
        EffectType::Grayscale,
        EffectType::Sepia,
        EffectType::Invert,
        EffectType::Vignette,
        EffectType::Noise,
    ];

    /// Effects that fold into the single combined `eq` stage.
    pub fn is_eq_component(self) -> bool {
        matches!(
            self,
            EffectType::Brightness | EffectType::Contrast | EffectType::Saturation
        )
    }

    /// Static configuration for this effect.
    pub fn config(self) -> &'static EffectConfig {
        effect_config(self)
    }
}

/// Parameter descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub display_name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    pub unit: &'static str,
}

impl ParamSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Static description of an effect type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    /// CSS filter function used for preview, if the browser has one.
    pub css_filter: Option<&'static str>,
    /// Name of the export filter the effect compiles to. Arguments come
    /// from the mapped parameter value at compile time.
    pub ffmpeg_filter_name: &'static str,
}

impl EffectConfig {
    /// The parameter that drives both mappings.
    pub fn primary(&self) -> &'static ParamSpec {
        &self.params[0]
    }

    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

const fn signed(name: &'static str, display_name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        display_name,
        min: -100.0,
        max: 100.0,
        default: 0.0,
        step: 1.0,
        unit: "",
    }
}

const fn amount(name: &'static str, display_name: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        display_name,
        min: 0.0,
        max: 100.0,
        default: 0.0,
        step: 1.0,
        unit: "%",
    }
}

static BRIGHTNESS: EffectConfig = EffectConfig {
    name: "Brightness",
    description: "Lighten or darken the image",
    params: &[signed("value", "Brightness")],
    css_filter: Some("brightness"),
    ffmpeg_filter_name: "eq",
};

static CONTRAST: EffectConfig = EffectConfig {
    name: "Contrast",
    description: "Stretch or flatten tonal range",
    params: &[signed("value", "Contrast")],
    css_filter: Some("contrast"),
    ffmpeg_filter_name: "eq",
};

static SATURATION: EffectConfig = EffectConfig {
    name: "Saturation",
    description: "Boost or mute colour intensity",
    params: &[signed("value", "Saturation")],
    css_filter: Some("saturate"),
    ffmpeg_filter_name: "eq",
};

static EXPOSURE: EffectConfig = EffectConfig {
    name: "Exposure",
    description: "Photographic exposure in stops",
    params: &[signed("value", "Exposure")],
    css_filter: Some("brightness"),
    ffmpeg_filter_name: "exposure",
};

static TEMPERATURE: EffectConfig = EffectConfig {
    name: "Temperature",
    description: "Shift white balance warmer or cooler",
    params: &[signed("value", "Temperature")],
    css_filter: None,
    ffmpeg_filter_name: "colortemperature",
};

static HUE: EffectConfig = EffectConfig {
    name: "Hue",
    description: "Rotate hues around the colour wheel",
    params: &[ParamSpec {
        name: "angle",
        display_name: "Angle",
        min: -180.0,
        max: 180.0,
        default: 0.0,
        step: 1.0,
        unit: "deg",
    }],
    css_filter: Some("hue-rotate"),
    ffmpeg_filter_name: "hue",
};

static BLUR: EffectConfig = EffectConfig {
    name: "Blur",
    description: "Gaussian blur",
    params: &[ParamSpec {
        name: "radius",
        display_name: "Radius",
        min: 0.0,
        max: 20.0,
        default: 0.0,
        step: 0.5,
        unit: "px",
    }],
    css_filter: Some("blur"),
    ffmpeg_filter_name: "gblur",
};

static SHARPEN: EffectConfig = EffectConfig {
    name: "Sharpen",
    description: "Unsharp mask on luma",
    params: &[amount("amount", "Amount")],
    css_filter: None,
    ffmpeg_filter_name: "unsharp",
};

static GRAYSCALE: EffectConfig = EffectConfig {
    name: "Grayscale",
    description: "Remove colour",
    params: &[amount("amount", "Amount")],
    css_filter: Some("grayscale"),
    ffmpeg_filter_name: "hue",
};

static SEPIA: EffectConfig = EffectConfig {
    name: "Sepia",
    description: "Warm brown monochrome tone",
    params: &[amount("amount", "Amount")],
    css_filter: Some("sepia"),
    ffmpeg_filter_name: "colorchannelmixer",
};

static INVERT: EffectConfig = EffectConfig {
    name: "Invert",
    description: "Invert colours",
    params: &[amount("amount", "Amount")],
    css_filter: Some("invert"),
    ffmpeg_filter_name: "lutrgb",
};

static VIGNETTE: EffectConfig = EffectConfig {
    name: "Vignette",
    description: "Darken the frame edges",
    params: &[amount("intensity", "Intensity")],
    css_filter: None,
    ffmpeg_filter_name: "vignette",
};

static NOISE: EffectConfig = EffectConfig {
    name: "Noise",
    description: "Temporal film grain",
    params: &[amount("amount", "Amount")],
    css_filter: None,
    ffmpeg_filter_name: "noise",
};

/// Static configuration for an effect type.
pub fn effect_config(effect_type: EffectType) -> &'static EffectConfig {
    match effect_type {
        EffectType::Brightness => &BRIGHTNESS,
        EffectType::Contrast => &CONTRAST,
        EffectType::Saturation => &SATURATION,
        EffectType::Exposure => &EXPOSURE,
        EffectType::Temperature => &TEMPERATURE,
        EffectType::Hue => &HUE,
        EffectType::Blur => &BLUR,
        EffectType::Sharpen => &SHARPEN,
        EffectType::Grayscale => &GRAYSCALE,
        EffectType::Sepia => &SEPIA,
        EffectType::Invert => &INVERT,
        EffectType::Vignette => &VIGNETTE,
        EffectType::Noise => &NOISE,
    }
}

/// True when `value` is the effect's default, i.e. the effect is a no-op.
pub fn is_neutral(effect_type: EffectType, value: f64) -> bool {
    (value - effect_config(effect_type).primary().default).abs() < 1e-9
}

/// Map an internal value to the effect's CSS preview function.
/// `None` for effects the preview cannot show.
pub fn effect_value_to_css(effect_type: EffectType, value: f64) -> Option<String> {
    let func = effect_config(effect_type).css_filter?;
    let arg = match effect_type {
        EffectType::Brightness | EffectType::Contrast | EffectType::Saturation => {
            format!("{}", css_num(1.0 + value / 100.0))
        }
        EffectType::Exposure => format!("{}", css_num(2f64.powf(value / 50.0))),
        EffectType::Hue => format!("{}deg", css_num(value)),
        EffectType::Blur => format!("{}px", css_num(value)),
        EffectType::Grayscale | EffectType::Sepia | EffectType::Invert => {
            format!("{}", css_num(value / 100.0))
        }
        EffectType::Temperature | EffectType::Sharpen | EffectType::Vignette | EffectType::Noise => {
            return None
        }
    };
    Some(format!("{func}({arg})"))
}

/// Map an internal value to the export filter's parameter.
pub fn effect_value_to_ffmpeg(effect_type: EffectType, value: f64) -> f64 {
    match effect_type {
        EffectType::Brightness => value / 100.0,
        EffectType::Contrast | EffectType::Saturation => 1.0 + value / 100.0,
        EffectType::Exposure => value / 50.0,
        EffectType::Temperature => 6500.0 + 35.0 * value,
        EffectType::Hue | EffectType::Blur | EffectType::Noise => value,
        EffectType::Sharpen => 1.5 * value / 100.0,
        EffectType::Grayscale => 1.0 - value / 100.0,
        EffectType::Sepia | EffectType::Invert => value / 100.0,
        EffectType::Vignette => value / 100.0 * FRAC_PI_2,
    }
}

fn css_num(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// An effect instance attached to a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipEffect {
    pub id: Uuid,
    pub clip_id: Uuid,
    pub effect_type: EffectType,
    pub params: BTreeMap<String, f64>,
    pub enabled: bool,
    /// Position in the clip's chain (ascending).
    pub order: u32,
}

impl ClipEffect {
    /// Create an enabled effect with default parameters.
    pub fn new(clip_id: Uuid, effect_type: EffectType, order: u32) -> Self {
        let params = effect_config(effect_type)
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.default))
            .collect();
        Self {
            id: Uuid::new_v4(),
            clip_id,
            effect_type,
            params,
            enabled: true,
            order,
        }
    }

    /// Create with the primary parameter set (clamped).
    pub fn with_value(clip_id: Uuid, effect_type: EffectType, value: f64, order: u32) -> Self {
        let mut effect = Self::new(clip_id, effect_type, order);
        let name = effect_config(effect_type).primary().name;
        effect.set_param(name, value);
        effect
    }

    /// Primary parameter value, falling back to its default.
    pub fn value(&self) -> f64 {
        let spec = effect_config(self.effect_type).primary();
        self.params.get(spec.name).copied().unwrap_or(spec.default)
    }

    /// Set a parameter, clamped to its bounds. Returns false for unknown names.
    pub fn set_param(&mut self, name: &str, value: f64) -> bool {
        let Some(spec) = effect_config(self.effect_type).param(name) else {
            return false;
        };
        let value = if value.is_finite() { spec.clamp(value) } else { spec.default };
        self.params.insert(name.to_string(), value);
        true
    }

    /// Whether this effect changes the picture.
    pub fn is_active(&self) -> bool {
        self.enabled && !is_neutral(self.effect_type, self.value())
    }
}

/// Check an effect's parameters. Empty means valid.
pub fn validate_effect(effect: &ClipEffect) -> Vec<String> {
    let config = effect_config(effect.effect_type);
    let mut errors = Vec::new();

    for (name, &value) in &effect.params {
        match config.param(name) {
            None => errors.push(format!("{} has no parameter '{}'", config.name, name)),
            Some(spec) if !spec.contains(value) => errors.push(format!(
                "{} {} must be between {} and {}",
                config.name, spec.display_name, spec.min, spec.max
            )),
            Some(_) => {}
        }
    }
    errors
}
