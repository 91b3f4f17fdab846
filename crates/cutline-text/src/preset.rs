//! Named overlay presets.

use cutline_core::Easing;
use serde::{Deserialize, Serialize};

use crate::animation::{TextAnimation, TextAnimationType};
use crate::overlay::{TextAlign, TextPosition, TextShadow, TextStroke, TextStyle, VerticalAlign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPreset {
    Title,
    Subtitle,
    LowerThird,
    Caption,
    Watermark,
    #[default]
    Custom,
}

impl TextPreset {
    pub const ALL: [TextPreset; 6] = [
        TextPreset::Title,
        TextPreset::Subtitle,
        TextPreset::LowerThird,
        TextPreset::Caption,
        TextPreset::Watermark,
        TextPreset::Custom,
    ];
}

/// Everything a preset specifies.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDefaults {
    pub position: TextPosition,
    pub style: TextStyle,
    pub animation_in: Option<TextAnimation>,
    pub animation_out: Option<TextAnimation>,
}

/// Anchor and box size in percent of the canvas.
fn position(
    (x, y): (f64, f64),
    (width, height): (f64, f64),
    align: TextAlign,
    vertical_align: VerticalAlign,
) -> TextPosition {
    TextPosition {
        x,
        y,
        width,
        height,
        rotation: 0.0,
        align,
        vertical_align,
    }
}

fn soft_shadow() -> TextShadow {
    TextShadow {
        color: "#000000".to_string(),
        offset_x: 2.0,
        offset_y: 2.0,
        opacity: 0.6,
    }
}

/// Full position, style and animations for a preset.
pub fn preset_defaults(preset: TextPreset) -> PresetDefaults {
    match preset {
        TextPreset::Title => PresetDefaults {
            position: position((50.0, 50.0), (80.0, 20.0), TextAlign::Center, VerticalAlign::Middle),
            style: TextStyle {
                font_size: 72.0,
                font_weight: 700,
                shadow: Some(soft_shadow()),
                ..TextStyle::default()
            },
            animation_in: Some(
                TextAnimation::new(TextAnimationType::Fade, 0.5).with_easing(Easing::EaseOut),
            ),
            animation_out: Some(
                TextAnimation::new(TextAnimationType::Fade, 0.5).with_easing(Easing::EaseIn),
            ),
        },
        TextPreset::Subtitle => PresetDefaults {
            position: position((50.0, 85.0), (80.0, 10.0), TextAlign::Center, VerticalAlign::Bottom),
            style: TextStyle {
                font_size: 36.0,
                stroke: Some(TextStroke {
                    color: "#000000".to_string(),
                    width: 2.0,
                }),
                ..TextStyle::default()
            },
            animation_in: None,
            animation_out: None,
        },
        TextPreset::LowerThird => PresetDefaults {
            position: position((5.0, 85.0), (40.0, 12.0), TextAlign::Left, VerticalAlign::Bottom),
            style: TextStyle {
                font_size: 32.0,
                font_weight: 600,
                background_color: Some("#000000".to_string()),
                background_opacity: 0.6,
                padding: 12.0,
                ..TextStyle::default()
            },
            animation_in: Some(
                TextAnimation::new(TextAnimationType::SlideRight, 0.4)
                    .with_easing(Easing::EaseOut),
            ),
            animation_out: Some(TextAnimation::new(TextAnimationType::Fade, 0.3)),
        },
        TextPreset::Caption => PresetDefaults {
            position: position((50.0, 92.0), (90.0, 8.0), TextAlign::Center, VerticalAlign::Bottom),
            style: TextStyle {
                font_size: 28.0,
                background_color: Some("#000000".to_string()),
                background_opacity: 0.5,
                padding: 8.0,
                ..TextStyle::default()
            },
            animation_in: None,
            animation_out: None,
        },
        TextPreset::Watermark => PresetDefaults {
            position: position((95.0, 95.0), (20.0, 5.0), TextAlign::Right, VerticalAlign::Bottom),
            style: TextStyle {
                font_size: 24.0,
                opacity: 0.5,
                ..TextStyle::default()
            },
            animation_in: None,
            animation_out: None,
        },
        TextPreset::Custom => PresetDefaults {
            position: position((50.0, 50.0), (50.0, 10.0), TextAlign::Center, VerticalAlign::Middle),
            style: TextStyle::default(),
            animation_in: None,
            animation_out: None,
        },
    }
}
