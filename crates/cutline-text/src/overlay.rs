//! Text overlay model, creation from presets and validation.

use cutline_core::limits::MAX_PERCENT;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::animation::TextAnimation;
use crate::color::Rgb;
use crate::preset::{preset_defaults, TextPreset};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Anchor point in percent of the canvas, the text box size in percent,
/// and how the box hangs off the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPosition {
    pub x: f64,
    pub y: f64,
    /// Box width; 0 fits the box to the text.
    #[serde(default)]
    pub width: f64,
    /// Box height; 0 fits the box to the text.
    #[serde(default)]
    pub height: f64,
    /// Degrees clockwise about the anchor.
    #[serde(default)]
    pub rotation: f64,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
}

impl TextPosition {
    /// Box size in pixels on a `canvas_w` x `canvas_h` canvas, or `None`
    /// when either side fits to the text.
    pub fn box_size(&self, canvas_w: u32, canvas_h: u32) -> Option<(f64, f64)> {
        (self.width > 0.0 && self.height > 0.0).then(|| {
            (
                self.width / 100.0 * f64::from(canvas_w),
                self.height / 100.0 * f64::from(canvas_h),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShadow {
    pub color: String,
    pub offset_x: f64,
    pub offset_y: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    /// Pixels at the output resolution.
    pub font_size: f64,
    /// CSS weight (400 regular, 700 bold).
    pub font_weight: u16,
    pub italic: bool,
    /// `#rgb` or `#rrggbb`.
    pub color: String,
    pub opacity: f64,
    pub background_color: Option<String>,
    pub background_opacity: f64,
    /// Box padding in pixels.
    pub padding: f64,
    pub shadow: Option<TextShadow>,
    pub stroke: Option<TextStroke>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_size: 48.0,
            font_weight: 400,
            italic: false,
            color: "#ffffff".to_string(),
            opacity: 1.0,
            background_color: None,
            background_opacity: 0.0,
            padding: 0.0,
            shadow: None,
            stroke: None,
        }
    }
}

/// A text overlay on a text track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub id: Uuid,
    pub track_id: Uuid,
    pub content: String,
    pub start_time: f64,
    pub duration: f64,
    pub position: TextPosition,
    pub style: TextStyle,
    pub animation_in: Option<TextAnimation>,
    pub animation_out: Option<TextAnimation>,
    pub visible: bool,
    pub preset: TextPreset,
}

impl TextOverlay {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Shown at `time`: visible and `start <= time < end`.
    pub fn is_visible_at(&self, time: f64) -> bool {
        is_visible_at(self, time)
    }
}

/// Shown at `time`: visible and `start <= time < end`.
pub fn is_visible_at(overlay: &TextOverlay, time: f64) -> bool {
    overlay.visible && time >= overlay.start_time && time < overlay.end_time()
}

/// Per-field position override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextPositionPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,
}

impl TextPositionPatch {
    pub fn apply_to(&self, position: &mut TextPosition) {
        if let Some(v) = self.x {
            position.x = v;
        }
        if let Some(v) = self.y {
            position.y = v;
        }
        if let Some(v) = self.width {
            position.width = v;
        }
        if let Some(v) = self.height {
            position.height = v;
        }
        if let Some(v) = self.rotation {
            position.rotation = v;
        }
        if let Some(v) = self.align {
            position.align = v;
        }
        if let Some(v) = self.vertical_align {
            position.vertical_align = v;
        }
    }
}

/// Per-field style override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStylePatch {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<u16>,
    pub italic: Option<bool>,
    pub color: Option<String>,
    pub opacity: Option<f64>,
    pub background_color: Option<String>,
    pub background_opacity: Option<f64>,
    pub padding: Option<f64>,
    pub shadow: Option<TextShadow>,
    pub stroke: Option<TextStroke>,
}

impl TextStylePatch {
    pub fn apply_to(&self, style: &mut TextStyle) {
        if let Some(v) = &self.font_family {
            style.font_family = v.clone();
        }
        if let Some(v) = self.font_size {
            style.font_size = v;
        }
        if let Some(v) = self.font_weight {
            style.font_weight = v;
        }
        if let Some(v) = self.italic {
            style.italic = v;
        }
        if let Some(v) = &self.color {
            style.color = v.clone();
        }
        if let Some(v) = self.opacity {
            style.opacity = v;
        }
        if let Some(v) = &self.background_color {
            style.background_color = Some(v.clone());
        }
        if let Some(v) = self.background_opacity {
            style.background_opacity = v;
        }
        if let Some(v) = self.padding {
            style.padding = v;
        }
        if let Some(v) = &self.shadow {
            style.shadow = Some(v.clone());
        }
        if let Some(v) = &self.stroke {
            style.stroke = Some(v.clone());
        }
    }
}

/// Caller overrides merged over a preset, field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOverlayOverrides {
    pub position: TextPositionPatch,
    pub style: TextStylePatch,
    pub animation_in: Option<TextAnimation>,
    pub animation_out: Option<TextAnimation>,
    pub visible: Option<bool>,
}

/// Create an overlay from a preset. Overrides win per field, so setting
/// only `style.color` keeps the preset's font, size and shadow.
pub fn create_text_overlay(
    track_id: Uuid,
    preset: TextPreset,
    content: impl Into<String>,
    start_time: f64,
    duration: f64,
    overrides: &TextOverlayOverrides,
) -> TextOverlay {
    let defaults = preset_defaults(preset);

    let mut position = defaults.position;
    overrides.position.apply_to(&mut position);
    let mut style = defaults.style;
    overrides.style.apply_to(&mut style);

    TextOverlay {
        id: Uuid::new_v4(),
        track_id,
        content: content.into(),
        start_time,
        duration,
        position,
        style,
        animation_in: overrides.animation_in.or(defaults.animation_in),
        animation_out: overrides.animation_out.or(defaults.animation_out),
        visible: overrides.visible.unwrap_or(true),
        preset,
    }
}

/// Rotation bound in degrees, either way.
const MAX_ROTATION: f64 = 360.0;

fn check_range(errors: &mut Vec<String>, label: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() || value < min || value > max {
        errors.push(format!("{label} must be between {min} and {max}"));
    }
}

/// Check an overlay. Empty means valid.
pub fn validate_text_overlay(overlay: &TextOverlay) -> Vec<String> {
    let mut errors = Vec::new();

    if overlay.content.trim().is_empty() {
        errors.push("Text content cannot be empty".to_string());
    }
    if overlay.start_time.is_nan() || overlay.start_time < 0.0 {
        errors.push("Start time cannot be negative".to_string());
    }
    if overlay.duration.is_nan() || overlay.duration <= 0.0 {
        errors.push("Duration must be positive".to_string());
    }

    check_range(&mut errors, "Position x", overlay.position.x, 0.0, MAX_PERCENT);
    check_range(&mut errors, "Position y", overlay.position.y, 0.0, MAX_PERCENT);
    check_range(&mut errors, "Width", overlay.position.width, 0.0, MAX_PERCENT);
    check_range(&mut errors, "Height", overlay.position.height, 0.0, MAX_PERCENT);
    check_range(&mut errors, "Rotation", overlay.position.rotation, -MAX_ROTATION, MAX_ROTATION);

    let style = &overlay.style;
    if style.font_size.is_nan() || style.font_size <= 0.0 {
        errors.push("Font size must be positive".to_string());
    }
    check_range(&mut errors, "Opacity", style.opacity, 0.0, 1.0);
    check_range(&mut errors, "Background opacity", style.background_opacity, 0.0, 1.0);
    if style.padding < 0.0 {
        errors.push("Padding cannot be negative".to_string());
    }
    if Rgb::parse_hex(&style.color).is_none() {
        errors.push(format!("Invalid text color '{}'", style.color));
    }
    if let Some(bg) = &style.background_color {
        if Rgb::parse_hex(bg).is_none() {
            errors.push(format!("Invalid background color '{bg}'"));
        }
    }
    if let Some(shadow) = &style.shadow {
        if Rgb::parse_hex(&shadow.color).is_none() {
            errors.push(format!("Invalid shadow color '{}'", shadow.color));
        }
    }
    if let Some(stroke) = &style.stroke {
        if Rgb::parse_hex(&stroke.color).is_none() {
            errors.push(format!("Invalid stroke color '{}'", stroke.color));
        }
        if stroke.width < 0.0 {
            errors.push("Stroke width cannot be negative".to_string());
        }
    }

    let mut animated = 0.0;
    for (label, anim) in [("Entry", overlay.animation_in), ("Exit", overlay.animation_out)] {
        let Some(anim) = anim else { continue };
        if anim.duration.is_nan() || anim.duration < 0.0 {
            errors.push(format!("{label} animation duration cannot be negative"));
        }
        if anim.delay.is_nan() || anim.delay < 0.0 {
            errors.push(format!("{label} animation delay cannot be negative"));
        }
        animated += anim.duration.max(0.0) + anim.delay.max(0.0);
    }
    if animated > overlay.duration {
        errors.push("Animations are longer than the overlay".to_string());
    }

    errors
}
