//! Cutline Text - text overlay engine
//!
//! Overlay model with named presets, entry/exit animation progress and
//! easing, validation, and compilation to `drawtext` filters.

pub mod animation;
pub mod color;
pub mod drawtext;
pub mod overlay;
pub mod preset;

pub use animation::{
    animated_state, calculate_animation_progress, eased_progress, AnimatedState,
    AnimationProgress, TextAnimation, TextAnimationType,
};
pub use color::Rgb;
pub use drawtext::{compile_drawtext, compile_text_box, compile_text_chain};
pub use overlay::{
    create_text_overlay, is_visible_at, validate_text_overlay, TextAlign, TextOverlay,
    TextOverlayOverrides, TextPosition, TextPositionPatch, TextShadow, TextStroke, TextStyle,
    TextStylePatch, VerticalAlign,
};
pub use preset::{preset_defaults, PresetDefaults, TextPreset};
