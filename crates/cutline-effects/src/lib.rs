//! Cutline Effects - effect and transition compilers
//!
//! Provides the effect parameter schema with its preview (CSS) and export
//! mappings, effect chain compilation, presets, the per-clip effect stack
//! reducer, and transition validation plus filter-graph construction.

pub mod chain;
pub mod effect;
pub mod preset;
pub mod state;
pub mod transition;
pub mod transition_graph;

pub use chain::{compile_css_filter, compile_effect_chain};
pub use effect::{
    effect_config, effect_value_to_css, effect_value_to_ffmpeg, is_neutral, validate_effect,
    ClipEffect, EffectConfig, EffectType, ParamSpec,
};
pub use preset::{apply_preset, EffectPreset};
pub use state::{EffectsAction, EffectsState};
pub use transition::{
    validate_transition, validate_transition_duration, DurationValidity, Transition,
    TransitionConfig, TransitionType,
};
pub use transition_graph::{
    compile_audio_crossfade_chain, compile_transition_chain, compile_transition_pair,
    TransitionGraph,
};
