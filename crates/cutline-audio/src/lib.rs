//! Cutline Audio - audio mixer engine
//!
//! Architecture:
//! - `AudioConfig`/`AudioClip`: per-clip volume, fades and pan, compiled to
//!   filter chains
//! - `AudioMixerState`: per-track volume/mute/solo/pan with master controls
//!   and effective-volume resolution
//! - `WaveformData`: peak data for timeline display

pub mod clip;
pub mod mixer;
pub mod waveform;

pub use clip::{
    atempo_chain, compile_audio_filters, compile_clip_audio, compile_mix, pan_gains,
    validate_audio_config, AudioClip, AudioConfig,
};
pub use mixer::{effective_volume, AudioMixerState, AudioMixerTrack, MixerAction};
pub use waveform::WaveformData;
