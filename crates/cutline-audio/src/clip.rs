//! Per-clip audio settings and their filter chains.

use cutline_core::limits::{MAX_PAN, MAX_VOLUME, MIN_PAN};
use cutline_core::{fmt_num, CutlineError, Filter, FilterChain, GraphNode, Result};
use cutline_timeline::TimelineClip;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Volume, fades and pan for one clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    /// Linear gain, 0.0 to 2.0.
    pub volume: f64,
    /// Fade-in length in seconds.
    pub fade_in: f64,
    /// Fade-out length in seconds.
    pub fade_out: f64,
    pub muted: bool,
    /// -1.0 full left, 1.0 full right.
    pub pan: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            fade_in: 0.0,
            fade_out: 0.0,
            muted: false,
            pan: 0.0,
        }
    }
}

/// An audio-bearing clip placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioClip {
    pub clip_id: Uuid,
    pub track_id: Uuid,
    pub start_time: f64,
    pub duration: f64,
    pub source_start: f64,
    pub source_end: f64,
    pub config: AudioConfig,
}

impl AudioClip {
    pub fn from_clip(clip: &TimelineClip, config: AudioConfig) -> Self {
        Self {
            clip_id: clip.id,
            track_id: clip.track_id,
            start_time: clip.start_time,
            duration: clip.duration,
            source_start: clip.source_start,
            source_end: clip.source_end,
            config,
        }
    }

    /// Source seconds consumed per timeline second.
    pub fn speed(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.source_end - self.source_start) / self.duration
    }
}

/// Smallest and largest factor a single `atempo` stage accepts everywhere.
const ATEMPO_MIN: f64 = 0.5;
const ATEMPO_MAX: f64 = 2.0;

/// `atempo` stages whose product is `speed`. Factors outside one stage's
/// range are split across several stages.
pub fn atempo_chain(speed: f64) -> FilterChain {
    let mut chain = FilterChain::new();
    if !speed.is_finite() || speed <= 0.0 || (speed - 1.0).abs() < 1e-9 {
        return chain;
    }
    let mut remaining = speed;
    while remaining > ATEMPO_MAX {
        chain.push(Filter::new("atempo").positional(fmt_num(ATEMPO_MAX)));
        remaining /= ATEMPO_MAX;
    }
    while remaining < ATEMPO_MIN {
        chain.push(Filter::new("atempo").positional(fmt_num(ATEMPO_MIN)));
        remaining /= ATEMPO_MIN;
    }
    if (remaining - 1.0).abs() >= 1e-9 {
        chain.push(Filter::new("atempo").positional(fmt_num(remaining)));
    }
    chain
}

/// Left and right channel gains for a pan value. Centre leaves both at
/// unity; panning attenuates only the opposite side.
pub fn pan_gains(pan: f64) -> (f64, f64) {
    let pan = pan.clamp(MIN_PAN, MAX_PAN);
    let left = if pan <= 0.0 { 1.0 } else { 1.0 - pan };
    let right = if pan >= 0.0 { 1.0 } else { 1.0 + pan };
    (left, right)
}

pub fn validate_audio_config(config: &AudioConfig, clip_duration: f64) -> Vec<String> {
    let mut errors = Vec::new();

    if !(0.0..=MAX_VOLUME).contains(&config.volume) {
        errors.push(format!("Volume must be between 0 and {MAX_VOLUME}"));
    }
    if !(MIN_PAN..=MAX_PAN).contains(&config.pan) {
        errors.push(format!("Pan must be between {MIN_PAN} and {MAX_PAN}"));
    }
    if config.fade_in < 0.0 {
        errors.push("Fade in cannot be negative".to_string());
    }
    if config.fade_out < 0.0 {
        errors.push("Fade out cannot be negative".to_string());
    }
    if config.fade_in + config.fade_out > clip_duration {
        errors.push("Fade in and fade out exceed clip duration".to_string());
    }

    errors
}

/// Filters for one clip's audio, in processing order. A default config
/// compiles to an empty chain.
pub fn compile_audio_filters(config: &AudioConfig, clip_duration: f64) -> FilterChain {
    let mut chain = FilterChain::new();

    if config.muted {
        chain.push(Filter::new("volume").positional("0"));
        return chain;
    }

    if config.volume != 1.0 {
        let volume = config.volume.clamp(0.0, MAX_VOLUME);
        chain.push(Filter::new("volume").positional(fmt_num(volume)));
    }

    if config.fade_in > 0.0 {
        chain.push(
            Filter::new("afade")
                .arg("t", "in")
                .num("st", 0.0)
                .num("d", config.fade_in),
        );
    }

    if config.fade_out > 0.0 {
        chain.push(
            Filter::new("afade")
                .arg("t", "out")
                .num("st", (clip_duration - config.fade_out).max(0.0))
                .num("d", config.fade_out),
        );
    }

    if config.pan != 0.0 {
        let (left, right) = pan_gains(config.pan);
        chain.push(Filter::new("pan").positional(format!(
            "stereo|c0={}*c0|c1={}*c1",
            fmt_num(left),
            fmt_num(right)
        )));
    }

    chain
}

/// Full graph node for one clip: trim the source window, reset
/// timestamps, retime the window to the clip's duration, apply the clip
/// chain and track gain, then delay the stream to `clip.start_time`.
pub fn compile_clip_audio(clip: &AudioClip, input: &str, output: &str, track_gain: f64) -> GraphNode {
    let mut chain = FilterChain::new();
    chain.push(
        Filter::new("atrim")
            .num("start", clip.source_start)
            .num("end", clip.source_end),
    );
    chain.push(Filter::new("asetpts").positional("PTS-STARTPTS"));
    chain.append(atempo_chain(clip.speed()));
    chain.append(compile_audio_filters(&clip.config, clip.duration));

    if track_gain != 1.0 {
        chain.push(Filter::new("volume").positional(fmt_num(track_gain.max(0.0))));
    }

    let delay_ms = (clip.start_time * 1000.0).round();
    if delay_ms > 0.0 {
        chain.push(
            Filter::new("adelay")
                .num("delays", delay_ms)
                .num("all", 1.0),
        );
    }

    GraphNode::new([input], chain, [output])
}

/// Mix several streams into one. Normalisation is off so per-track gains
/// survive the mix.
pub fn compile_mix(inputs: &[String], output: &str) -> Result<GraphNode> {
    match inputs.len() {
        0 => Err(CutlineError::Audio("no audio streams to mix".into())),
        1 => Ok(GraphNode::new(inputs, Filter::new("anull"), [output])),
        n => Ok(GraphNode::new(
            inputs,
            Filter::new("amix")
                .num("inputs", n as f64)
                .arg("duration", "longest")
                .num("normalize", 0.0),
            [output],
        )),
    }
}
