//! Compile a whole project into one filter graph.
//!
//! Stream layout:
//! - `[i:v]` per video clip, normalised to the project canvas, labelled `cN`
//! - transitions join the normalised clips into `[vbase]`
//! - text overlays are drawn onto `[vbase]`, giving `[vout]`
//! - audio clips become `acN`, mixed into `[aout]`

use cutline_audio::{compile_clip_audio, compile_mix, effective_volume, AudioClip};
use cutline_core::{fmt_num, CutlineError, Filter, FilterChain, FilterGraph, GraphNode, Result};
use cutline_effects::{compile_effect_chain, compile_transition_chain, Transition};
use cutline_text::{compile_text_chain, TextOverlay};
use cutline_timeline::{TimelineClip, TimelineTrack, TrackKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::project::{Project, ProjectSettings};
use crate::timing::OutputTimeline;

pub const VIDEO_OUTPUT: &str = "vout";
pub const AUDIO_OUTPUT: &str = "aout";
const VIDEO_BASE: &str = "vbase";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
}

/// One `-i` input of the render, in index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderInput {
    pub clip_id: Uuid,
    pub media_id: String,
    pub kind: StreamKind,
}

/// Everything the renderer needs, detached from the project.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub inputs: Vec<RenderInput>,
    pub graph: FilterGraph,
    pub video_output: String,
    /// `None` when no audio reaches the mix.
    pub audio_output: Option<String>,
    /// Seconds, after transition overlaps.
    pub duration: f64,
    /// Where timeline instants land in the output.
    pub timeline: OutputTimeline,
    pub settings: ProjectSettings,
}

impl RenderPlan {
    /// The graph as a `-filter_complex` argument.
    pub fn filter_complex(&self) -> String {
        self.graph.to_string()
    }
}

/// Gaps shorter than this are treated as touching clips.
const MIN_GAP: f64 = 1e-6;

/// Presentation timestamps for a clip whose source window plays over its
/// timeline duration.
fn retime_expr(clip: &TimelineClip) -> String {
    let source = clip.source_duration();
    if source <= 0.0 || (source - clip.duration).abs() < 1e-9 {
        "PTS-STARTPTS".to_string()
    } else {
        format!("(PTS-STARTPTS)*{}/{}", fmt_num(clip.duration), fmt_num(source))
    }
}

/// Trim the source window, fit it to the clip's duration and conform it
/// to the canvas.
fn normalise_clip(clip: &TimelineClip, settings: &ProjectSettings) -> FilterChain {
    let mut chain = FilterChain::new();
    chain.push(
        Filter::new("trim")
            .num("start", clip.source_start)
            .num("end", clip.source_end),
    );
    chain.push(Filter::new("setpts").positional(retime_expr(clip)));
    chain.push(
        Filter::new("scale")
            .num("w", f64::from(settings.width))
            .num("h", f64::from(settings.height))
            .arg("force_original_aspect_ratio", "decrease"),
    );
    chain.push(
        Filter::new("pad")
            .num("w", f64::from(settings.width))
            .num("h", f64::from(settings.height))
            .arg("x", "(ow-iw)/2")
            .arg("y", "(oh-ih)/2"),
    );
    chain.push(Filter::new("setsar").positional("1"));
    chain.push(Filter::new("fps").arg("fps", settings.frame_rate.to_ffmpeg()));
    chain
}

/// Black frames standing in for a gap on the picture track.
fn black_filler(duration: f64, settings: &ProjectSettings) -> FilterChain {
    let mut chain = FilterChain::new();
    chain.push(
        Filter::new("color")
            .arg("c", "black")
            .arg("s", format!("{}x{}", settings.width, settings.height))
            .arg("r", settings.frame_rate.to_ffmpeg())
            .num("d", duration),
    );
    chain.push(Filter::new("setsar").positional("1"));
    chain
}

/// The overlay moved onto the output clock, or `None` when a crossfade
/// swallows it entirely.
fn retime_overlay(overlay: &TextOverlay, timeline: &OutputTimeline) -> Option<TextOverlay> {
    let start = timeline.map(overlay.start_time);
    let end = timeline.map(overlay.end_time());
    if end - start <= 0.0 {
        debug!(overlay = %overlay.id, "overlay collapsed by a crossfade");
        return None;
    }
    Some(TextOverlay {
        start_time: start,
        duration: end - start,
        ..overlay.clone()
    })
}

/// The first visible video track with clips carries the picture.
fn main_video_track(project: &Project) -> Result<&TimelineTrack> {
    project
        .tracks
        .iter()
        .find(|t| t.kind == TrackKind::Video && t.visible && !t.clips.is_empty())
        .ok_or_else(|| CutlineError::Timeline("no visible video track with clips".into()))
}

/// Gain for an audio track, falling back to master rules for tracks the
/// mixer has never seen.
fn track_gain(project: &Project, track: &TimelineTrack) -> f64 {
    let mixer = &project.mixer;
    if mixer.track(track.id).is_some() {
        effective_volume(mixer, track.id)
    } else if mixer.master_muted || mixer.any_solo() {
        0.0
    } else {
        mixer.master_volume
    }
}

fn text_overlays(project: &Project) -> Vec<&TextOverlay> {
    project
        .text_overlays
        .iter()
        .filter(|o| match project.find_track(o.track_id) {
            Some(track) => track.visible,
            None => {
                debug!(overlay = %o.id, "overlay on unknown track skipped");
                false
            }
        })
        .collect()
}

/// Compile the project into a render plan.
pub fn compile_render_plan(project: &Project) -> Result<RenderPlan> {
    let settings = project.settings;
    let video_track = main_video_track(project)?;
    let mut inputs = Vec::new();
    let mut graph = FilterGraph::new();

    let transitions: Vec<Transition> = project
        .transitions
        .iter()
        .filter(|t| {
            video_track.find_clip(t.from_clip_id).is_some()
                && video_track.find_clip(t.to_clip_id).is_some()
        })
        .cloned()
        .collect();

    // Picture segments in order: one input per clip, black filler for
    // every gap a transition does not bridge.
    let mut sequence: Vec<TimelineClip> = Vec::with_capacity(video_track.clips.len());
    let mut labels = Vec::with_capacity(video_track.clips.len());
    let mut cursor = 0.0_f64;
    let mut previous: Option<Uuid> = None;
    for clip in &video_track.clips {
        let gap = clip.start_time - cursor;
        let bridged = previous.is_some_and(|from| {
            transitions
                .iter()
                .any(|t| t.from_clip_id == from && t.to_clip_id == clip.id)
        });
        if gap > MIN_GAP && !bridged {
            let label = format!("g{}", sequence.len() - inputs.len());
            graph.push(GraphNode::new(
                Vec::<String>::new(),
                black_filler(gap, &settings),
                [label.as_str()],
            ));
            debug!(start = %fmt_num(cursor), duration = %fmt_num(gap), "gap filled with black");
            sequence.push(TimelineClip::new(video_track.id, "", cursor, gap));
            labels.push(label);
        }

        let index = inputs.len();
        inputs.push(RenderInput {
            clip_id: clip.id,
            media_id: clip.media_id.clone(),
            kind: StreamKind::Video,
        });
        let mut chain = normalise_clip(clip, &settings);
        chain.append(compile_effect_chain(project.effects.effects_for(clip.id)));
        let label = format!("c{index}");
        graph.push(GraphNode::new([format!("{index}:v")], chain, [label.as_str()]));
        sequence.push(clip.clone());
        labels.push(label);

        cursor = cursor.max(clip.end_time());
        previous = Some(clip.id);
    }

    let joined = compile_transition_chain(&sequence, &transitions, &labels, VIDEO_BASE)
        .map_err(|e| {
            warn!(error = %e, "transition graph rejected");
            e
        })?;
    graph.extend(joined.graph);

    // Each crossfade shortens the output, so later text and audio move
    // with the picture.
    let mut timeline = OutputTimeline::new();
    let mut output_start = 0.0;
    timeline.push(sequence[0].start_time, output_start);
    for (i, offset) in joined.offsets.iter().enumerate() {
        output_start = offset.unwrap_or(output_start + sequence[i].duration);
        timeline.push(sequence[i + 1].start_time, output_start);
    }

    let overlays: Vec<TextOverlay> = text_overlays(project)
        .into_iter()
        .filter_map(|o| retime_overlay(o, &timeline))
        .collect();
    let text_chain = compile_text_chain(&overlays, settings.width, settings.height);
    graph.push(GraphNode::new(
        [VIDEO_BASE],
        text_chain.or_passthrough("null"),
        [VIDEO_OUTPUT],
    ));

    // Audio clips from unmuted audio tracks that are audible in the mix.
    let mut audio_labels = Vec::new();
    for track in project
        .tracks
        .iter()
        .filter(|t| t.kind == TrackKind::Audio && !t.muted)
    {
        let gain = track_gain(project, track);
        if gain <= 0.0 {
            debug!(track = %track.id, "silent audio track skipped");
            continue;
        }
        for clip in &track.clips {
            let index = inputs.len();
            inputs.push(RenderInput {
                clip_id: clip.id,
                media_id: clip.media_id.clone(),
                kind: StreamKind::Audio,
            });
            let config = project.audio.get(&clip.id).copied().unwrap_or_default();
            let mut audio = AudioClip::from_clip(clip, config);
            audio.start_time = timeline.map(clip.start_time);
            let label = format!("ac{}", audio_labels.len());
            graph.push(compile_clip_audio(
                &audio,
                &format!("{index}:a"),
                &label,
                gain,
            ));
            audio_labels.push(label);
        }
    }

    let audio_output = if audio_labels.is_empty() {
        None
    } else {
        graph.push(compile_mix(&audio_labels, AUDIO_OUTPUT)?);
        Some(AUDIO_OUTPUT.to_string())
    };

    if let Err(message) = graph.check_labels() {
        warn!(%message, "render graph is malformed");
        return Err(CutlineError::InvalidState(message));
    }

    debug!(
        inputs = inputs.len(),
        nodes = graph.nodes().len(),
        "render plan compiled"
    );

    Ok(RenderPlan {
        inputs,
        graph,
        video_output: VIDEO_OUTPUT.to_string(),
        audio_output,
        duration: joined.duration,
        timeline,
        settings,
    })
}
