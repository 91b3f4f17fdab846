//! Transition graph construction.
//!
//! A list of clips in playback order becomes a left fold of pairwise nodes:
//! each node merges the stream built so far with the next clip. Crossfades
//! overlap the two by the transition duration; cuts concatenate. The xfade
//! offset is always "length of the stream so far minus the overlap".

use std::collections::HashMap;

use cutline_core::{fmt_num, CutlineError, Filter, FilterGraph, GraphNode, Result};
use cutline_timeline::TimelineClip;
use tracing::debug;
use uuid::Uuid;

use crate::transition::{validate_transition_duration, Transition, TransitionType};

/// A compiled transition graph.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionGraph {
    pub graph: FilterGraph,
    /// Label of the final stream.
    pub output: String,
    /// Length of the final stream in seconds.
    pub duration: f64,
    /// Start of each crossfade on the output timeline, one per joint
    /// (`None` for cuts).
    pub offsets: Vec<Option<f64>>,
}

fn xfade_filter(transition_type: TransitionType, duration: f64, offset: f64) -> Filter {
    let name = transition_type.config().xfade.unwrap_or("fade");
    Filter::new("xfade")
        .arg("transition", name)
        .num("duration", duration)
        .num("offset", offset)
}

fn concat_filter(video: bool) -> Filter {
    Filter::new("concat")
        .num("n", 2.0)
        .num("v", if video { 1.0 } else { 0.0 })
        .num("a", if video { 0.0 } else { 1.0 })
}

/// Compile a single transition between two inputs.
///
/// The crossfade starts `duration` before the end of `from_clip`. A cut
/// compiles to a two-input concat.
pub fn compile_transition_pair(
    transition: &Transition,
    from_clip: &TimelineClip,
    input_a: &str,
    input_b: &str,
    output: &str,
) -> GraphNode {
    let filter = if transition.transition_type.is_cut() {
        concat_filter(true)
    } else {
        let duration = transition.duration_secs();
        xfade_filter(
            transition.transition_type,
            duration,
            (from_clip.duration - duration).max(0.0),
        )
    };
    GraphNode::new([input_a, input_b], filter, [output])
}

/// Transition at each joint `i` (between clip `i` and `i + 1`), after
/// checking the structural rules.
fn joints<'a>(
    clips: &[TimelineClip],
    transitions: &'a [Transition],
) -> Result<Vec<Option<&'a Transition>>> {
    let index: HashMap<Uuid, usize> = clips.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
    let mut joints: Vec<Option<&Transition>> = vec![None; clips.len().saturating_sub(1)];
    let mut incoming = vec![false; clips.len()];

    for t in transitions {
        let (Some(&from), Some(&to)) = (index.get(&t.from_clip_id), index.get(&t.to_clip_id)) else {
            return Err(CutlineError::Transition(format!(
                "transition {} references a clip outside the sequence",
                t.id
            )));
        };
        if to != from + 1 {
            return Err(CutlineError::Transition(format!(
                "transition {} must join adjacent clips",
                t.id
            )));
        }
        if joints[from].is_some() {
            return Err(CutlineError::Transition(format!(
                "clip {} has more than one outgoing transition",
                t.from_clip_id
            )));
        }
        if incoming[to] {
            return Err(CutlineError::Transition(format!(
                "clip {} has more than one incoming transition",
                t.to_clip_id
            )));
        }
        incoming[to] = true;
        joints[from] = Some(t);
    }

    for (i, joint) in joints.iter().enumerate() {
        let Some(t) = joint else { continue };
        let validity = validate_transition_duration(
            t.transition_type,
            t.duration_ms,
            clips[i].duration,
            clips[i + 1].duration,
        );
        if let Some(message) = validity.message {
            return Err(CutlineError::Transition(message));
        }
    }

    // A clip's incoming and outgoing overlaps must fit inside it.
    for i in 1..clips.len().saturating_sub(1) {
        let overlap_in = joints[i - 1].map_or(0.0, Transition::duration_secs);
        let overlap_out = joints[i].map_or(0.0, Transition::duration_secs);
        if overlap_in + overlap_out > clips[i].duration + 1e-9 {
            return Err(CutlineError::Transition(format!(
                "clip {} is shorter than its incoming and outgoing transitions combined",
                clips[i].id
            )));
        }
    }

    Ok(joints)
}

/// Compile a multi-clip video transition graph.
///
/// `inputs[i]` is the stream label for `clips[i]`. Intermediate streams are
/// labelled `v0`, `v1`, ...; the last node writes `output`. A single clip
/// compiles to a `null` passthrough.
pub fn compile_transition_chain(
    clips: &[TimelineClip],
    transitions: &[Transition],
    inputs: &[String],
    output: &str,
) -> Result<TransitionGraph> {
    build_chain(clips, transitions, inputs, output, Medium::Video)
}

/// Audio counterpart of [`compile_transition_chain`]: crossfades become
/// `acrossfade`, cuts become audio concats and intermediate labels are
/// `a0`, `a1`, ...
pub fn compile_audio_crossfade_chain(
    clips: &[TimelineClip],
    transitions: &[Transition],
    inputs: &[String],
    output: &str,
) -> Result<TransitionGraph> {
    build_chain(clips, transitions, inputs, output, Medium::Audio)
}

#[derive(Clone, Copy)]
enum Medium {
    Video,
    Audio,
}

fn build_chain(
    clips: &[TimelineClip],
    transitions: &[Transition],
    inputs: &[String],
    output: &str,
    medium: Medium,
) -> Result<TransitionGraph> {
    if clips.is_empty() {
        return Err(CutlineError::Transition("no clips to join".into()));
    }
    if inputs.len() != clips.len() {
        return Err(CutlineError::InvalidParameter(format!(
            "expected {} input labels, got {}",
            clips.len(),
            inputs.len()
        )));
    }

    let joints = joints(clips, transitions)?;
    let mut graph = FilterGraph::new();

    if clips.len() == 1 {
        let passthrough = match medium {
            Medium::Video => "null",
            Medium::Audio => "anull",
        };
        graph.push(GraphNode::new([&inputs[0]], Filter::new(passthrough), [output]));
        return Ok(TransitionGraph {
            graph,
            output: output.to_string(),
            duration: clips[0].duration,
            offsets: Vec::new(),
        });
    }

    let prefix = match medium {
        Medium::Video => "v",
        Medium::Audio => "a",
    };
    let mut previous = inputs[0].clone();
    let mut length = clips[0].duration;
    let mut offsets = Vec::with_capacity(joints.len());

    for (i, joint) in joints.iter().enumerate() {
        let next = &clips[i + 1];
        let label = if i + 1 == joints.len() {
            output.to_string()
        } else {
            format!("{prefix}{i}")
        };

        let filter = match joint.filter(|t| !t.transition_type.is_cut()) {
            Some(t) => {
                let overlap = t.duration_secs();
                let offset = length - overlap;
                offsets.push(Some(offset));
                length = offset + next.duration;
                match medium {
                    Medium::Video => xfade_filter(t.transition_type, overlap, offset),
                    Medium::Audio => Filter::new("acrossfade")
                        .num("d", overlap)
                        .arg("c1", "tri")
                        .arg("c2", "tri"),
                }
            }
            None => {
                debug!(joint = i, "hard cut");
                offsets.push(None);
                length += next.duration;
                concat_filter(matches!(medium, Medium::Video))
            }
        };

        graph.push(GraphNode::new([previous.as_str(), inputs[i + 1].as_str()], filter, [label.as_str()]));
        previous = label;
    }

    debug!(
        clips = clips.len(),
        duration = %fmt_num(length),
        "compiled transition chain"
    );
    Ok(TransitionGraph {
        graph,
        output: output.to_string(),
        duration: length,
        offsets,
    })
}
