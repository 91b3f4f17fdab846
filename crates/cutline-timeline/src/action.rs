//! The closed set of timeline edits.
//!
//! Every interactive mutation is a `TimelineAction` applied to a
//! `TimelineState`. Actions that target something missing, or a clip on a
//! locked track, leave the state untouched.

use cutline_core::limits::MIN_CLIP_DURATION;
use tracing::debug;
use uuid::Uuid;

use crate::clip::TimelineClip;
use crate::ops::split_clip;
use crate::snapping::{snap_clip_move, snap_time, SnapConfig, SnapTargets};
use crate::state::{DragState, DragType, TimelineState, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::track::TimelineTrack;

/// Smallest lane height the editing surface can request.
pub const MIN_TRACK_HEIGHT: f32 = 24.0;

/// Partial update for a clip. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPatch {
    pub name: Option<String>,
    pub start_time: Option<f64>,
    pub duration: Option<f64>,
    pub source_start: Option<f64>,
    pub source_end: Option<f64>,
}

impl ClipPatch {
    fn apply_to(self, clip: &mut TimelineClip) {
        if let Some(name) = self.name {
            clip.name = name;
        }
        if let Some(v) = self.start_time {
            clip.start_time = v;
        }
        if let Some(v) = self.duration {
            clip.duration = v;
        }
        if let Some(v) = self.source_start {
            clip.source_start = v;
        }
        if let Some(v) = self.source_end {
            clip.source_end = v;
        }
    }
}

/// A timeline edit.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    AddTrack(TimelineTrack),
    RemoveTrack { track_id: Uuid },
    SetTrackMuted { track_id: Uuid, muted: bool },
    SetTrackLocked { track_id: Uuid, locked: bool },
    SetTrackVisible { track_id: Uuid, visible: bool },
    SetTrackHeight { track_id: Uuid, height: f32 },

    AddClip { track_id: Uuid, clip: TimelineClip },
    RemoveClip { clip_id: Uuid },
    /// Patched clips that fail validation are rejected.
    UpdateClip { clip_id: Uuid, patch: ClipPatch },
    /// Move a clip to `start_time` on `track_id` (which may be its own track).
    MoveClip {
        clip_id: Uuid,
        track_id: Uuid,
        start_time: f64,
    },

    /// `additive` toggles membership instead of replacing the selection.
    SelectClip { clip_id: Uuid, additive: bool },
    DeselectAll,
    SelectTrack { track_id: Option<Uuid> },

    SetPlayhead { time: f64 },
    Play,
    Pause,
    TogglePlayback,
    SetPlaybackRate { rate: f64 },

    SetZoom { zoom: f64 },
    ZoomIn,
    ZoomOut,
    SetScroll { scroll_left: f64 },
    SetSnapConfig(SnapConfig),
    ToggleSnap,

    StartDrag { clip_id: Uuid, drag_type: DragType },
    /// Raw delta in seconds; snapped before it is stored.
    UpdateDrag { delta: f64 },
    EndDrag,
    CancelDrag,

    SplitClip { clip_id: Uuid, time: f64 },
    SplitAtPlayhead,
    DeleteSelected,
}

impl TimelineAction {
    /// Apply this action to the state.
    pub fn apply(self, state: &mut TimelineState) {
        match self {
            Self::AddTrack(track) => state.tracks.push(track),
            Self::RemoveTrack { track_id } => remove_track(state, track_id),
            Self::SetTrackMuted { track_id, muted } => {
                if let Some(track) = state.find_track_mut(track_id) {
                    track.muted = muted;
                }
            }
            Self::SetTrackLocked { track_id, locked } => {
                if let Some(track) = state.find_track_mut(track_id) {
                    track.locked = locked;
                }
            }
            Self::SetTrackVisible { track_id, visible } => {
                if let Some(track) = state.find_track_mut(track_id) {
                    track.visible = visible;
                }
            }
            Self::SetTrackHeight { track_id, height } => {
                if let Some(track) = state.find_track_mut(track_id) {
                    track.height = height.max(MIN_TRACK_HEIGHT);
                }
            }

            Self::AddClip { track_id, clip } => {
                match state.find_track_mut(track_id) {
                    Some(track) if !track.locked => track.add_clip(clip),
                    Some(_) => debug!(%track_id, "add clip ignored: track is locked"),
                    None => debug!(%track_id, "add clip ignored: no such track"),
                }
                state.recompute_duration();
            }
            Self::RemoveClip { clip_id } => {
                if let Some(track) = unlocked_track_of_clip(state, clip_id) {
                    track.remove_clip(clip_id);
                    state.selected_clip_ids.retain(|id| *id != clip_id);
                    clear_drag_for(state, clip_id);
                    state.recompute_duration();
                }
            }
            Self::UpdateClip { clip_id, patch } => {
                if let Some(track) = unlocked_track_of_clip(state, clip_id) {
                    if let Some(clip) = track.find_clip_mut(clip_id) {
                        let before = clip.clone();
                        patch.apply_to(clip);
                        let errors = clip.validate();
                        if !errors.is_empty() {
                            debug!(%clip_id, ?errors, "clip update rejected");
                            *clip = before;
                        }
                    }
                    track.sort_clips();
                    state.recompute_duration();
                }
            }
            Self::MoveClip {
                clip_id,
                track_id,
                start_time,
            } => move_clip(state, clip_id, track_id, start_time),

            Self::SelectClip { clip_id, additive } => {
                if additive {
                    if let Some(pos) = state.selected_clip_ids.iter().position(|id| *id == clip_id) {
                        state.selected_clip_ids.remove(pos);
                    } else {
                        state.selected_clip_ids.push(clip_id);
                    }
                } else {
                    state.selected_clip_ids = vec![clip_id];
                }
            }
            Self::DeselectAll => state.selected_clip_ids.clear(),
            Self::SelectTrack { track_id } => state.selected_track_id = track_id,

            Self::SetPlayhead { time } => state.playhead.current_time = time.max(0.0),
            Self::Play => state.playhead.is_playing = true,
            Self::Pause => state.playhead.is_playing = false,
            Self::TogglePlayback => state.playhead.is_playing = !state.playhead.is_playing,
            Self::SetPlaybackRate { rate } => {
                if rate.is_finite() && rate > 0.0 {
                    state.playhead.playback_rate = rate;
                }
            }

            Self::SetZoom { zoom } => state.view.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            Self::ZoomIn => state.view.zoom = (state.view.zoom * ZOOM_STEP).min(MAX_ZOOM),
            Self::ZoomOut => state.view.zoom = (state.view.zoom / ZOOM_STEP).max(MIN_ZOOM),
            Self::SetScroll { scroll_left } => state.view.scroll_left = scroll_left.max(0.0),
            Self::SetSnapConfig(config) => state.snap = config,
            Self::ToggleSnap => state.snap.enabled = !state.snap.enabled,

            Self::StartDrag { clip_id, drag_type } => start_drag(state, clip_id, drag_type),
            Self::UpdateDrag { delta } => update_drag(state, delta),
            Self::EndDrag => end_drag(state),
            Self::CancelDrag => state.drag = None,

            Self::SplitClip { clip_id, time } => {
                if split_in_place(state, clip_id, time).is_some() {
                    state.selected_clip_ids.retain(|id| *id != clip_id);
                }
            }
            Self::SplitAtPlayhead => split_at_playhead(state),
            Self::DeleteSelected => delete_selected(state),
        }
    }
}

fn unlocked_track_of_clip(state: &mut TimelineState, clip_id: Uuid) -> Option<&mut TimelineTrack> {
    let track = state.track_of_clip_mut(clip_id)?;
    if track.locked {
        debug!(%clip_id, "clip edit ignored: track is locked");
        return None;
    }
    Some(track)
}

fn clear_drag_for(state: &mut TimelineState, clip_id: Uuid) {
    if state.drag.as_ref().is_some_and(|d| d.clip_id == clip_id) {
        state.drag = None;
    }
}

fn remove_track(state: &mut TimelineState, track_id: Uuid) {
    let Some(index) = state.tracks.iter().position(|t| t.id == track_id) else {
        return;
    };
    let track = state.tracks.remove(index);
    state
        .selected_clip_ids
        .retain(|id| track.find_clip(*id).is_none());
    if state.selected_track_id == Some(track_id) {
        state.selected_track_id = None;
    }
    if let Some(drag) = &state.drag {
        if track.find_clip(drag.clip_id).is_some() {
            state.drag = None;
        }
    }
    state.recompute_duration();
}

fn move_clip(state: &mut TimelineState, clip_id: Uuid, track_id: Uuid, start_time: f64) {
    match state.find_track(track_id) {
        Some(track) if track.locked => {
            debug!(%track_id, "move ignored: destination track is locked");
            return;
        }
        Some(_) => {}
        None => {
            debug!(%track_id, "move ignored: no such track");
            return;
        }
    }
    let Some(source) = unlocked_track_of_clip(state, clip_id) else {
        return;
    };
    let Some(mut clip) = source.remove_clip(clip_id) else {
        return;
    };
    clip.start_time = start_time.max(0.0);
    if let Some(dest) = state.find_track_mut(track_id) {
        dest.add_clip(clip);
    }
    state.recompute_duration();
}

fn start_drag(state: &mut TimelineState, clip_id: Uuid, drag_type: DragType) {
    let Some((track, clip)) = state.find_clip(clip_id) else {
        return;
    };
    if track.locked {
        debug!(%clip_id, "drag ignored: track is locked");
        return;
    }
    let (original_start, original_duration) = (clip.start_time, clip.duration);
    state.drag = Some(DragState {
        clip_id,
        drag_type,
        original_start,
        original_duration,
        delta: 0.0,
    });
}

fn update_drag(state: &mut TimelineState, delta: f64) {
    let Some(drag) = &state.drag else {
        return;
    };
    let targets = SnapTargets::collect(
        &state.tracks,
        state.playhead.current_time,
        Some(drag.clip_id),
    );
    let base = state.view.base_pixels_per_second;

    let snapped_delta = match drag.drag_type {
        DragType::Move => {
            let start = drag.original_start + delta;
            let snapped = snap_clip_move(start, drag.original_duration, &state.snap, &targets, base);
            snapped.time - drag.original_start
        }
        DragType::TrimStart => {
            let edge = drag.original_start + delta;
            snap_time(edge, &state.snap, &targets, base).time - drag.original_start
        }
        DragType::TrimEnd => {
            let end = drag.original_start + drag.original_duration;
            snap_time(end + delta, &state.snap, &targets, base).time - end
        }
    };

    if let Some(drag) = state.drag.as_mut() {
        drag.delta = snapped_delta;
    }
}

fn end_drag(state: &mut TimelineState) {
    let Some(drag) = state.drag.take() else {
        return;
    };
    let Some(track) = unlocked_track_of_clip(state, drag.clip_id) else {
        return;
    };
    let Some(clip) = track.find_clip_mut(drag.clip_id) else {
        return;
    };

    match drag.drag_type {
        DragType::Move => {
            clip.start_time = (drag.original_start + drag.delta).max(0.0);
        }
        DragType::TrimStart => {
            let speed = clip.speed();
            let mut min_delta = -clip.start_time;
            if speed > 0.0 {
                min_delta = min_delta.max(-clip.source_start / speed);
            }
            let max_delta = clip.duration - MIN_CLIP_DURATION;
            let delta = drag.delta.min(max_delta).max(min_delta);
            if !clip.trim_start(delta) {
                debug!(clip_id = %drag.clip_id, delta, "trim start rejected");
            }
        }
        DragType::TrimEnd => {
            let delta = drag.delta.max(MIN_CLIP_DURATION - clip.duration);
            if !clip.trim_end(delta) {
                debug!(clip_id = %drag.clip_id, delta, "trim end rejected");
            }
        }
    }
    track.sort_clips();
    state.recompute_duration();
}

/// Split one clip in place. Returns the right half's id.
fn split_in_place(state: &mut TimelineState, clip_id: Uuid, time: f64) -> Option<Uuid> {
    let track = unlocked_track_of_clip(state, clip_id)?;
    let index = track.clips.iter().position(|c| c.id == clip_id)?;
    let (left, right) = split_clip(&track.clips[index], time)?;
    let right_id = right.id;
    track.clips[index] = left;
    track.clips.insert(index + 1, right);
    clear_drag_for(state, clip_id);
    Some(right_id)
}

fn split_at_playhead(state: &mut TimelineState) {
    let time = state.playhead.current_time;
    let has_selection = !state.selected_clip_ids.is_empty();

    let candidates: Vec<Uuid> = state
        .tracks
        .iter()
        .filter(|t| !t.locked)
        .flat_map(|t| t.clips.iter())
        .filter(|c| c.contains(time))
        .filter(|c| !has_selection || state.is_selected(c.id))
        .map(|c| c.id)
        .collect();

    let right_halves: Vec<Uuid> = candidates
        .into_iter()
        .filter_map(|id| split_in_place(state, id, time))
        .collect();

    if right_halves.is_empty() {
        debug!(time, "split at playhead: nothing to split");
        return;
    }
    state.selected_clip_ids = right_halves;
}

fn delete_selected(state: &mut TimelineState) {
    if state.selected_clip_ids.is_empty() {
        return;
    }
    let mut deleted = Vec::new();
    for track in state.tracks.iter_mut().filter(|t| !t.locked) {
        track.clips.retain(|c| {
            let selected = state.selected_clip_ids.contains(&c.id);
            if selected {
                deleted.push(c.id);
            }
            !selected
        });
    }
    state.selected_clip_ids.retain(|id| !deleted.contains(id));
    if let Some(drag) = &state.drag {
        if deleted.contains(&drag.clip_id) {
            state.drag = None;
        }
    }
    state.recompute_duration();
}
