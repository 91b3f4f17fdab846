//! Integration tests for the timeline reducer driving snapping and edits.

use cutline_timeline::{
    DragType, SnapConfig, TimelineAction, TimelineClip, TimelineState, TimelineTrack,
};
use uuid::Uuid;

fn two_clip_state() -> (TimelineState, Uuid, Uuid, Uuid) {
    let mut track = TimelineTrack::new_video("V1");
    let a = TimelineClip::new(track.id, "a.mp4", 0.0, 5.0);
    let b = TimelineClip::new(track.id, "b.mp4", 10.0, 5.0);
    let (track_id, a_id, b_id) = (track.id, a.id, b.id);
    track.add_clip(a);
    track.add_clip(b);
    (TimelineState::with_tracks(vec![track]), track_id, a_id, b_id)
}

#[test]
fn drag_move_snaps_to_neighbouring_edge() {
    let (mut state, _, _, b) = two_clip_state();
    TimelineAction::SetSnapConfig(SnapConfig {
        to_grid: false,
        ..SnapConfig::default()
    })
    .apply(&mut state);
    TimelineAction::SetPlayhead { time: 100.0 }.apply(&mut state);

    TimelineAction::StartDrag {
        clip_id: b,
        drag_type: DragType::Move,
    }
    .apply(&mut state);
    // Leading edge lands at 5.05, 0.05 s from clip A's end (threshold 0.1 s).
    TimelineAction::UpdateDrag { delta: -4.95 }.apply(&mut state);
    TimelineAction::EndDrag.apply(&mut state);

    let (_, clip) = state.find_clip(b).unwrap();
    assert_eq!(clip.start_time, 5.0);
    assert!(state.drag.is_none());
}

#[test]
fn split_at_playhead_then_delete_right_half() {
    let (mut state, track_id, a, _) = two_clip_state();
    TimelineAction::SetPlayhead { time: 2.0 }.apply(&mut state);
    TimelineAction::SplitAtPlayhead.apply(&mut state);

    let track = state.find_track(track_id).unwrap();
    assert_eq!(track.clips.len(), 3);
    assert!(track.find_clip(a).is_none());
    assert_eq!(state.selected_clip_ids.len(), 1);

    TimelineAction::DeleteSelected.apply(&mut state);
    let track = state.find_track(track_id).unwrap();
    assert_eq!(track.clips.len(), 2);
    assert_eq!(track.clips[0].duration, 2.0);
    assert_eq!(state.duration, 15.0);
}

#[test]
fn locked_track_rejects_edits() {
    let (mut state, track_id, a, _) = two_clip_state();
    TimelineAction::SetTrackLocked {
        track_id,
        locked: true,
    }
    .apply(&mut state);
    let before = state.clone();

    TimelineAction::RemoveClip { clip_id: a }.apply(&mut state);
    TimelineAction::MoveClip {
        clip_id: a,
        track_id,
        start_time: 20.0,
    }
    .apply(&mut state);
    TimelineAction::SplitClip { clip_id: a, time: 1.0 }.apply(&mut state);

    assert_eq!(state.tracks, before.tracks);
}

#[test]
fn move_between_tracks_reparents_clip() {
    let (mut state, _, a, _) = two_clip_state();
    let other = TimelineTrack::new_video("V2");
    let other_id = other.id;
    TimelineAction::AddTrack(other).apply(&mut state);
    TimelineAction::MoveClip {
        clip_id: a,
        track_id: other_id,
        start_time: 30.0,
    }
    .apply(&mut state);

    let (track, clip) = state.find_clip(a).unwrap();
    assert_eq!(track.id, other_id);
    assert_eq!(clip.track_id, other_id);
    assert_eq!(state.duration, 35.0);
}

#[test]
fn zoom_is_clamped() {
    let mut state = TimelineState::new();
    for _ in 0..50 {
        TimelineAction::ZoomIn.apply(&mut state);
    }
    assert_eq!(state.view.zoom, 10.0);
    TimelineAction::SetZoom { zoom: 0.0 }.apply(&mut state);
    assert_eq!(state.view.zoom, 0.1);
}
