//! Cutline Timeline - Timeline data model
//!
//! Implements the editable timeline:
//! - Tracks containing non-overlapping clips
//! - Playhead, view (zoom/scroll), selection and drag state
//! - Snap resolution against playhead, clip edges and grid
//! - Clip algorithms (edges, overlap, gap search, split)
//! - A closed `TimelineAction` vocabulary applied to `TimelineState`

pub mod action;
pub mod clip;
pub mod ops;
pub mod snapping;
pub mod state;
pub mod track;

pub use action::{ClipPatch, TimelineAction};
pub use clip::TimelineClip;
pub use ops::{
    calculate_timeline_duration, clip_at_time, clips_in_range, detect_overlap,
    detect_overlap_range, find_nearest_gap, get_clip_edges, split_clip,
};
pub use snapping::{snap_clip_move, snap_time, SnapConfig, SnapResult, SnapTarget, SnapTargets};
pub use state::{DragState, DragType, PlayheadState, TimelineState, TimelineViewState};
pub use track::{TimelineTrack, TrackKind};
