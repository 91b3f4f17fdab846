//! Interactive timeline state: playhead, view, drag gesture and selection.

use cutline_core::{pixels_to_time, time_to_pixels, TimeRange};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clip::TimelineClip;
use crate::ops::calculate_timeline_duration;
use crate::snapping::SnapConfig;
use crate::track::TimelineTrack;

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 10.0;
/// Multiplicative step for zoom in/out.
pub const ZOOM_STEP: f64 = 1.25;
/// Pixels per second at zoom 1.
pub const DEFAULT_PIXELS_PER_SECOND: f64 = 100.0;

/// Playback position and transport state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayheadState {
    pub current_time: f64,
    pub is_playing: bool,
    pub playback_rate: f64,
}

impl Default for PlayheadState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            is_playing: false,
            playback_rate: 1.0,
        }
    }
}

/// Horizontal zoom and scroll of the timeline view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineViewState {
    pub zoom: f64,
    /// Scroll offset in pixels.
    pub scroll_left: f64,
    pub base_pixels_per_second: f64,
}

impl Default for TimelineViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            scroll_left: 0.0,
            base_pixels_per_second: DEFAULT_PIXELS_PER_SECOND,
        }
    }
}

impl TimelineViewState {
    /// Content x position of a time, before scrolling.
    pub fn time_to_x(&self, time: f64) -> f64 {
        time_to_pixels(time, self.zoom, self.base_pixels_per_second)
    }

    /// Viewport x position of a time.
    pub fn time_to_screen_x(&self, time: f64) -> f64 {
        self.time_to_x(time) - self.scroll_left
    }

    /// Time under a viewport x position.
    pub fn screen_x_to_time(&self, x: f64) -> f64 {
        pixels_to_time(x + self.scroll_left, self.zoom, self.base_pixels_per_second)
    }

    /// Time range visible in a viewport of the given width.
    pub fn visible_range(&self, viewport_width: f64) -> TimeRange {
        let start = self.screen_x_to_time(0.0);
        let end = self.screen_x_to_time(viewport_width.max(0.0));
        TimeRange::from_start_end(start, end)
    }

    /// Change zoom while keeping the time under `anchor_x` fixed on screen.
    pub fn zoom_around(&mut self, anchor_x: f64, new_zoom: f64) {
        let anchor_time = self.screen_x_to_time(anchor_x);
        self.zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.scroll_left = (self.time_to_x(anchor_time) - anchor_x).max(0.0);
    }
}

/// Kind of drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragType {
    Move,
    TrimStart,
    TrimEnd,
}

/// An in-progress drag. `delta` is seconds relative to the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub clip_id: Uuid,
    pub drag_type: DragType,
    pub original_start: f64,
    pub original_duration: f64,
    pub delta: f64,
}

/// Everything the editing surface mutates through `TimelineAction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineState {
    pub tracks: Vec<TimelineTrack>,
    pub selected_clip_ids: Vec<Uuid>,
    pub selected_track_id: Option<Uuid>,
    pub playhead: PlayheadState,
    pub view: TimelineViewState,
    pub snap: SnapConfig,
    pub drag: Option<DragState>,
    /// Cached end of the last clip.
    pub duration: f64,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineState {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            selected_clip_ids: Vec::new(),
            selected_track_id: None,
            playhead: PlayheadState::default(),
            view: TimelineViewState::default(),
            snap: SnapConfig::default(),
            drag: None,
            duration: 0.0,
        }
    }

    /// Build state around existing tracks.
    pub fn with_tracks(tracks: Vec<TimelineTrack>) -> Self {
        let mut state = Self {
            tracks,
            ..Self::new()
        };
        state.recompute_duration();
        state
    }

    pub fn recompute_duration(&mut self) {
        self.duration = calculate_timeline_duration(&self.tracks);
    }

    pub fn find_track(&self, id: Uuid) -> Option<&TimelineTrack> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn find_track_mut(&mut self, id: Uuid) -> Option<&mut TimelineTrack> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    /// Locate a clip and its owning track.
    pub fn find_clip(&self, clip_id: Uuid) -> Option<(&TimelineTrack, &TimelineClip)> {
        self.tracks
            .iter()
            .find_map(|t| t.find_clip(clip_id).map(|c| (t, c)))
    }

    /// Track that owns a clip.
    pub fn track_of_clip_mut(&mut self, clip_id: Uuid) -> Option<&mut TimelineTrack> {
        self.tracks
            .iter_mut()
            .find(|t| t.find_clip(clip_id).is_some())
    }

    pub fn is_selected(&self, clip_id: Uuid) -> bool {
        self.selected_clip_ids.contains(&clip_id)
    }

    /// Selected clips, in track order.
    pub fn selected_clips(&self) -> Vec<&TimelineClip> {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .filter(|c| self.is_selected(c.id))
            .collect()
    }
}
