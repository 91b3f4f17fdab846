//! Snap resolver for timeline interactions.
//!
//! Candidates are checked in a fixed priority order: playhead, clip edges
//! (ascending index), then the grid. A candidate only wins if it is strictly
//! closer than the threshold and than every earlier candidate, so the
//! playhead wins ties.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::ops::get_clip_edges;
use crate::track::TimelineTrack;

/// Snapping configuration owned by the editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapConfig {
    pub enabled: bool,
    pub to_playhead: bool,
    pub to_clips: bool,
    pub to_grid: bool,
    /// Grid interval in seconds (0 = no grid).
    pub grid_size: f64,
    /// Snap distance in pixels at zoom 1.
    pub threshold_px: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            to_playhead: true,
            to_clips: true,
            to_grid: true,
            grid_size: 1.0,
            threshold_px: 10.0,
        }
    }
}

/// What a time snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    Playhead,
    /// Index into `SnapTargets::clip_edges`.
    ClipEdge(usize),
    Grid,
}

impl fmt::Display for SnapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapTarget::Playhead => f.write_str("playhead"),
            SnapTarget::ClipEdge(i) => write!(f, "clip-edge-{i}"),
            SnapTarget::Grid => f.write_str("grid"),
        }
    }
}

/// Points a time can snap to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapTargets {
    pub playhead: Option<f64>,
    pub clip_edges: Vec<f64>,
}

impl SnapTargets {
    /// Collect the playhead and every clip edge, excluding the dragged clip.
    pub fn collect(tracks: &[TimelineTrack], playhead: f64, exclude_clip: Option<Uuid>) -> Self {
        Self {
            playhead: Some(playhead),
            clip_edges: get_clip_edges(tracks, exclude_clip),
        }
    }
}

/// Result of a snap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub time: f64,
    pub snapped_to: Option<SnapTarget>,
}

impl SnapResult {
    fn unsnapped(time: f64) -> Self {
        Self {
            time,
            snapped_to: None,
        }
    }

    /// Label for the editing surface (`"playhead"`, `"clip-edge-3"`, `"grid"`).
    pub fn label(&self) -> Option<String> {
        self.snapped_to.map(|t| t.to_string())
    }
}

/// Resolve a candidate time against the snap targets.
///
/// The pixel threshold is converted to seconds at zoom 1, so snapping
/// sensitivity does not change with zoom.
pub fn snap_time(
    time: f64,
    config: &SnapConfig,
    targets: &SnapTargets,
    base_pixels_per_second: f64,
) -> SnapResult {
    if !config.enabled || base_pixels_per_second <= 0.0 {
        return SnapResult::unsnapped(time);
    }

    let threshold = config.threshold_px / base_pixels_per_second;
    let mut best_distance = threshold;
    let mut result = SnapResult::unsnapped(time);

    let mut consider = |candidate: f64, target: SnapTarget| {
        let distance = (candidate - time).abs();
        if distance < best_distance {
            best_distance = distance;
            result = SnapResult {
                time: candidate,
                snapped_to: Some(target),
            };
        }
    };

    if config.to_playhead {
        if let Some(playhead) = targets.playhead {
            consider(playhead, SnapTarget::Playhead);
        }
    }

    if config.to_clips {
        for (i, &edge) in targets.clip_edges.iter().enumerate() {
            consider(edge, SnapTarget::ClipEdge(i));
        }
    }

    if config.to_grid && config.grid_size > 0.0 {
        let grid = (time / config.grid_size).round() * config.grid_size;
        consider(grid, SnapTarget::Grid);
    }

    result
}

/// Snap a moving clip: try its leading edge first, then its trailing edge.
/// Returns the adjusted start time and what it snapped to.
pub fn snap_clip_move(
    start: f64,
    duration: f64,
    config: &SnapConfig,
    targets: &SnapTargets,
    base_pixels_per_second: f64,
) -> SnapResult {
    let leading = snap_time(start, config, targets, base_pixels_per_second);
    if leading.snapped_to.is_some() {
        return leading;
    }

    let trailing = snap_time(start + duration, config, targets, base_pixels_per_second);
    match trailing.snapped_to {
        Some(target) => SnapResult {
            time: trailing.time - duration,
            snapped_to: Some(target),
        },
        None => SnapResult::unsnapped(start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Threshold of 0.1 s at the default 100 px/s base rate.
    fn config() -> SnapConfig {
        SnapConfig {
            grid_size: 0.0,
            to_grid: false,
            ..SnapConfig::default()
        }
    }

    const BASE: f64 = 100.0;

    #[test]
    fn test_disabled_returns_input() {
        let cfg = SnapConfig {
            enabled: false,
            ..config()
        };
        let targets = SnapTargets {
            playhead: Some(10.0),
            clip_edges: vec![],
        };
        let result = snap_time(10.01, &cfg, &targets, BASE);
        assert_eq!(result.time, 10.01);
        assert!(result.label().is_none());
    }

    #[test]
    fn test_strictly_nearer_target_wins() {
        let targets = SnapTargets {
            playhead: Some(10.0),
            clip_edges: vec![10.05],
        };
        let result = snap_time(10.04, &config(), &targets, BASE);
        assert_eq!(result.time, 10.05);
        assert_eq!(result.label().as_deref(), Some("clip-edge-0"));
    }

    #[test]
    fn test_playhead_wins_ties() {
        let targets = SnapTargets {
            playhead: Some(5.0),
            clip_edges: vec![5.0],
        };
        let result = snap_time(5.02, &config(), &targets, BASE);
        assert_eq!(result.snapped_to, Some(SnapTarget::Playhead));
    }

    #[test]
    fn test_outside_threshold() {
        let targets = SnapTargets {
            playhead: Some(10.0),
            clip_edges: vec![20.0],
        };
        let result = snap_time(10.5, &config(), &targets, BASE);
        assert_eq!(result.time, 10.5);
        assert!(result.snapped_to.is_none());
    }

    #[test]
    fn test_grid_snapping() {
        let cfg = SnapConfig {
            grid_size: 0.5,
            ..SnapConfig::default()
        };
        let result = snap_time(2.46, &cfg, &SnapTargets::default(), BASE);
        assert_eq!(result.time, 2.5);
        assert_eq!(result.label().as_deref(), Some("grid"));
    }

    #[test]
    fn test_threshold_ignores_zoom() {
        // 10 px at 50 px/s = 0.2 s regardless of the view zoom.
        let targets = SnapTargets {
            playhead: Some(3.0),
            clip_edges: vec![],
        };
        let result = snap_time(3.15, &config(), &targets, 50.0);
        assert_eq!(result.time, 3.0);
    }

    #[test]
    fn test_snap_clip_move_trailing_edge() {
        let targets = SnapTargets {
            playhead: None,
            clip_edges: vec![8.0],
        };
        let result = snap_clip_move(4.97, 3.0, &config(), &targets, BASE);
        assert!((result.time - 5.0).abs() < 1e-9);
        assert_eq!(result.snapped_to, Some(SnapTarget::ClipEdge(0)));
    }

    #[test]
    fn test_collect_targets() {
        let mut track = TimelineTrack::new_video("V1");
        track.add_clip(crate::clip::TimelineClip::new(track.id, "a", 1.0, 2.0));
        let targets = SnapTargets::collect(&[track], 4.0, None);
        assert_eq!(targets.playhead, Some(4.0));
        assert_eq!(targets.clip_edges, vec![1.0, 3.0]);
    }
}
