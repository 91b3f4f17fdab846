//! Clip algorithms: edges, overlap detection, gap search and splitting.
//!
//! Everything here is pure. Operations that do not apply (a split on a clip
//! boundary, no gap large enough) return `None` rather than an error.

use cutline_core::TimeRange;
use uuid::Uuid;

use crate::clip::TimelineClip;
use crate::track::TimelineTrack;

/// Every clip start and end across all tracks, deduplicated and ascending.
/// Used as snap targets; `exclude` drops the clip being dragged.
pub fn get_clip_edges(tracks: &[TimelineTrack], exclude: Option<Uuid>) -> Vec<f64> {
    let mut edges: Vec<f64> = tracks
        .iter()
        .flat_map(|t| t.clips.iter())
        .filter(|c| Some(c.id) != exclude)
        .flat_map(|c| [c.start_time, c.end_time()])
        .collect();
    edges.sort_by(f64::total_cmp);
    edges.dedup();
    edges
}

/// First clip in `others` that intersects `candidate`, skipping the
/// candidate itself. Not exhaustive: stops at the first conflict.
pub fn detect_overlap<'a>(
    candidate: &TimelineClip,
    others: &'a [TimelineClip],
) -> Option<&'a TimelineClip> {
    detect_overlap_range(
        candidate.start_time,
        candidate.duration,
        Some(candidate.id),
        others,
    )
}

/// Overlap test for a hypothetical placement (e.g. during a drag).
pub fn detect_overlap_range(
    start: f64,
    duration: f64,
    exclude: Option<Uuid>,
    others: &[TimelineClip],
) -> Option<&TimelineClip> {
    let end = start + duration;
    others
        .iter()
        .filter(|c| Some(c.id) != exclude)
        .find(|c| start < c.end_time() && end > c.start_time)
}

/// Find the gap of at least `needed` seconds whose nearer boundary is
/// closest to `target`. Gaps are the leading gap, every inter-clip gap and
/// the trailing gap up to `timeline_duration`.
pub fn find_nearest_gap(
    clips: &[TimelineClip],
    target: f64,
    needed: f64,
    timeline_duration: f64,
) -> Option<TimeRange> {
    let mut sorted: Vec<&TimelineClip> = clips.iter().collect();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut gaps = Vec::with_capacity(sorted.len() + 1);
    let mut cursor = 0.0_f64;
    for clip in &sorted {
        if clip.start_time > cursor {
            gaps.push(TimeRange::from_start_end(cursor, clip.start_time));
        }
        cursor = cursor.max(clip.end_time());
    }
    if timeline_duration > cursor {
        gaps.push(TimeRange::from_start_end(cursor, timeline_duration));
    }

    let mut best: Option<(TimeRange, f64)> = None;
    for gap in gaps.into_iter().filter(|g| g.duration >= needed) {
        let distance = (gap.start - target).abs().min((gap.end() - target).abs());
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((gap, distance));
        }
    }
    best.map(|(gap, _)| gap)
}

/// Split a clip at a timeline time strictly inside it.
///
/// The source window is divided at the same ratio as the timeline window,
/// so both halves keep the clip's speed. Both halves get fresh IDs; the
/// durations sum to the original and the source windows meet exactly.
pub fn split_clip(clip: &TimelineClip, split_time: f64) -> Option<(TimelineClip, TimelineClip)> {
    if !(split_time > clip.start_time && split_time < clip.end_time()) {
        return None;
    }

    let ratio = (split_time - clip.start_time) / clip.duration;
    let source_split = clip.source_start + ratio * clip.source_duration();
    let left_duration = split_time - clip.start_time;

    let left = TimelineClip {
        id: Uuid::new_v4(),
        duration: left_duration,
        source_end: source_split,
        ..clip.clone()
    };
    let right = TimelineClip {
        id: Uuid::new_v4(),
        start_time: split_time,
        duration: clip.duration - left_duration,
        source_start: source_split,
        ..clip.clone()
    };
    Some((left, right))
}

/// Latest clip end across all tracks; 0 for an empty timeline.
pub fn calculate_timeline_duration(tracks: &[TimelineTrack]) -> f64 {
    tracks.iter().map(TimelineTrack::duration).fold(0.0, f64::max)
}

/// Clip under `time` on a track (half-open ranges).
pub fn clip_at_time(track: &TimelineTrack, time: f64) -> Option<&TimelineClip> {
    track.clips.iter().find(|c| c.contains(time))
}

/// Clips on a track intersecting `[start, end)`.
pub fn clips_in_range(track: &TimelineTrack, start: f64, end: f64) -> Vec<&TimelineClip> {
    let range = TimeRange::from_start_end(start, end);
    track
        .clips
        .iter()
        .filter(|c| c.range().overlaps(range))
        .collect()
}
