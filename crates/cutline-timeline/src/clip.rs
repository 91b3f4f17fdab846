//! Clip types for the timeline.

use cutline_core::limits::MIN_CLIP_DURATION;
use cutline_core::TimeRange;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A clip on the timeline: a window of source media placed at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineClip {
    /// Unique clip ID
    pub id: Uuid,
    /// Owning track
    pub track_id: Uuid,
    /// Clip name (displayed in UI)
    pub name: String,
    /// Media asset reference, resolved by the render collaborator
    pub media_id: String,
    /// Timeline position in seconds
    pub start_time: f64,
    /// Duration on timeline in seconds
    pub duration: f64,
    /// Source in point
    pub source_start: f64,
    /// Source out point
    pub source_end: f64,
}

impl TimelineClip {
    /// Create a clip showing the first `duration` seconds of its source.
    pub fn new(track_id: Uuid, media_id: impl Into<String>, start_time: f64, duration: f64) -> Self {
        let media_id = media_id.into();
        Self {
            id: Uuid::new_v4(),
            track_id,
            name: media_id.clone(),
            media_id,
            start_time,
            duration,
            source_start: 0.0,
            source_end: duration,
        }
    }

    /// Set the source window.
    pub fn with_source(mut self, source_start: f64, source_end: f64) -> Self {
        self.source_start = source_start;
        self.source_end = source_end;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Timeline end (exclusive).
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Timeline range occupied by this clip.
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.duration)
    }

    /// Source window length.
    pub fn source_duration(&self) -> f64 {
        self.source_end - self.source_start
    }

    /// Source seconds consumed per timeline second.
    pub fn speed(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.source_duration() / self.duration
    }

    /// Check if a timeline time falls inside the clip (half-open).
    pub fn contains(&self, time: f64) -> bool {
        self.range().contains(time)
    }

    /// Map a timeline time to the source time it shows.
    pub fn source_time_at(&self, time: f64) -> f64 {
        self.source_start + (time - self.start_time) * self.speed()
    }

    /// Report violated invariants. Empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.duration.is_nan() || self.duration <= 0.0 {
            errors.push(format!("Clip '{}' must have a positive duration", self.name));
        }
        if self.source_end.is_nan() || self.source_end <= self.source_start {
            errors.push(format!(
                "Clip '{}' source end must be after source start",
                self.name
            ));
        }
        if self.start_time < 0.0 {
            errors.push(format!("Clip '{}' cannot start before 0", self.name));
        }
        errors
    }

    /// Move the in point by `delta` seconds (positive shortens the clip).
    /// The source in point moves proportionally. Returns false, leaving the
    /// clip untouched, when the result would be too short or start before 0.
    pub fn trim_start(&mut self, delta: f64) -> bool {
        let new_start = self.start_time + delta;
        let new_duration = self.duration - delta;
        if new_start < 0.0 || new_duration < MIN_CLIP_DURATION {
            return false;
        }
        let speed = self.speed();
        self.source_start += delta * speed;
        self.start_time = new_start;
        self.duration = new_duration;
        true
    }

    /// Move the out point by `delta` seconds (positive lengthens the clip).
    pub fn trim_end(&mut self, delta: f64) -> bool {
        let new_duration = self.duration + delta;
        if new_duration < MIN_CLIP_DURATION {
            return false;
        }
        let speed = self.speed();
        self.source_end += delta * speed;
        self.duration = new_duration;
        true
    }
}
