//! Track types for the timeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clip::TimelineClip;

/// Kind of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
}

impl TrackKind {
    /// Default pixel height of a track header/lane.
    pub fn default_height(self) -> f32 {
        match self {
            TrackKind::Video => 80.0,
            TrackKind::Audio => 60.0,
            TrackKind::Text => 40.0,
        }
    }
}

/// A track containing clips, kept sorted by start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineTrack {
    /// Unique track ID
    pub id: Uuid,
    /// Track name
    pub name: String,
    /// Track kind
    pub kind: TrackKind,
    /// Clips on this track
    pub clips: Vec<TimelineClip>,
    /// Is track muted
    pub muted: bool,
    /// Is track locked (prevent edits)
    pub locked: bool,
    /// Is track visible in preview/export
    pub visible: bool,
    /// Lane height in pixels
    pub height: f32,
}

impl TimelineTrack {
    /// Create a new empty track.
    pub fn new(kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            clips: Vec::new(),
            muted: false,
            locked: false,
            visible: true,
            height: kind.default_height(),
        }
    }

    /// Create a new video track.
    pub fn new_video(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Video, name)
    }

    /// Create a new audio track.
    pub fn new_audio(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Audio, name)
    }

    /// Create a new text track.
    pub fn new_text(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Text, name)
    }

    /// End of the last clip on this track.
    pub fn duration(&self) -> f64 {
        self.clips
            .iter()
            .map(TimelineClip::end_time)
            .fold(0.0, f64::max)
    }

    /// Add a clip, keeping clips sorted by start time. The clip is
    /// re-parented to this track.
    pub fn add_clip(&mut self, mut clip: TimelineClip) {
        clip.track_id = self.id;
        let index = self
            .clips
            .partition_point(|c| c.start_time <= clip.start_time);
        self.clips.insert(index, clip);
    }

    /// Remove a clip by ID. Returns the removed clip.
    pub fn remove_clip(&mut self, id: Uuid) -> Option<TimelineClip> {
        let index = self.clips.iter().position(|c| c.id == id)?;
        Some(self.clips.remove(index))
    }

    /// Find a clip by UUID.
    pub fn find_clip(&self, id: Uuid) -> Option<&TimelineClip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Find a clip mutably by UUID.
    pub fn find_clip_mut(&mut self, id: Uuid) -> Option<&mut TimelineClip> {
        self.clips.iter_mut().find(|c| c.id == id)
    }

    /// Restore start-time ordering after in-place edits.
    pub fn sort_clips(&mut self) {
        self.clips
            .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    }

    /// Number of clips in this track.
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_clip_keeps_order_and_parent() {
        let mut track = TimelineTrack::new_video("V1");
        let other = Uuid::new_v4();
        track.add_clip(TimelineClip::new(other, "b", 5.0, 2.0));
        track.add_clip(TimelineClip::new(other, "a", 0.0, 2.0));
        track.add_clip(TimelineClip::new(other, "c", 9.0, 1.0));

        let names: Vec<_> = track.clips.iter().map(|c| c.media_id.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(track.clips.iter().all(|c| c.track_id == track.id));
        assert_eq!(track.duration(), 10.0);
    }

    #[test]
    fn test_remove_and_find() {
        let mut track = TimelineTrack::new_audio("A1");
        let clip = TimelineClip::new(track.id, "music", 0.0, 30.0);
        let id = clip.id;
        track.add_clip(clip);

        assert!(track.find_clip(id).is_some());
        track.find_clip_mut(id).unwrap().start_time = 2.0;
        assert_eq!(track.find_clip(id).unwrap().start_time, 2.0);

        assert!(track.remove_clip(id).is_some());
        assert!(track.remove_clip(id).is_none());
        assert_eq!(track.clip_count(), 0);
        assert_eq!(track.duration(), 0.0);
    }

    #[test]
    fn test_default_heights() {
        assert_eq!(TimelineTrack::new_text("T1").height, 40.0);
        assert!(TimelineTrack::new_video("V1").visible);
    }
}
