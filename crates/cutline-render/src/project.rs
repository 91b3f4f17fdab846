//! The project document: the persisted shape of an edit.

use cutline_audio::{validate_audio_config, AudioConfig, AudioMixerState, AudioMixerTrack, MixerAction};
use cutline_core::FrameRate;
use cutline_effects::{validate_effect, validate_transition, EffectsState, Transition};
use cutline_text::{validate_text_overlay, TextOverlay};
use cutline_timeline::{
    calculate_timeline_duration, detect_overlap, TimelineClip, TimelineState, TimelineTrack,
    TrackKind,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::status::RenderStatus;

/// Output canvas and timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub width: u32,
    pub height: u32,
    pub frame_rate: FrameRate,
    /// Audio sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            frame_rate: FrameRate::FPS_30,
            sample_rate: 48_000,
        }
    }
}

/// Tracks plus the per-clip collections the engines compile from.
///
/// Effects and audio settings are keyed by clip id; transitions and text
/// overlays reference clips and tracks by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub settings: ProjectSettings,
    pub tracks: Vec<TimelineTrack>,
    pub duration: f64,
    #[serde(default)]
    pub effects: EffectsState,
    #[serde(default)]
    pub transitions: Vec<Transition>,
    #[serde(default)]
    pub text_overlays: Vec<TextOverlay>,
    #[serde(default)]
    pub audio: BTreeMap<Uuid, AudioConfig>,
    #[serde(default)]
    pub mixer: AudioMixerState,
    #[serde(default)]
    pub status: RenderStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub error: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            settings: ProjectSettings::default(),
            tracks: Vec::new(),
            duration: 0.0,
            effects: EffectsState::default(),
            transitions: Vec::new(),
            text_overlays: Vec::new(),
            audio: BTreeMap::new(),
            mixer: AudioMixerState::default(),
            status: RenderStatus::Draft,
            progress: 0.0,
            error: None,
        }
    }

    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Add a track. Audio tracks also get a mixer channel.
    pub fn add_track(&mut self, track: TimelineTrack) {
        if track.kind == TrackKind::Audio {
            MixerAction::AddTrack(AudioMixerTrack::new(track.id, track.name.clone()))
                .apply(&mut self.mixer);
        }
        self.tracks.push(track);
        self.recompute_duration();
    }

    pub fn recompute_duration(&mut self) {
        self.duration = calculate_timeline_duration(&self.tracks);
    }

    pub fn find_clip(&self, clip_id: Uuid) -> Option<&TimelineClip> {
        self.tracks.iter().find_map(|t| t.find_clip(clip_id))
    }

    pub fn find_track(&self, track_id: Uuid) -> Option<&TimelineTrack> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    /// Editing state seeded with this project's tracks.
    pub fn timeline_state(&self) -> TimelineState {
        TimelineState::with_tracks(self.tracks.clone())
    }

    /// Take tracks back from the editing surface, dropping per-clip data
    /// whose clip or track no longer exists.
    pub fn sync_from(&mut self, state: &TimelineState) {
        self.tracks = state.tracks.clone();
        self.recompute_duration();
        self.prune_orphans();
    }

    fn prune_orphans(&mut self) {
        let clip_ids: Vec<Uuid> = self
            .tracks
            .iter()
            .flat_map(|t| t.clips.iter().map(|c| c.id))
            .collect();
        let track_ids: Vec<Uuid> = self.tracks.iter().map(|t| t.id).collect();

        let before = self.transitions.len();
        self.transitions
            .retain(|t| clip_ids.contains(&t.from_clip_id) && clip_ids.contains(&t.to_clip_id));
        let dropped = before - self.transitions.len();
        if dropped > 0 {
            debug!(dropped, "dropped transitions referencing removed clips");
        }

        self.effects.effects.retain(|clip_id, _| clip_ids.contains(clip_id));
        self.audio.retain(|clip_id, _| clip_ids.contains(clip_id));
        self.text_overlays.retain(|o| track_ids.contains(&o.track_id));
        self.mixer.tracks.retain(|t| track_ids.contains(&t.track_id));
        self.mixer.has_solo = self.mixer.any_solo();
    }

    /// Every problem in the project, batch-reported.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.settings.width == 0 || self.settings.height == 0 {
            errors.push("Resolution must be non-zero".to_string());
        }
        if self.settings.frame_rate.to_fps_f64() <= 0.0 {
            errors.push("Frame rate must be positive".to_string());
        }

        for track in &self.tracks {
            for (i, clip) in track.clips.iter().enumerate() {
                errors.extend(clip.validate());
                if let Some(other) = detect_overlap(clip, &track.clips[i + 1..]) {
                    errors.push(format!(
                        "Clips '{}' and '{}' overlap on track '{}'",
                        clip.name, other.name, track.name
                    ));
                }
            }
        }

        for effects in self.effects.effects.values() {
            for effect in effects {
                errors.extend(validate_effect(effect));
            }
        }

        for transition in &self.transitions {
            match (
                self.find_clip(transition.from_clip_id),
                self.find_clip(transition.to_clip_id),
            ) {
                (Some(from), Some(to)) => errors.extend(validate_transition(transition, from, to)),
                _ => errors.push(format!("Transition {} references a missing clip", transition.id)),
            }
        }

        for overlay in &self.text_overlays {
            errors.extend(validate_text_overlay(overlay));
        }

        for (clip_id, config) in &self.audio {
            match self.find_clip(*clip_id) {
                Some(clip) => errors.extend(validate_audio_config(config, clip.duration)),
                None => errors.push(format!("Audio settings reference missing clip {clip_id}")),
            }
        }

        errors
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Untitled Project")
    }
}
