//! Track mixer state: per-track volume, pan, mute and solo plus master
//! controls.

use cutline_core::limits::{MAX_PAN, MAX_VOLUME, MIN_PAN};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Mixer channel for one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMixerTrack {
    pub track_id: Uuid,
    pub name: String,
    pub volume: f64,
    pub muted: bool,
    pub solo: bool,
    pub pan: f64,
}

impl AudioMixerTrack {
    pub fn new(track_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            track_id,
            name: name.into(),
            volume: 1.0,
            muted: false,
            solo: false,
            pan: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMixerState {
    pub tracks: Vec<AudioMixerTrack>,
    pub master_volume: f64,
    pub master_muted: bool,
    /// True when any track is soloed. Recomputed after every action.
    pub has_solo: bool,
}

impl Default for AudioMixerState {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            master_volume: 1.0,
            master_muted: false,
            has_solo: false,
        }
    }
}

impl AudioMixerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, track_id: Uuid) -> Option<&AudioMixerTrack> {
        self.tracks.iter().find(|t| t.track_id == track_id)
    }

    fn track_mut(&mut self, track_id: Uuid) -> Option<&mut AudioMixerTrack> {
        self.tracks.iter_mut().find(|t| t.track_id == track_id)
    }

    /// Whether any track is soloed, read from the tracks rather than the
    /// cached `has_solo` flag.
    pub fn any_solo(&self) -> bool {
        self.tracks.iter().any(|t| t.solo)
    }

    fn refresh_solo(&mut self) {
        self.has_solo = self.any_solo();
    }
}

/// Volume a track actually plays at.
///
/// Precedence: master mute, then the track's own mute, then solo (any solo
/// silences every non-solo track), then `track volume x master volume`.
/// Unknown tracks are silent.
pub fn effective_volume(state: &AudioMixerState, track_id: Uuid) -> f64 {
    if state.master_muted {
        return 0.0;
    }
    let Some(track) = state.track(track_id) else {
        return 0.0;
    };
    if track.muted {
        return 0.0;
    }
    if !track.solo && state.any_solo() {
        return 0.0;
    }
    track.volume * state.master_volume
}

/// An edit to the mixer.
#[derive(Debug, Clone, PartialEq)]
pub enum MixerAction {
    AddTrack(AudioMixerTrack),
    RemoveTrack(Uuid),
    SetTrackVolume { track_id: Uuid, volume: f64 },
    SetTrackPan { track_id: Uuid, pan: f64 },
    ToggleMute(Uuid),
    ToggleSolo(Uuid),
    SetMasterVolume(f64),
    ToggleMasterMute,
}

impl MixerAction {
    pub fn apply(self, state: &mut AudioMixerState) {
        match self {
            Self::AddTrack(mut track) => {
                if state.track(track.track_id).is_some() {
                    debug!(track = %track.track_id, "mixer track already present");
                } else {
                    track.volume = track.volume.clamp(0.0, MAX_VOLUME);
                    track.pan = track.pan.clamp(MIN_PAN, MAX_PAN);
                    state.tracks.push(track);
                }
            }
            Self::RemoveTrack(track_id) => state.tracks.retain(|t| t.track_id != track_id),
            Self::SetTrackVolume { track_id, volume } => {
                if let Some(track) = state.track_mut(track_id) {
                    track.volume = volume.clamp(0.0, MAX_VOLUME);
                }
            }
            Self::SetTrackPan { track_id, pan } => {
                if let Some(track) = state.track_mut(track_id) {
                    track.pan = pan.clamp(MIN_PAN, MAX_PAN);
                }
            }
            Self::ToggleMute(track_id) => {
                if let Some(track) = state.track_mut(track_id) {
                    track.muted = !track.muted;
                }
            }
            Self::ToggleSolo(track_id) => {
                if let Some(track) = state.track_mut(track_id) {
                    track.solo = !track.solo;
                }
            }
            Self::SetMasterVolume(volume) => state.master_volume = volume.clamp(0.0, MAX_VOLUME),
            Self::ToggleMasterMute => state.master_muted = !state.master_muted,
        }
        state.refresh_solo();
    }
}
