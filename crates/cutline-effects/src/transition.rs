//! Transition types, duration rules and validation.

use cutline_timeline::TimelineClip;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transition kinds between two adjacent clips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionType {
    /// Hard cut.
    #[default]
    None,
    Fade,
    FadeBlack,
    FadeWhite,
    Dissolve,
    /// Same as `WipeLeft`.
    Wipe,
    WipeLeft,
    WipeRight,
    WipeUp,
    WipeDown,
    /// Same as `SlideLeft`.
    Slide,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    ZoomIn,
    ZoomOut,
}

/// Duration rules shared by a family of transitions (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionConfig {
    pub name: &'static str,
    /// Backend crossfade name; `None` for a hard cut.
    pub xfade: Option<&'static str>,
    pub default_ms: u32,
    pub min_ms: u32,
    pub max_ms: u32,
}

const fn family(name: &'static str, xfade: &'static str, default_ms: u32, min_ms: u32) -> TransitionConfig {
    TransitionConfig {
        name,
        xfade: Some(xfade),
        default_ms,
        min_ms,
        max_ms: 3000,
    }
}

impl TransitionType {
    pub const ALL: [TransitionType; 17] = [
        TransitionType::None,
        TransitionType::Fade,
        TransitionType::FadeBlack,
        TransitionType::FadeWhite,
        TransitionType::Dissolve,
        TransitionType::Wipe,
        TransitionType::WipeLeft,
        TransitionType::WipeRight,
        TransitionType::WipeUp,
        TransitionType::WipeDown,
        TransitionType::Slide,
        TransitionType::SlideLeft,
        TransitionType::SlideRight,
        TransitionType::SlideUp,
        TransitionType::SlideDown,
        TransitionType::ZoomIn,
        TransitionType::ZoomOut,
    ];

    pub fn config(self) -> TransitionConfig {
        match self {
            TransitionType::None => TransitionConfig {
                name: "None",
                xfade: None,
                default_ms: 0,
                min_ms: 0,
                max_ms: 0,
            },
            TransitionType::Fade => family("Fade", "fade", 500, 100),
            TransitionType::FadeBlack => family("Fade to Black", "fadeblack", 500, 100),
            TransitionType::FadeWhite => family("Fade to White", "fadewhite", 500, 100),
            TransitionType::Dissolve => family("Dissolve", "dissolve", 800, 200),
            TransitionType::Wipe | TransitionType::WipeLeft => family("Wipe Left", "wipeleft", 700, 200),
            TransitionType::WipeRight => family("Wipe Right", "wiperight", 700, 200),
            TransitionType::WipeUp => family("Wipe Up", "wipeup", 700, 200),
            TransitionType::WipeDown => family("Wipe Down", "wipedown", 700, 200),
            TransitionType::Slide | TransitionType::SlideLeft => {
                family("Slide Left", "slideleft", 600, 200)
            }
            TransitionType::SlideRight => family("Slide Right", "slideright", 600, 200),
            TransitionType::SlideUp => family("Slide Up", "slideup", 600, 200),
            TransitionType::SlideDown => family("Slide Down", "slidedown", 600, 200),
            TransitionType::ZoomIn => family("Zoom In", "zoomin", 800, 300),
            // The backend has no zoom-out crossfade; a closing circle reads the same.
            TransitionType::ZoomOut => family("Zoom Out", "circleclose", 800, 300),
        }
    }

    pub fn is_cut(self) -> bool {
        self == TransitionType::None
    }
}

/// A transition between two clips on the same track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub id: Uuid,
    pub from_clip_id: Uuid,
    pub to_clip_id: Uuid,
    #[serde(rename = "type")]
    pub transition_type: TransitionType,
    pub duration_ms: u32,
}

impl Transition {
    /// Create a transition with its type's default duration.
    pub fn new(from_clip_id: Uuid, to_clip_id: Uuid, transition_type: TransitionType) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_clip_id,
            to_clip_id,
            transition_type,
            duration_ms: transition_type.config().default_ms,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Overlap in seconds; 0 for a cut.
    pub fn duration_secs(&self) -> f64 {
        if self.transition_type.is_cut() {
            0.0
        } else {
            f64::from(self.duration_ms) / 1000.0
        }
    }
}

/// Result of a duration check, with the bounds the UI should offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationValidity {
    pub valid: bool,
    pub min_ms: u32,
    pub max_ms: u32,
    pub message: Option<String>,
}

/// Check a transition duration against its family bounds and the two clips.
///
/// The upper bound is the shorter clip's length, capped at the family
/// maximum. Cuts are always valid.
pub fn validate_transition_duration(
    transition_type: TransitionType,
    duration_ms: u32,
    from_duration: f64,
    to_duration: f64,
) -> DurationValidity {
    let config = transition_type.config();
    if transition_type.is_cut() {
        return DurationValidity {
            valid: true,
            min_ms: 0,
            max_ms: 0,
            message: None,
        };
    }

    let shorter_ms = (from_duration.min(to_duration).max(0.0) * 1000.0).floor() as u32;
    let max_ms = shorter_ms.min(config.max_ms);
    let min_ms = config.min_ms;

    let message = if max_ms < min_ms {
        Some(format!(
            "Clips are too short for a {} transition (needs at least {}ms)",
            config.name, min_ms
        ))
    } else if duration_ms < min_ms {
        Some(format!("{} must last at least {}ms", config.name, min_ms))
    } else if duration_ms > max_ms {
        Some(format!("{} cannot last more than {}ms", config.name, max_ms))
    } else {
        None
    };

    DurationValidity {
        valid: message.is_none(),
        min_ms,
        max_ms,
        message,
    }
}

/// Check a transition against the clips it joins. Empty means valid.
pub fn validate_transition(
    transition: &Transition,
    from: &TimelineClip,
    to: &TimelineClip,
) -> Vec<String> {
    let mut errors = Vec::new();
    if transition.from_clip_id == transition.to_clip_id {
        errors.push("Transition must join two different clips".to_string());
    }
    if transition.from_clip_id != from.id || transition.to_clip_id != to.id {
        errors.push("Transition does not reference the given clips".to_string());
    }
    if from.track_id != to.track_id {
        errors.push("Transition clips must be on the same track".to_string());
    }
    let validity = validate_transition_duration(
        transition.transition_type,
        transition.duration_ms,
        from.duration,
        to.duration,
    );
    errors.extend(validity.message);
    errors
}
