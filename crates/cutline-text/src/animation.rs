//! Entry/exit animation progress for text overlays.

use cutline_core::Easing;
use serde::{Deserialize, Serialize};

use crate::overlay::TextOverlay;

/// Distance a slide animation travels, in percent of the canvas.
pub const SLIDE_DISTANCE: f64 = 10.0;
/// Scale an overlay grows from (entry) or shrinks to (exit).
pub const SCALE_FROM: f64 = 0.8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnimationType {
    #[default]
    None,
    Fade,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    Scale,
    Typewriter,
}

/// One entry or exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnimation {
    #[serde(rename = "type")]
    pub animation_type: TextAnimationType,
    /// Seconds.
    pub duration: f64,
    /// Seconds after the overlay start before an entry animation begins.
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl TextAnimation {
    pub fn new(animation_type: TextAnimationType, duration: f64) -> Self {
        Self {
            animation_type,
            duration,
            delay: 0.0,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    fn is_active(&self) -> bool {
        self.animation_type != TextAnimationType::None
    }
}

/// Raw (or eased) progress of both animations at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationProgress {
    /// 0 before the entry animation, 1 once it has finished.
    pub entry: f64,
    /// 0 until the exit animation starts, 1 at the overlay's end.
    pub exit: f64,
}

fn ramp(time: f64, start: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if time >= start { 1.0 } else { 0.0 };
    }
    ((time - start) / duration).clamp(0.0, 1.0)
}

/// Linear progress of the entry and exit animations at `time`.
///
/// Without an entry animation the overlay is fully "in" (entry = 1);
/// without an exit animation it never leaves (exit = 0).
pub fn calculate_animation_progress(overlay: &TextOverlay, time: f64) -> AnimationProgress {
    let entry = match overlay.animation_in.filter(TextAnimation::is_active) {
        Some(anim) => ramp(time, overlay.start_time + anim.delay, anim.duration),
        None => 1.0,
    };
    let exit = match overlay.animation_out.filter(TextAnimation::is_active) {
        Some(anim) => ramp(time, overlay.end_time() - anim.duration, anim.duration),
        None => 0.0,
    };
    AnimationProgress { entry, exit }
}

/// Progress with each animation's easing applied.
pub fn eased_progress(overlay: &TextOverlay, time: f64) -> AnimationProgress {
    let raw = calculate_animation_progress(overlay, time);
    let ease = |anim: Option<TextAnimation>, p: f64| anim.map_or(p, |a| a.easing.apply(p));
    AnimationProgress {
        entry: ease(overlay.animation_in, raw.entry),
        exit: ease(overlay.animation_out, raw.exit),
    }
}

/// Render-ready state of an overlay at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedState {
    pub opacity: f64,
    /// Offsets in percent of the canvas, added to the overlay position.
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    /// Degrees clockwise, from the overlay position.
    pub rotation: f64,
    /// Characters revealed by a typewriter animation; `None` shows all.
    pub visible_chars: Option<usize>,
}

impl AnimatedState {
    fn hidden() -> Self {
        Self {
            opacity: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            visible_chars: None,
        }
    }
}

/// Opacity, offsets and scale for the editing surface at `time`.
pub fn animated_state(overlay: &TextOverlay, time: f64) -> AnimatedState {
    if !overlay.is_visible_at(time) {
        return AnimatedState::hidden();
    }

    let progress = eased_progress(overlay, time);
    let chars = overlay.content.chars().count();
    let mut state = AnimatedState {
        opacity: overlay.style.opacity,
        rotation: overlay.position.rotation,
        ..AnimatedState::hidden()
    };

    if let Some(anim) = overlay.animation_in {
        let p = progress.entry;
        let remaining = 1.0 - p;
        match anim.animation_type {
            TextAnimationType::None => {}
            TextAnimationType::Fade => state.opacity *= p,
            TextAnimationType::SlideUp => state.offset_y += remaining * SLIDE_DISTANCE,
            TextAnimationType::SlideDown => state.offset_y -= remaining * SLIDE_DISTANCE,
            TextAnimationType::SlideLeft => state.offset_x += remaining * SLIDE_DISTANCE,
            TextAnimationType::SlideRight => state.offset_x -= remaining * SLIDE_DISTANCE,
            TextAnimationType::Scale => {
                state.scale *= SCALE_FROM + (1.0 - SCALE_FROM) * p;
                state.opacity *= p;
            }
            TextAnimationType::Typewriter => {
                state.visible_chars = Some((chars as f64 * p).round() as usize);
            }
        }
    }

    if let Some(anim) = overlay.animation_out {
        let p = progress.exit;
        match anim.animation_type {
            TextAnimationType::None => {}
            TextAnimationType::Fade => state.opacity *= 1.0 - p,
            TextAnimationType::SlideUp => state.offset_y -= p * SLIDE_DISTANCE,
            TextAnimationType::SlideDown => state.offset_y += p * SLIDE_DISTANCE,
            TextAnimationType::SlideLeft => state.offset_x -= p * SLIDE_DISTANCE,
            TextAnimationType::SlideRight => state.offset_x += p * SLIDE_DISTANCE,
            TextAnimationType::Scale => {
                state.scale *= 1.0 - (1.0 - SCALE_FROM) * p;
                state.opacity *= 1.0 - p;
            }
            TextAnimationType::Typewriter => {
                let shown = (chars as f64 * (1.0 - p)).round() as usize;
                state.visible_chars = Some(state.visible_chars.map_or(shown, |v| v.min(shown)));
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{create_text_overlay, TextOverlayOverrides};
    use crate::preset::TextPreset;
    use uuid::Uuid;

    fn overlay(animation_in: Option<TextAnimation>, animation_out: Option<TextAnimation>) -> TextOverlay {
        let mut o = create_text_overlay(
            Uuid::nil(),
            TextPreset::Custom,
            "Hello",
            2.0,
            6.0,
            &TextOverlayOverrides::default(),
        );
        o.animation_in = animation_in;
        o.animation_out = animation_out;
        o
    }

    #[test]
    fn test_entry_progress_ramps_linearly() {
        let o = overlay(Some(TextAnimation::new(TextAnimationType::Fade, 1.0)), None);
        assert_eq!(calculate_animation_progress(&o, 2.0).entry, 0.0);
        assert_eq!(calculate_animation_progress(&o, 2.5).entry, 0.5);
        assert_eq!(calculate_animation_progress(&o, 3.0).entry, 1.0);
        assert_eq!(calculate_animation_progress(&o, 1.0).entry, 0.0);
        assert_eq!(calculate_animation_progress(&o, 7.0).exit, 0.0);
    }

    #[test]
    fn test_entry_delay() {
        let anim = TextAnimation::new(TextAnimationType::Fade, 1.0).with_delay(0.5);
        let o = overlay(Some(anim), None);
        assert_eq!(calculate_animation_progress(&o, 2.5).entry, 0.0);
        assert_eq!(calculate_animation_progress(&o, 3.0).entry, 0.5);
    }

    #[test]
    fn test_exit_progress() {
        let o = overlay(None, Some(TextAnimation::new(TextAnimationType::Fade, 2.0)));
        // Overlay ends at 8.0; exit runs 6.0..8.0.
        assert_eq!(calculate_animation_progress(&o, 5.0).exit, 0.0);
        assert_eq!(calculate_animation_progress(&o, 7.0).exit, 0.5);
        assert_eq!(calculate_animation_progress(&o, 9.0).exit, 1.0);
        assert_eq!(calculate_animation_progress(&o, 5.0).entry, 1.0);
    }

    #[test]
    fn test_eased_progress() {
        let anim = TextAnimation::new(TextAnimationType::Fade, 1.0).with_easing(Easing::EaseIn);
        let o = overlay(Some(anim), None);
        assert_eq!(eased_progress(&o, 2.5).entry, 0.25);
    }

    #[test]
    fn test_animated_state() {
        let o = overlay(
            Some(TextAnimation::new(TextAnimationType::SlideUp, 1.0)),
            Some(TextAnimation::new(TextAnimationType::Fade, 2.0)),
        );
        let mid_entry = animated_state(&o, 2.5);
        assert_eq!(mid_entry.offset_y, 5.0);
        assert_eq!(mid_entry.opacity, 1.0);

        let mid_exit = animated_state(&o, 7.0);
        assert_eq!(mid_exit.offset_y, 0.0);
        assert_eq!(mid_exit.opacity, 0.5);

        assert_eq!(animated_state(&o, 8.0).opacity, 0.0);
    }

    #[test]
    fn test_rotation_carries_through() {
        let mut o = overlay(None, None);
        o.position.rotation = -30.0;
        assert_eq!(animated_state(&o, 3.0).rotation, -30.0);
        assert_eq!(animated_state(&o, 0.0).rotation, 0.0);
    }

    #[test]
    fn test_typewriter_reveals_characters() {
        let o = overlay(Some(TextAnimation::new(TextAnimationType::Typewriter, 1.0)), None);
        assert_eq!(animated_state(&o, 2.0).visible_chars, Some(0));
        assert_eq!(animated_state(&o, 2.6).visible_chars, Some(3));
        assert_eq!(animated_state(&o, 4.0).visible_chars, Some(5));
    }
}
