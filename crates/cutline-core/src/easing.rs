//! Easing curves applied to raw linear animation progress.

use serde::{Deserialize, Serialize};

/// Quadratic easing family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    /// Accelerate from zero velocity.
    EaseIn,
    /// Decelerate to zero velocity.
    EaseOut,
    /// Accelerate until halfway, then decelerate.
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` (clamped to 0..1) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}
